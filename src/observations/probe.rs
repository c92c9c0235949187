use crate::observations::error::ObservationError;
use crate::observations::fetch::query_observations;
use crate::observations::response::ObservationsResponse;
use crate::settings::FrostSettings;
use crate::types::element::Element;
use log::info;
use reqwest::Client;
use std::collections::HashSet;

/// Determines which elements a station actually reports.
///
/// Issues a probe query over the fixed reference window in the settings and
/// collects every distinct known element in the response. Stations vary in
/// sensor coverage, so this runs before any bulk observation query.
pub(crate) async fn available_elements(
    http: &Client,
    settings: &FrostSettings,
    station: &str,
) -> Result<HashSet<Element>, ObservationError> {
    let elements = Element::query_list(Element::ALL);
    let response = query_observations(
        http,
        settings,
        station,
        &settings.probe_window,
        &elements,
    )
    .await?;

    let observed = collect_elements(&response);
    info!(
        "Station {station} reports {} of {} probed elements",
        observed.len(),
        Element::ALL.len()
    );
    Ok(observed)
}

/// Collects every distinct known element present in a probe response.
/// Unknown element ids are ignored.
fn collect_elements(response: &ObservationsResponse) -> HashSet<Element> {
    let mut observed = HashSet::new();
    for record in &response.data {
        for obs in &record.observations {
            if let Some(element) = Element::from_element_id(&obs.element_id) {
                observed.insert(element);
            }
        }
    }
    observed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_distinct_known_elements() {
        let payload = r#"{
            "data": [
                {
                    "referenceTime": "2024-01-01T00:00:00.000Z",
                    "observations": [
                        {"elementId": "mean(air_temperature P1D)", "value": 1.0},
                        {"elementId": "min(air_temperature P1D)", "value": -2.0},
                        {"elementId": "sum(precipitation_amount P1D)", "value": 4.0}
                    ]
                },
                {
                    "referenceTime": "2024-01-02T00:00:00.000Z",
                    "observations": [
                        {"elementId": "mean(air_temperature P1D)", "value": 0.5}
                    ]
                }
            ]
        }"#;
        let parsed: ObservationsResponse = serde_json::from_str(payload).unwrap();
        let observed = collect_elements(&parsed);
        assert_eq!(observed.len(), 2);
        assert!(observed.contains(&Element::MeanAirTemperature));
        assert!(observed.contains(&Element::MinAirTemperature));
    }

    #[test]
    fn empty_payload_yields_empty_set() {
        let parsed: ObservationsResponse = serde_json::from_str(r#"{"data": []}"#).unwrap();
        assert!(collect_elements(&parsed).is_empty());
    }
}
