use crate::observations::error::ObservationError;
use crate::observations::response::ObservationsResponse;
use crate::settings::FrostSettings;
use log::debug;
use reqwest::Client;

/// Issues one observations query against Frost and parses the payload.
///
/// `referencetime` is an ISO `start/end` range, `elements` a comma-separated
/// `elementId` list. One request, no retries.
pub(crate) async fn query_observations(
    http: &Client,
    settings: &FrostSettings,
    station: &str,
    referencetime: &str,
    elements: &str,
) -> Result<ObservationsResponse, ObservationError> {
    let url = settings.observations_url();
    debug!("Querying observations for {station} over {referencetime}");

    let response = http
        .get(&url)
        .basic_auth(&settings.client_id, Some(""))
        .query(&[
            ("sources", station),
            ("referencetime", referencetime),
            ("elements", elements),
        ])
        .send()
        .await
        .map_err(|e| ObservationError::NetworkRequest(url.clone(), e))?;
    let response = match response.error_for_status() {
        Ok(resp) => resp,
        Err(e) => {
            return Err(if let Some(status) = e.status() {
                ObservationError::HttpStatus {
                    url,
                    status,
                    source: e,
                }
            } else {
                ObservationError::NetworkRequest(url, e)
            });
        }
    };

    let body = response
        .bytes()
        .await
        .map_err(|e| ObservationError::NetworkRequest(url.clone(), e))?;
    Ok(serde_json::from_slice(&body)?)
}
