use crate::observations::error::ObservationError;
use crate::observations::fetch::query_observations;
use crate::settings::FrostSettings;
use crate::types::element::Element;
use crate::types::summary::WeatherSummary;
use chrono::{Duration, NaiveDate};
use log::info;
use reqwest::Client;
use std::collections::HashSet;

/// Trailing sub-windows for the temperature means, in days.
const DAYS_3M: i64 = 90;
const DAYS_1Y: i64 = 365;

/// Fetches and reduces historical observations for one station and one
/// record date.
///
/// The window runs from `date - window_days` to `date`, inclusive, in ISO
/// calendar form. One bulk query covers all available elements; the three
/// temperature means are post-filtered from it by reference time. An empty
/// observation list is a failure, not an all-`None` summary.
pub(crate) async fn weather_summary(
    http: &Client,
    settings: &FrostSettings,
    station: &str,
    date: NaiveDate,
    elements: &HashSet<Element>,
) -> Result<WeatherSummary, ObservationError> {
    let end = date;
    let start = end - Duration::days(settings.window_days);
    let referencetime = format!("{start}/{end}");
    let element_list = Element::query_list(elements.iter().copied());

    info!("Fetching weather data for {station} from {start} to {end}");
    let response = query_observations(http, settings, station, &referencetime, &element_list).await?;

    if response.data.is_empty() {
        return Err(ObservationError::NoObservations {
            station: station.to_string(),
            start,
            end,
        });
    }

    let mut acc = SummaryAccumulator::new(end);
    for record in &response.data {
        let observed_on = record.reference_time.date_naive();
        for obs in &record.observations {
            if let (Some(element), Some(value)) =
                (Element::from_element_id(&obs.element_id), obs.value)
            {
                acc.push(element, observed_on, value);
            }
        }
    }
    Ok(acc.finish())
}

/// Accumulates observation values into per-field buckets.
///
/// Mean air temperature feeds three buckets gated by the observation date;
/// the other elements map to exactly one bucket each.
pub(crate) struct SummaryAccumulator {
    cutoff_3m: NaiveDate,
    cutoff_1y: NaiveDate,
    mean_temp_3m: Vec<f64>,
    mean_temp_1y: Vec<f64>,
    mean_temp_5y: Vec<f64>,
    min_temp: Vec<f64>,
    max_temp: Vec<f64>,
    humidity: Vec<f64>,
    soil_humidity: Vec<f64>,
}

impl SummaryAccumulator {
    pub(crate) fn new(end: NaiveDate) -> Self {
        Self {
            cutoff_3m: end - Duration::days(DAYS_3M),
            cutoff_1y: end - Duration::days(DAYS_1Y),
            mean_temp_3m: Vec::new(),
            mean_temp_1y: Vec::new(),
            mean_temp_5y: Vec::new(),
            min_temp: Vec::new(),
            max_temp: Vec::new(),
            humidity: Vec::new(),
            soil_humidity: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, element: Element, observed_on: NaiveDate, value: f64) {
        match element {
            Element::MeanAirTemperature => {
                self.mean_temp_5y.push(value);
                if observed_on >= self.cutoff_1y {
                    self.mean_temp_1y.push(value);
                }
                if observed_on >= self.cutoff_3m {
                    self.mean_temp_3m.push(value);
                }
            }
            Element::MinAirTemperature => self.min_temp.push(value),
            Element::MaxAirTemperature => self.max_temp.push(value),
            Element::MeanRelativeHumidity => self.humidity.push(value),
            Element::SoilWaterFraction => self.soil_humidity.push(value),
        }
    }

    pub(crate) fn finish(self) -> WeatherSummary {
        WeatherSummary {
            mean_temp_3m: mean(&self.mean_temp_3m),
            mean_temp_1y: mean(&self.mean_temp_1y),
            mean_temp_5y: mean(&self.mean_temp_5y),
            min_temp: mean(&self.min_temp),
            max_temp: mean(&self.max_temp),
            humidity: mean(&self.humidity),
            soil_humidity: mean(&self.soil_humidity),
        }
    }
}

/// Arithmetic mean, or `None` for an empty bucket. Never zero-fills.
fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}
