//! Wire format of the Frost `/observations/v0.jsonld` endpoint, shared by the
//! element availability probe and the observation aggregator.

use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct ObservationsResponse {
    #[serde(default)]
    pub data: Vec<SourceObservations>,
}

/// Observations for one source at one reference time.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SourceObservations {
    pub reference_time: DateTime<Utc>,
    #[serde(default)]
    pub observations: Vec<ObservationValue>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ObservationValue {
    pub element_id: String,
    /// Missing for suppressed or quality-rejected values.
    pub value: Option<f64>,
}
