use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ObservationError {
    #[error("Unparseable observation date '{0}', expected day-first format")]
    UnparseableDate(String, #[source] chrono::ParseError),

    #[error("Station '{0}' reports none of the requested elements")]
    NoElements(String),

    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to parse observation data")]
    JsonParse(#[from] serde_json::Error),

    #[error("No observations for station '{station}' between {start} and {end}")]
    NoObservations {
        station: String,
        start: NaiveDate,
        end: NaiveDate,
    },
}
