//! Run configuration for the Frost client: credentials, endpoints, and the
//! tunables of the enrichment pipeline.

const DEFAULT_BASE_URL: &str = "https://frost.met.no";

/// Search radius for nearby stations, in kilometers.
const DEFAULT_MAX_DISTANCE_KM: f64 = 20.0;

/// Trailing observation window, in days.
const DEFAULT_WINDOW_DAYS: i64 = 5 * 365;

/// Fixed two-day window used to probe which elements a station reports.
const DEFAULT_PROBE_WINDOW: &str = "2024-01-01/2024-01-02";

/// Settings for a [`Frost`](crate::Frost) client.
///
/// Frost authenticates with a client id and an empty secret; register one at
/// <https://frost.met.no/auth/requestCredentials.html>. All other fields have
/// defaults matching the production enrichment runs.
///
/// # Examples
///
/// ```
/// use frost_enrich::FrostSettings;
///
/// let settings = FrostSettings::new("my-client-id");
/// assert_eq!(settings.max_distance_km, 20.0);
///
/// let wider = FrostSettings {
///     max_distance_km: 50.0,
///     ..FrostSettings::new("my-client-id")
/// };
/// assert_eq!(wider.max_distance_km, 50.0);
/// ```
#[derive(Debug, Clone)]
pub struct FrostSettings {
    /// Frost API client id, sent as the basic-auth user with an empty secret.
    pub client_id: String,
    /// Base URL of the Frost API.
    pub base_url: String,
    /// Radius within which stations are considered candidates for a record.
    pub max_distance_km: f64,
    /// Length of the trailing observation window in days.
    pub window_days: i64,
    /// Reference time range used by the element availability probe.
    pub probe_window: String,
}

impl FrostSettings {
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_distance_km: DEFAULT_MAX_DISTANCE_KM,
            window_days: DEFAULT_WINDOW_DAYS,
            probe_window: DEFAULT_PROBE_WINDOW.to_string(),
        }
    }

    pub(crate) fn sources_url(&self) -> String {
        format!("{}/sources/v0.jsonld", self.base_url)
    }

    pub(crate) fn observations_url(&self) -> String {
        format!("{}/observations/v0.jsonld", self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_derive_from_base_url() {
        let settings = FrostSettings {
            base_url: "http://localhost:8080".to_string(),
            ..FrostSettings::new("id")
        };
        assert_eq!(settings.sources_url(), "http://localhost:8080/sources/v0.jsonld");
        assert_eq!(
            settings.observations_url(),
            "http://localhost:8080/observations/v0.jsonld"
        );
    }
}
