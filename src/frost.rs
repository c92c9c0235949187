//! This module provides the main entry point for the Frost enrichment
//! client. It fetches the station directory once at construction and exposes
//! proximity matching, per-station weather summaries, and the dataset
//! enrichment driver.

use crate::enrich::EnrichReport;
use crate::error::FrostEnrichError;
use crate::observations::aggregate;
use crate::observations::error::ObservationError;
use crate::observations::probe;
use crate::settings::FrostSettings;
use crate::stations::locate_station::StationDirectory;
use crate::types::element::Element;
use crate::types::station::Station;
use crate::types::summary::WeatherSummary;
use bon::bon;
use chrono::NaiveDate;
use log::warn;
use ordered_float::OrderedFloat;
use reqwest::Client;
use std::collections::{hash_map::Entry, HashMap, HashSet};
use std::path::Path;
use tokio::sync::Mutex;

/// Day-first date format used by the input datasets (e.g. "15.06.2022").
pub(crate) const DATE_FORMAT: &str = "%d.%m.%Y";

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second
/// (index 1). Both values are represented as `f64`.
///
/// # Examples
///
/// ```
/// use frost_enrich::LatLon;
///
/// let oslo_center = LatLon(59.9139, 10.7522);
/// assert_eq!(oslo_center.0, 59.9139); // Latitude
/// assert_eq!(oslo_center.1, 10.7522); // Longitude
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon(pub f64, pub f64);

/// A cache key built from coordinates rounded to 4 decimal places.
///
/// Records sharing a near-identical location reuse the same nearby-station
/// lookup: two locations with identical rounded coordinates always receive
/// the same candidate list within one run.
///
/// # Examples
///
/// ```
/// use frost_enrich::{CoordinateKey, LatLon};
///
/// let a = CoordinateKey::from(LatLon(59.912341, 10.752199));
/// let b = CoordinateKey::from(LatLon(59.912339, 10.752201));
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CoordinateKey {
    lat: OrderedFloat<f64>,
    lon: OrderedFloat<f64>,
}

impl From<LatLon> for CoordinateKey {
    fn from(location: LatLon) -> Self {
        const SCALE: f64 = 1e4;
        Self {
            lat: OrderedFloat((location.0 * SCALE).round() / SCALE),
            lon: OrderedFloat((location.1 * SCALE).round() / SCALE),
        }
    }
}

/// The main client for enriching records with Frost weather data.
///
/// Holds the HTTP client, the settings, the station directory fetched once at
/// construction, and two run-scoped caches: nearby-station candidate lists
/// keyed by rounded coordinates, and element availability keyed by station
/// id. Neither cache survives the client.
///
/// # Examples
///
/// ```no_run
/// # use frost_enrich::{Frost, FrostSettings, FrostEnrichError};
/// # async fn run() -> Result<(), FrostEnrichError> {
/// let client = Frost::new(FrostSettings::new("my-client-id")).await;
/// // Now you can match stations and fetch weather summaries.
/// # Ok(())
/// # }
/// ```
pub struct Frost {
    http: Client,
    settings: FrostSettings,
    directory: StationDirectory,
    nearby_cache: Mutex<HashMap<CoordinateKey, Vec<Station>>>,
    element_cache: Mutex<HashMap<String, HashSet<Element>>>,
}

#[bon]
impl Frost {
    /// Creates a client and fetches the station directory.
    ///
    /// The directory is fetched exactly once; if the fetch fails the client
    /// starts with an empty directory, every proximity lookup finds nothing,
    /// and the run still completes. Use [`Frost::with_directory`] to inject a
    /// directory and skip the network round trip.
    pub async fn new(settings: FrostSettings) -> Self {
        let http = Client::new();
        let directory = match StationDirectory::fetch(&http, &settings).await {
            Ok(directory) => directory,
            Err(e) => {
                warn!("Failed to fetch station directory, continuing with none available: {e}");
                StationDirectory::empty()
            }
        };
        Self::assemble(http, settings, directory)
    }

    /// Creates a client around an existing station directory.
    pub fn with_directory(settings: FrostSettings, directory: StationDirectory) -> Self {
        Self::assemble(Client::new(), settings, directory)
    }

    fn assemble(http: Client, settings: FrostSettings, directory: StationDirectory) -> Self {
        Self {
            http,
            settings,
            directory,
            nearby_cache: Mutex::new(HashMap::new()),
            element_cache: Mutex::new(HashMap::new()),
        }
    }

    /// The station directory this client queries.
    pub fn directory(&self) -> &StationDirectory {
        &self.directory
    }

    /// Finds candidate stations near a location, closest first.
    ///
    /// Results are cached by the coordinates rounded to 4 decimal places, so
    /// repeated lookups for near-identical locations reuse the first scan.
    /// The cache assumes the radius stays constant across a run, as it does
    /// in the batch driver.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.location(LatLon)`: **Required.** The coordinates to search around.
    /// * `.max_distance_km(f64)`: Optional. Search radius override; defaults
    ///   to the settings value (20 km).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use frost_enrich::{Frost, FrostSettings, LatLon, FrostEnrichError};
    /// # async fn run() -> Result<(), FrostEnrichError> {
    /// let client = Frost::new(FrostSettings::new("my-client-id")).await;
    ///
    /// let candidates = client
    ///     .find_stations()
    ///     .location(LatLon(59.91, 10.71))
    ///     .call()
    ///     .await;
    /// if let Some(nearest) = candidates.first() {
    ///     println!("Nearest station: {}", nearest.id);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub async fn find_stations(
        &self,
        location: LatLon,
        max_distance_km: Option<f64>,
    ) -> Vec<Station> {
        let max_distance_km = max_distance_km.unwrap_or(self.settings.max_distance_km);
        let key = CoordinateKey::from(location);

        {
            let cache = self.nearby_cache.lock().await;
            if let Some(hit) = cache.get(&key) {
                return hit.clone();
            }
        }

        let found: Vec<Station> = self
            .directory
            .query(location.0, location.1, max_distance_km)
            .into_iter()
            .map(|(station, _distance)| station)
            .collect();

        let mut cache = self.nearby_cache.lock().await;
        match cache.entry(key) {
            Entry::Occupied(entry) => entry.get().clone(),
            Entry::Vacant(entry) => {
                entry.insert(found.clone());
                found
            }
        }
    }

    /// Fetches a weather summary for one station and one record date.
    ///
    /// The date is day-first text (e.g. "15.06.2022"). The station is probed
    /// for element availability first (memoized per run); stations reporting
    /// none of the known elements fail with [`ObservationError::NoElements`].
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.station(&str)`: **Required.** The Frost source id (e.g. "SN18700").
    /// * `.date(&str)`: **Required.** The record date, day-first.
    ///
    /// # Errors
    ///
    /// Any [`ObservationError`]: unparseable date, no reported elements,
    /// transport or HTTP failure, or an empty observation window. None of
    /// these are fatal to a batch run; the driver skips the record.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use frost_enrich::{Frost, FrostSettings, FrostEnrichError};
    /// # async fn run() -> Result<(), FrostEnrichError> {
    /// let client = Frost::new(FrostSettings::new("my-client-id")).await;
    ///
    /// let summary = client
    ///     .weather_summary()
    ///     .station("SN18700")
    ///     .date("15.06.2022")
    ///     .call()
    ///     .await?;
    /// println!("{summary}");
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub async fn weather_summary(
        &self,
        station: &str,
        date: &str,
    ) -> Result<WeatherSummary, ObservationError> {
        let parsed = NaiveDate::parse_from_str(date, DATE_FORMAT)
            .map_err(|e| ObservationError::UnparseableDate(date.to_string(), e))?;

        let elements = self.available_elements(station).await?;
        if elements.is_empty() {
            return Err(ObservationError::NoElements(station.to_string()));
        }

        aggregate::weather_summary(&self.http, &self.settings, station, parsed, &elements).await
    }

    /// Enriches a CSV dataset and writes the result to a new file.
    ///
    /// Reads the input table, resolves the nearest station and a weather
    /// summary for every record, appends the seven summary columns, and
    /// writes the full table to `output`. Records that cannot be enriched
    /// keep null fields; the run always completes.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.input(&Path)`: **Required.** Path of the input CSV. Must contain
    ///   `lat`, `long`, and day-first `date` columns.
    /// * `.output(&Path)`: **Required.** Path the enriched CSV is written to.
    ///
    /// # Errors
    ///
    /// Only dataset-level failures abort the run: unreadable input, missing
    /// required columns, or an unwritable output. Per-record failures are
    /// logged, counted in the returned [`EnrichReport`], and skipped.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use frost_enrich::{Frost, FrostSettings, FrostEnrichError};
    /// # use std::path::Path;
    /// # async fn run() -> Result<(), FrostEnrichError> {
    /// let client = Frost::new(FrostSettings::new("my-client-id")).await;
    ///
    /// let report = client
    ///     .enrich_dataset()
    ///     .input(Path::new("reduced_dataset.csv"))
    ///     .output(Path::new("reduced_dataset_full.csv"))
    ///     .call()
    ///     .await?;
    /// println!("Enriched {} of {} records", report.enriched, report.records);
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub async fn enrich_dataset(
        &self,
        input: &Path,
        output: &Path,
    ) -> Result<EnrichReport, FrostEnrichError> {
        let mut df = crate::enrich::read_dataset(input)?;
        let report = self.enrich_frame(&mut df).await?;
        crate::enrich::write_dataset(&mut df, output)?;
        Ok(report)
    }

    /// Elements a station reports, memoized per station id for the run.
    /// Probe failures are returned but not memoized.
    pub(crate) async fn available_elements(
        &self,
        station: &str,
    ) -> Result<HashSet<Element>, ObservationError> {
        {
            let cache = self.element_cache.lock().await;
            if let Some(hit) = cache.get(station) {
                return Ok(hit.clone());
            }
        }

        let observed = probe::available_elements(&self.http, &self.settings, station).await?;

        let mut cache = self.element_cache.lock().await;
        match cache.entry(station.to_string()) {
            Entry::Occupied(entry) => Ok(entry.get().clone()),
            Entry::Vacant(entry) => {
                entry.insert(observed.clone());
                Ok(observed)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stations::locate_station::StationDirectory;

    fn station(id: &str, lat: f64, lon: f64) -> Station {
        Station {
            id: id.to_string(),
            latitude: lat,
            longitude: lon,
        }
    }

    fn client_with(stations: Vec<Station>) -> Frost {
        Frost::with_directory(
            FrostSettings::new("test-client"),
            StationDirectory::from_stations(stations),
        )
    }

    #[test]
    fn coordinate_key_rounds_to_four_decimals() {
        let a = CoordinateKey::from(LatLon(59.912341, 10.700001));
        let b = CoordinateKey::from(LatLon(59.912339, 10.700014));
        assert_eq!(a, b);

        let c = CoordinateKey::from(LatLon(59.91234, 10.70006));
        assert_ne!(a, c);
    }

    #[tokio::test]
    async fn identical_rounded_coordinates_share_candidates() {
        let client = client_with(vec![
            station("S1", 59.9, 10.7),
            station("S2", 59.95, 10.75),
        ]);

        let first = client
            .find_stations()
            .location(LatLon(59.912341, 10.712341))
            .call()
            .await;
        let second = client
            .find_stations()
            .location(LatLon(59.912339, 10.712339))
            .call()
            .await;
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }

    #[tokio::test]
    async fn nearby_station_is_found_within_radius() {
        let client = client_with(vec![station("S1", 59.9, 10.7)]);
        let candidates = client
            .find_stations()
            .location(LatLon(59.91, 10.71))
            .call()
            .await;
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].id, "S1");
    }

    #[tokio::test]
    async fn closest_station_comes_first() {
        let client = client_with(vec![
            station("FAR", 59.99, 10.70),
            station("NEAR", 59.905, 10.70),
        ]);
        let candidates = client
            .find_stations()
            .location(LatLon(59.90, 10.70))
            .call()
            .await;
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].id, "NEAR");
    }

    #[tokio::test]
    async fn distant_stations_yield_no_candidates() {
        let client = client_with(vec![station("S1", 59.9, 10.7)]);
        let candidates = client
            .find_stations()
            .location(LatLon(0.0, 0.0))
            .call()
            .await;
        assert!(candidates.is_empty());
    }

    #[tokio::test]
    async fn empty_element_set_fails_the_summary() {
        let client = client_with(vec![]);
        client
            .element_cache
            .lock()
            .await
            .insert("SN18700".to_string(), HashSet::new());

        let result = client
            .weather_summary()
            .station("SN18700")
            .date("15.06.2022")
            .call()
            .await;
        assert!(matches!(result, Err(ObservationError::NoElements(_))));
    }

    #[tokio::test]
    async fn unparseable_date_fails_before_any_probe() {
        let client = client_with(vec![]);
        let result = client
            .weather_summary()
            .station("SN18700")
            .date("2022-06-15")
            .call()
            .await;
        assert!(matches!(
            result,
            Err(ObservationError::UnparseableDate(_, _))
        ));
    }
}
