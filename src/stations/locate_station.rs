use crate::settings::FrostSettings;
use crate::stations::error::StationDirectoryError;
use crate::types::station::{SourceMeta, SourcesResponse, Station};
use haversine::{distance, Location as HaversineLocation, Units};
use log::info;
use reqwest::Client;
use rstar::RTree;
use std::cmp::Ordering;

/// The full set of Frost stations for one run, indexed spatially.
///
/// Fetched once at client construction and never refreshed; proximity queries
/// run against the in-memory R-Tree only.
#[derive(Debug, Clone)]
pub struct StationDirectory {
    rtree: RTree<Station>,
}

impl StationDirectory {
    /// Fetches the station registry from the Frost sources endpoint.
    ///
    /// One request, no retries. Sources without a usable point geometry are
    /// dropped. Any transport, status, or parse failure surfaces as a
    /// [`StationDirectoryError`]; the caller decides whether to abort or to
    /// continue with an empty directory.
    pub async fn fetch(
        http: &Client,
        settings: &FrostSettings,
    ) -> Result<Self, StationDirectoryError> {
        let url = settings.sources_url();
        info!("Fetching station directory from {url}");

        let response = http
            .get(&url)
            .basic_auth(&settings.client_id, Some(""))
            .send()
            .await
            .map_err(|e| StationDirectoryError::NetworkRequest(url.clone(), e))?;
        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                return Err(if let Some(status) = e.status() {
                    StationDirectoryError::HttpStatus {
                        url,
                        status,
                        source: e,
                    }
                } else {
                    StationDirectoryError::NetworkRequest(url, e)
                });
            }
        };

        let body = response
            .bytes()
            .await
            .map_err(|e| StationDirectoryError::NetworkRequest(url.clone(), e))?;
        let parsed: SourcesResponse = serde_json::from_slice(&body)?;

        let stations: Vec<Station> = parsed
            .data
            .into_iter()
            .filter_map(SourceMeta::into_station)
            .collect();
        info!("Retrieved {} stations with usable coordinates", stations.len());

        Ok(Self::from_stations(stations))
    }

    /// Builds a directory from an already-known station list.
    pub fn from_stations(stations: Vec<Station>) -> Self {
        Self {
            rtree: RTree::bulk_load(stations),
        }
    }

    /// A directory with no stations; every query returns nothing.
    pub fn empty() -> Self {
        Self {
            rtree: RTree::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rtree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.rtree.size() == 0
    }

    /// Finds every station within `max_distance_km` of the query point,
    /// sorted ascending by great-circle distance.
    ///
    /// The R-Tree yields neighbors in degree-space order; iteration stops
    /// once the true distance exceeds twice the radius, a margin that covers
    /// the distortion between degree distance and kilometers.
    pub fn query(
        &self,
        latitude: f64,
        longitude: f64,
        max_distance_km: f64,
    ) -> Vec<(Station, f64)> {
        let query_point = [latitude, longitude];

        let mut stations_with_dist: Vec<(Station, f64)> = Vec::new();
        for station in self.rtree.nearest_neighbor_iter(&query_point) {
            let dist_km = distance_km(latitude, longitude, station.latitude, station.longitude);
            if dist_km > max_distance_km * 2.0 {
                break;
            }
            if dist_km <= max_distance_km {
                stations_with_dist.push((station.to_owned(), dist_km));
            }
        }

        stations_with_dist.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));
        stations_with_dist
    }
}

/// Great-circle distance between two points in kilometers (haversine,
/// Earth radius 6371 km).
pub(crate) fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    distance(
        HaversineLocation {
            latitude: lat1,
            longitude: lon1,
        },
        HaversineLocation {
            latitude: lat2,
            longitude: lon2,
        },
        Units::Kilometers,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(id: &str, lat: f64, lon: f64) -> Station {
        Station {
            id: id.to_string(),
            latitude: lat,
            longitude: lon,
        }
    }

    fn validate_results(results: &[(Station, f64)], max_distance_km: f64) {
        let mut last_dist = -1.0;
        for (i, (station, dist)) in results.iter().enumerate() {
            assert!(
                *dist <= max_distance_km + 1e-9,
                "Result {} ({}) distance {} > max {}",
                i,
                station.id,
                dist,
                max_distance_km
            );
            assert!(
                *dist >= last_dist - 1e-9,
                "Result {} ({}) distance {} < previous {}",
                i,
                station.id,
                dist,
                last_dist
            );
            last_dist = *dist;
        }
    }

    #[test]
    fn distance_is_symmetric_and_zero_on_self() {
        let (lat1, lon1) = (59.9423, 10.72);
        let (lat2, lon2) = (60.383, 5.3327);
        let ab = distance_km(lat1, lon1, lat2, lon2);
        let ba = distance_km(lat2, lon2, lat1, lon1);
        assert!((ab - ba).abs() < 1e-9);
        assert!(distance_km(lat1, lon1, lat1, lon1).abs() < 1e-9);
    }

    #[test]
    fn oslo_bergen_distance_is_plausible() {
        // Blindern to Florida, roughly 305 km apart.
        let d = distance_km(59.9423, 10.72, 60.383, 5.3327);
        assert!((300.0..320.0).contains(&d), "got {d}");
    }

    #[test]
    fn finds_station_close_to_record() {
        let directory = StationDirectory::from_stations(vec![station("S1", 59.9, 10.7)]);
        let results = directory.query(59.91, 10.71, 20.0);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].0.id, "S1");
        // About 1.3 km away, well inside the radius.
        assert!(results[0].1 < 2.0, "got {}", results[0].1);
    }

    #[test]
    fn results_are_sorted_ascending_by_distance() {
        let directory = StationDirectory::from_stations(vec![
            station("FAR", 59.99, 10.70),
            station("NEAR", 59.905, 10.70),
            station("MID", 59.95, 10.70),
        ]);
        let results = directory.query(59.90, 10.70, 20.0);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].0.id, "NEAR");
        assert_eq!(results[1].0.id, "MID");
        assert_eq!(results[2].0.id, "FAR");
        validate_results(&results, 20.0);
    }

    #[test]
    fn stations_outside_radius_are_excluded() {
        // Roughly 111 km north of the query point.
        let directory = StationDirectory::from_stations(vec![
            station("OUT", 1.0, 0.0),
            station("IN", 0.05, 0.0),
        ]);
        let results = directory.query(0.0, 0.0, 20.0);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].0.id, "IN");
        validate_results(&results, 20.0);
    }

    #[test]
    fn empty_directory_returns_nothing() {
        let directory = StationDirectory::empty();
        assert!(directory.is_empty());
        assert!(directory.query(59.9, 10.7, 20.0).is_empty());
    }

    #[test]
    fn all_distant_stations_yield_empty_candidates() {
        let directory = StationDirectory::from_stations(vec![
            station("A", 59.9, 10.7),
            station("B", 60.4, 5.3),
        ]);
        assert!(directory.query(0.0, 0.0, 20.0).is_empty());
    }
}
