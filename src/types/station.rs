//! Defines the data structure representing a Frost weather station, the wire
//! format it is parsed from, and the implementations necessary for spatial
//! indexing using the `rstar` crate.

use rstar::{PointDistance, RTreeObject, AABB};
use serde::Deserialize;

/// A single weather station from the Frost source registry.
///
/// Only the fields the enrichment pipeline needs are kept: the station
/// identifier (e.g. "SN18700") and its position in decimal degrees. A station
/// is immutable once fetched and lives for the duration of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    /// The unique Frost source identifier (e.g. "SN18700").
    pub id: String,
    /// Latitude in decimal degrees (positive for North, negative for South).
    pub latitude: f64,
    /// Longitude in decimal degrees (positive for East, negative for West).
    pub longitude: f64,
}

// --- Wire format ---

/// Top-level payload of the `/sources/v0.jsonld` endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct SourcesResponse {
    #[serde(default)]
    pub data: Vec<SourceMeta>,
}

/// One source entry. Sources without a point geometry (ships, regions) are
/// dropped during conversion.
#[derive(Debug, Deserialize)]
pub(crate) struct SourceMeta {
    pub id: String,
    pub geometry: Option<PointGeometry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PointGeometry {
    /// Frost stores coordinates as `[longitude, latitude]`.
    pub coordinates: Vec<f64>,
}

impl SourceMeta {
    pub(crate) fn into_station(self) -> Option<Station> {
        let geometry = self.geometry?;
        let &[longitude, latitude] = geometry.coordinates.as_slice() else {
            return None;
        };
        Some(Station {
            id: self.id,
            latitude,
            longitude,
        })
    }
}

// --- R-Tree Implementations ---

/// Implementation required by `rstar` to treat a `Station` as an object
/// within an R-Tree, so stations can be searched spatially.
impl RTreeObject for Station {
    type Envelope = AABB<[f64; 2]>;

    /// A station is a point, so its envelope is the degenerate AABB
    /// containing only (latitude, longitude).
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.latitude, self.longitude])
    }
}

/// Squared Euclidean distance in degree space. An approximation the R-Tree
/// uses for neighbor ordering; true great-circle distances are computed with
/// the haversine formula afterwards.
impl PointDistance for Station {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.latitude - point[0];
        let dy = self.longitude - point[1];
        dx * dx + dy * dy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sources_payload() {
        let payload = r#"{
            "data": [
                {"id": "SN18700", "geometry": {"coordinates": [10.72, 59.9423]}},
                {"id": "SN99999"},
                {"id": "SN50540", "geometry": {"coordinates": [5.3327, 60.383]}}
            ]
        }"#;
        let parsed: SourcesResponse = serde_json::from_str(payload).unwrap();
        let stations: Vec<Station> = parsed
            .data
            .into_iter()
            .filter_map(SourceMeta::into_station)
            .collect();

        assert_eq!(stations.len(), 2);
        assert_eq!(stations[0].id, "SN18700");
        assert_eq!(stations[0].latitude, 59.9423);
        assert_eq!(stations[0].longitude, 10.72);
        assert_eq!(stations[1].id, "SN50540");
    }

    #[test]
    fn missing_data_key_parses_as_empty() {
        let parsed: SourcesResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.data.is_empty());
    }

    #[test]
    fn malformed_coordinates_are_dropped() {
        let meta = SourceMeta {
            id: "SN1".to_string(),
            geometry: Some(PointGeometry {
                coordinates: vec![10.0],
            }),
        };
        assert!(meta.into_station().is_none());
    }
}
