mod enrich;
mod error;
mod frost;
mod observations;
mod settings;
mod stations;
mod types;

pub use error::FrostEnrichError;
pub use frost::*;

pub use enrich::EnrichReport;
pub use settings::FrostSettings;

pub use types::element::Element;
pub use types::station::Station;
pub use types::summary::WeatherSummary;

pub use observations::error::ObservationError;
pub use stations::error::StationDirectoryError;
pub use stations::locate_station::StationDirectory;
