use std::fmt;

/// Per-record weather summary produced by the observation aggregator.
///
/// Each field is the arithmetic mean of the observations that contributed to
/// it, or `None` if no observation of that kind existed in the window. The
/// three temperature means cover distinct trailing windows ending at the
/// record date.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WeatherSummary {
    /// Mean air temperature over the trailing 3 months.
    pub mean_temp_3m: Option<f64>,
    /// Mean air temperature over the trailing year.
    pub mean_temp_1y: Option<f64>,
    /// Mean air temperature over the trailing 5 years.
    pub mean_temp_5y: Option<f64>,
    /// Mean of the daily minimum temperatures over the full window.
    pub min_temp: Option<f64>,
    /// Mean of the daily maximum temperatures over the full window.
    pub max_temp: Option<f64>,
    /// Mean daily relative humidity over the full window.
    pub humidity: Option<f64>,
    /// Mean soil water fraction (10 cm depth) over the full window.
    pub soil_humidity: Option<f64>,
}

impl WeatherSummary {
    /// Output column names, in the order they are appended to the dataset.
    pub const FIELDS: [&'static str; 7] = [
        "mean_temp_3m",
        "mean_temp_1y",
        "mean_temp_5y",
        "min_temp",
        "max_temp",
        "humidity",
        "soil_humidity",
    ];

    /// Field values in [`WeatherSummary::FIELDS`] order.
    pub fn values(&self) -> [Option<f64>; 7] {
        [
            self.mean_temp_3m,
            self.mean_temp_1y,
            self.mean_temp_5y,
            self.min_temp,
            self.max_temp,
            self.humidity,
            self.soil_humidity,
        ]
    }
}

impl fmt::Display for WeatherSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (name, value) in Self::FIELDS.iter().zip(self.values()) {
            if !first {
                write!(f, ", ")?;
            }
            match value {
                Some(v) => write!(f, "{name}={v:.2}")?,
                None => write!(f, "{name}=-")?,
            }
            first = false;
        }
        Ok(())
    }
}
