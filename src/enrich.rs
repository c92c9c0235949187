//! The batch driver: reads the input table, enriches each record with the
//! seven weather summary fields, and writes the result.

use crate::error::FrostEnrichError;
use crate::frost::{Frost, LatLon};
use crate::types::summary::WeatherSummary;
use log::{info, warn};
use polars::prelude::*;
use std::path::Path;

// Input column names.
const COL_LAT: &str = "lat";
const COL_LON: &str = "long";
const COL_DATE: &str = "date";

/// Counters for one enrichment run. Skipped records keep null fields in the
/// output; nothing aborts the run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrichReport {
    /// Records seen in the input.
    pub records: usize,
    /// Records that received all seven summary fields.
    pub enriched: usize,
    /// Records with a missing or unreadable coordinate or date.
    pub skipped_missing_fields: usize,
    /// Records with no station within the search radius.
    pub skipped_no_station: usize,
    /// Records whose nearest station produced no usable weather data.
    pub skipped_no_data: usize,
}

/// Reads the input CSV with a header row and inferred schema.
pub(crate) fn read_dataset(path: &Path) -> Result<DataFrame, FrostEnrichError> {
    CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| FrostEnrichError::DatasetRead(path.to_path_buf(), e))?
        .finish()
        .map_err(|e| FrostEnrichError::DatasetRead(path.to_path_buf(), e))
}

/// Writes the enriched table as CSV with a header row.
pub(crate) fn write_dataset(df: &mut DataFrame, path: &Path) -> Result<(), FrostEnrichError> {
    let mut file = std::fs::File::create(path)
        .map_err(|e| FrostEnrichError::DatasetIo(path.to_path_buf(), e))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(df)
        .map_err(|e| FrostEnrichError::DatasetWrite(path.to_path_buf(), e))?;
    info!("Wrote enriched dataset to {}", path.display());
    Ok(())
}

/// Retrieves a column by name from a DataFrame.
fn get_column<'a>(df: &'a DataFrame, col: &str) -> Result<&'a Column, FrostEnrichError> {
    df.column(col)
        .map_err(|e| FrostEnrichError::ColumnNotFound(col.to_string(), e))
}

/// Extracts an optional float value from a specific row of a Column.
fn get_opt_float(column: &Column, idx: usize) -> Option<f64> {
    column.f64().ok().and_then(|ca| ca.get(idx))
}

/// Extracts an optional string value from a specific row of a Column.
fn get_opt_str(column: &Column, idx: usize) -> Option<String> {
    column
        .str()
        .ok()
        .and_then(|ca| ca.get(idx))
        .map(|s| s.to_string())
}

/// The seven output columns, accumulated row by row.
struct SummaryColumns {
    values: [Vec<Option<f64>>; 7],
}

impl SummaryColumns {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            values: std::array::from_fn(|_| Vec::with_capacity(capacity)),
        }
    }

    fn push(&mut self, summary: &WeatherSummary) {
        for (bucket, value) in self.values.iter_mut().zip(summary.values()) {
            bucket.push(value);
        }
    }

    fn push_empty(&mut self) {
        for bucket in self.values.iter_mut() {
            bucket.push(None);
        }
    }

    fn append_to(self, df: &mut DataFrame) -> Result<(), FrostEnrichError> {
        for (name, values) in WeatherSummary::FIELDS.into_iter().zip(self.values) {
            df.with_column(Column::new(name.into(), values))?;
        }
        Ok(())
    }
}

impl Frost {
    /// Enriches every record of an in-memory table in place.
    ///
    /// Station candidates are resolved through the coordinate-keyed cache,
    /// the first (nearest) candidate is queried for a weather summary, and
    /// the seven summary columns are appended after the loop. Records that
    /// cannot be enriched are logged and keep null fields.
    pub(crate) async fn enrich_frame(
        &self,
        df: &mut DataFrame,
    ) -> Result<EnrichReport, FrostEnrichError> {
        let height = df.height();

        let lat_col = get_column(df, COL_LAT)?;
        let lon_col = get_column(df, COL_LON)?;
        let date_col = get_column(df, COL_DATE)?;
        let lats: Vec<Option<f64>> = (0..height).map(|i| get_opt_float(lat_col, i)).collect();
        let lons: Vec<Option<f64>> = (0..height).map(|i| get_opt_float(lon_col, i)).collect();
        let dates: Vec<Option<String>> = (0..height).map(|i| get_opt_str(date_col, i)).collect();

        let mut report = EnrichReport {
            records: height,
            ..EnrichReport::default()
        };
        let mut columns = SummaryColumns::with_capacity(height);

        for idx in 0..height {
            let (Some(lat), Some(lon), Some(date)) = (lats[idx], lons[idx], dates[idx].as_deref())
            else {
                warn!("Record {idx} is missing coordinates or date, skipping");
                report.skipped_missing_fields += 1;
                columns.push_empty();
                continue;
            };

            let candidates = self.find_stations().location(LatLon(lat, lon)).call().await;
            let Some(nearest) = candidates.first() else {
                info!("No stations found near ({lat}, {lon}), skipping record {idx}");
                report.skipped_no_station += 1;
                columns.push_empty();
                continue;
            };

            match self
                .weather_summary()
                .station(&nearest.id)
                .date(date)
                .call()
                .await
            {
                Ok(summary) => {
                    info!("Record {idx} enriched from station {}: {summary}", nearest.id);
                    report.enriched += 1;
                    columns.push(&summary);
                }
                Err(e) => {
                    warn!(
                        "No valid weather data for record {idx} (station {}): {e}",
                        nearest.id
                    );
                    report.skipped_no_data += 1;
                    columns.push_empty();
                }
            }
        }

        columns.append_to(df)?;
        info!(
            "Enriched {} of {} records ({} without station, {} without data, {} unreadable)",
            report.enriched,
            report.records,
            report.skipped_no_station,
            report.skipped_no_data,
            report.skipped_missing_fields
        );
        Ok(report)
    }
}
