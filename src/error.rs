use crate::observations::error::ObservationError;
use crate::stations::error::StationDirectoryError;
use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FrostEnrichError {
    #[error(transparent)]
    StationDirectory(#[from] StationDirectoryError),

    #[error(transparent)]
    Observation(#[from] ObservationError),

    #[error("Failed to read dataset '{0}'")]
    DatasetRead(PathBuf, #[source] PolarsError),

    #[error("Failed to write dataset '{0}'")]
    DatasetWrite(PathBuf, #[source] PolarsError),

    #[error("I/O error for dataset '{0}'")]
    DatasetIo(PathBuf, #[source] std::io::Error),

    #[error("Required column '{0}' not found in dataset")]
    ColumnNotFound(String, #[source] PolarsError),

    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),
}
