use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to create output directory '{0}'")]
    OutputDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to build DataFrame for '{0}'")]
    DataFrameBuild(PathBuf, #[source] PolarsError),

    #[error("I/O error writing CSV file '{0}'")]
    CsvWriteIo(PathBuf, #[source] std::io::Error),

    #[error("Encoding error writing CSV file '{0}'")]
    CsvWritePolars(PathBuf, #[source] PolarsError),

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}
