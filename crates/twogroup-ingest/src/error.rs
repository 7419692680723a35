//! Error types for loading study data and configuration.

use std::path::PathBuf;

use thiserror::Error;
use twogroup_model::ConfigError;

/// Errors that can occur while loading inputs.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV.
    #[error("failed to parse CSV {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// CSV file has no header row.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    /// Two columns share a header after whitespace normalization.
    #[error("duplicate column header \"{name}\" in {path}")]
    DuplicateHeader { path: PathBuf, name: String },

    /// Malformed TOML configuration.
    #[error("failed to parse TOML configuration {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The configuration is inconsistent with itself or the data.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
