//! Error types for report output.

use thiserror::Error;

/// Result type for output operations.
pub type Result<T> = std::result::Result<T, OutputError>;

/// Errors that can occur while decoding or rendering a report.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Pipeline error
    #[error(transparent)]
    Core(#[from] abc_core::AbcError),

    /// Polars error
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    /// Report frame does not match the expected layout
    #[error("Cannot decode report row {row}: {reason}")]
    Decode {
        /// Row index in the report frame
        row: usize,
        /// What could not be decoded
        reason: String,
    },

    /// CSV serialization error
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Serialized CSV was not valid UTF-8
    #[error("Invalid UTF-8 in CSV output: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
