//! Error types for the segmentation pipeline.

use thiserror::Error;

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, AbcError>;

/// Errors that can occur while building a segmentation report.
#[derive(Debug, Error)]
pub enum AbcError {
    /// Polars error
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    /// Input frame does not have the expected shape
    #[error("Schema error: {0}")]
    Schema(String),

    /// Input rows that cannot be used and the batch policy forbids dropping
    #[error("Malformed input: {rows} row(s) {reason}")]
    MalformedInput {
        /// Number of offending rows
        rows: usize,
        /// What was wrong with them
        reason: String,
    },

    /// No transactions left to define a reporting window
    #[error("Empty reporting window: no transactions remain after filtering")]
    EmptyWindow,

    /// Invalid date range
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start date of the range
        start: String,
        /// End date of the range
        end: String,
    },

    /// Quarter outside 1..=4
    #[error("Invalid quarter: {0}")]
    InvalidQuarter(i64),

    /// Segment label that is not one of `No Purchases`, `A`, `B`, `C`
    #[error("Unknown segment label: {0}")]
    UnknownSegment(String),

    /// Data source failed to deliver transactions
    #[error("Data source error: {0}")]
    Source(String),
}
