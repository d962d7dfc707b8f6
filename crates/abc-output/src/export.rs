//! Serialization of report rows and summaries.
//!
//! Everything here renders to a `String`; where the text ends up (file,
//! table, dashboard feed) is up to the caller.

use crate::{error::Result, row::ReportRow, summary::PeriodSummary};
use serde::{Deserialize, Serialize};

/// Export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values format.
    Csv,

    /// Compact JSON format.
    Json,

    /// Pretty-printed JSON format.
    PrettyJson,
}

impl ExportFormat {
    /// Get the file extension for this format.
    pub const fn extension(&self) -> &str {
        match self {
            Self::Csv => "csv",
            Self::Json | Self::PrettyJson => "json",
        }
    }
}

/// Flattened summary line for CSV export.
#[derive(Debug, Serialize, Deserialize)]
struct SegmentSummaryFlat {
    year: i32,
    quarter: u8,
    segment: String,
    customers: usize,
    sales: f64,
    share: f64,
}

impl PeriodSummary {
    fn to_flat_records(&self) -> Vec<SegmentSummaryFlat> {
        self.segments
            .iter()
            .map(|s| SegmentSummaryFlat {
                year: self.period.year(),
                quarter: self.period.quarter(),
                segment: s.segment.label().to_string(),
                customers: s.customers,
                sales: s.sales,
                share: s.share,
            })
            .collect()
    }
}

fn to_csv<T: Serialize>(records: impl IntoIterator<Item = T>) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    for record in records {
        wtr.serialize(record)?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}

/// Trait for exporting data in various formats.
pub trait Exporter {
    /// Export data to a string in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn export_to_string(&self, format: ExportFormat) -> Result<String>;
}

impl Exporter for Vec<ReportRow> {
    fn export_to_string(&self, format: ExportFormat) -> Result<String> {
        match format {
            ExportFormat::Csv => to_csv(self),
            ExportFormat::Json => Ok(serde_json::to_string(self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}

impl Exporter for Vec<PeriodSummary> {
    fn export_to_string(&self, format: ExportFormat) -> Result<String> {
        match format {
            ExportFormat::Csv => to_csv(self.iter().flat_map(PeriodSummary::to_flat_records)),
            ExportFormat::Json => Ok(serde_json::to_string(self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}
