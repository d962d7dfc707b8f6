//! Report documents.

use crate::{
    error::Result,
    row::ReportRow,
    summary::{PeriodSummary, summaries_to_ascii_table, summarize},
};
use abc_core::{Period, SegmentedReport};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A finished segmentation report ready for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Report generation timestamp.
    pub generated_at: DateTime<Utc>,

    /// Latest transaction date covered.
    pub through_date: NaiveDate,

    /// First quarter of the reporting window.
    pub first_period: Period,

    /// Last quarter of the reporting window.
    pub last_period: Period,

    /// Customer-level rows.
    pub rows: Vec<ReportRow>,

    /// Per-quarter segment summaries.
    pub summaries: Vec<PeriodSummary>,
}

impl Report {
    /// Decode and summarize a pipeline result.
    pub fn from_segmented(report: &SegmentedReport) -> Result<Self> {
        let rows = ReportRow::from_frame(report.frame())?;
        let summaries = summarize(&rows)?;

        Ok(Self {
            generated_at: Utc::now(),
            through_date: report.through_date(),
            first_period: report.window().first(),
            last_period: report.window().last(),
            rows,
            summaries,
        })
    }

    /// Convert report to JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Format as ASCII table for terminal display.
    pub fn to_ascii_table(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "\nABC Segmentation: {} to {} (through {})\n",
            self.first_period, self.last_period, self.through_date
        ));
        output.push_str(&"=".repeat(89));
        output.push('\n');

        output.push_str(&format!(
            "{:<10} {:<14} {:>5} {:>14} {:>14} {:>9} {:>14}\n",
            "Quarter", "Customer", "Rank", "Sales", "Cumulative", "Running", "Segment"
        ));
        output.push_str(&"-".repeat(89));
        output.push('\n');

        for row in &self.rows {
            let period = format!("{}-Q{}", row.year, row.quarter);
            if row.is_empty_period() {
                output.push_str(&format!("{period:<10} {:<14}\n", "(no sales)"));
                continue;
            }
            output.push_str(&format!(
                "{:<10} {:<14} {:>5} {:>14.2} {:>14.2} {:>8.2}% {:>14}\n",
                period,
                row.customer_id.as_deref().unwrap_or_default(),
                row.rank.map_or_else(String::new, |r| r.to_string()),
                row.sales.unwrap_or_default(),
                row.cumulative_sales.unwrap_or_default(),
                row.running_pct.unwrap_or_default() * 100.0,
                row.segment.map_or("", |s| s.label()),
            ));
        }

        output.push_str(&"=".repeat(89));
        output.push('\n');
        output.push_str(&summaries_to_ascii_table(&self.summaries));

        output
    }

    /// Format as Markdown for documentation.
    pub fn to_markdown(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "# ABC Segmentation: {} to {}\n\n",
            self.first_period, self.last_period
        ));
        output.push_str(&format!("**Through:** {}\n\n", self.through_date));

        output.push_str("## Summary\n\n");
        output.push_str("| Quarter | Customers | Sales | A | B | C | No Purchases |\n");
        output.push_str("|---------|-----------|-------|---|---|---|--------------|\n");
        for summary in &self.summaries {
            output.push_str(&format!(
                "| {} | {} | {:.2} |",
                summary.period, summary.customers, summary.total_sales
            ));
            for breakdown in &summary.segments {
                output.push_str(&format!(" {} |", breakdown.customers));
            }
            output.push('\n');
        }
        output.push('\n');

        output.push_str("## Customers\n\n");
        output.push_str("| Quarter | Customer | Rank | Sales | Running % | Segment |\n");
        output.push_str("|---------|----------|------|-------|-----------|---------|\n");
        for row in self.rows.iter().filter(|r| !r.is_empty_period()) {
            output.push_str(&format!(
                "| {}-Q{} | {} | {} | {:.2} | {:.2}% | {} |\n",
                row.year,
                row.quarter,
                row.customer_id.as_deref().unwrap_or_default(),
                row.rank.unwrap_or_default(),
                row.sales.unwrap_or_default(),
                row.running_pct.unwrap_or_default() * 100.0,
                row.segment.map_or("", |s| s.label()),
            ));
        }

        output
    }
}
