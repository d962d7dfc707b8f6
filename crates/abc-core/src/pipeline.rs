//! End-to-end report construction.

use crate::{
    aggregate::aggregate,
    config::ReportConfig,
    error::{AbcError, Result},
    exclusion::{ExclusionList, filter_excluded},
    normalize::normalize_transactions,
    period::date_bounds,
    rank::rank,
    segment::assign_segments,
    source::DataSource,
    window::{ReportingWindow, complete_window},
};
use chrono::NaiveDate;
use polars::prelude::*;
use tracing::{debug, info};

/// The result of one report run.
#[derive(Debug, Clone)]
pub struct SegmentedReport {
    frame: DataFrame,
    window: ReportingWindow,
    through_date: NaiveDate,
    input_rows: usize,
}

impl SegmentedReport {
    /// Report rows, ordered by `(year, quarter, rank)`.
    pub const fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// Take ownership of the report rows.
    pub fn into_frame(self) -> DataFrame {
        self.frame
    }

    /// Quarters covered by the report.
    pub const fn window(&self) -> &ReportingWindow {
        &self.window
    }

    /// Latest transaction date in the batch.
    pub const fn through_date(&self) -> NaiveDate {
        self.through_date
    }

    /// Number of transactions that survived validation and exclusion.
    pub const fn input_rows(&self) -> usize {
        self.input_rows
    }
}

/// Build the segmented report from a raw transaction frame.
pub fn build_report(
    transactions: DataFrame,
    exclusions: &ExclusionList,
    config: &ReportConfig,
) -> Result<SegmentedReport> {
    let transactions = normalize_transactions(transactions, config.malformed_policy)?;
    let transactions = filter_excluded(transactions, exclusions)?;

    let Some((min_date, max_date)) = date_bounds(&transactions)? else {
        return Err(AbcError::EmptyWindow);
    };
    let window = ReportingWindow::from_dates(min_date, max_date)?;
    let input_rows = transactions.height();
    debug!(
        rows = input_rows,
        first = %window.first(),
        last = %window.last(),
        "reporting window resolved"
    );

    let segmented = assign_segments(rank(aggregate(transactions.lazy())));
    let frame = complete_window(&window, segmented)?.collect()?;

    info!(
        report_rows = frame.height(),
        quarters = window.len(),
        through = %max_date,
        "segmentation report built"
    );

    Ok(SegmentedReport {
        frame,
        window,
        through_date: max_date,
        input_rows,
    })
}

/// Load transactions from `source` and build the segmented report.
pub fn run_report<S: DataSource + ?Sized>(
    source: &mut S,
    exclusions: &ExclusionList,
    config: &ReportConfig,
) -> Result<SegmentedReport> {
    info!(source = %source.describe(), excluded = exclusions.len(), "loading transactions");
    let transactions = source.load_transactions()?;
    build_report(transactions, exclusions, config)
}
