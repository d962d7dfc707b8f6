//! Reporting window completion.
//!
//! The reporting window is every quarter from the one holding the earliest
//! transaction to the one holding the latest, with no gaps. Window bounds use
//! the same calendar-quarter rule as per-record bucketing.

use crate::{
    columns,
    error::{AbcError, Result},
    period::Period,
};
use chrono::NaiveDate;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Closed, gap-free range of quarters, `first <= last`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawWindow")]
pub struct ReportingWindow {
    first: Period,
    last: Period,
}

#[derive(Deserialize)]
struct RawWindow {
    first: Period,
    last: Period,
}

impl TryFrom<RawWindow> for ReportingWindow {
    type Error = AbcError;

    fn try_from(raw: RawWindow) -> Result<Self> {
        Self::new(raw.first, raw.last)
    }
}

impl ReportingWindow {
    /// Window from `first` through `last` inclusive.
    pub fn new(first: Period, last: Period) -> Result<Self> {
        if first > last {
            return Err(AbcError::InvalidDateRange {
                start: first.to_string(),
                end: last.to_string(),
            });
        }
        Ok(Self { first, last })
    }

    /// Window spanning the quarters of `min_date` through `max_date`.
    pub fn from_dates(min_date: NaiveDate, max_date: NaiveDate) -> Result<Self> {
        if min_date > max_date {
            return Err(AbcError::InvalidDateRange {
                start: min_date.to_string(),
                end: max_date.to_string(),
            });
        }
        Ok(Self {
            first: Period::from_date(min_date),
            last: Period::from_date(max_date),
        })
    }

    /// First quarter of the window.
    pub const fn first(&self) -> Period {
        self.first
    }

    /// Last quarter of the window.
    pub const fn last(&self) -> Period {
        self.last
    }

    /// Every quarter in the window, ascending.
    pub fn periods(&self) -> Vec<Period> {
        let mut periods = Vec::with_capacity(self.len());
        let mut current = self.first;
        while current <= self.last {
            periods.push(current);
            current = current.next();
        }
        periods
    }

    /// Number of quarters in the window.
    pub fn len(&self) -> usize {
        let span = (i64::from(self.last.year()) - i64::from(self.first.year())) * 4
            + i64::from(self.last.quarter())
            - i64::from(self.first.quarter());
        usize::try_from(span + 1).unwrap_or(0)
    }

    /// Whether the window holds no quarters; never true for a constructed window.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `period` falls inside the window.
    pub fn contains(&self, period: Period) -> bool {
        self.first <= period && period <= self.last
    }

    /// The window as a two-column frame of `year` and `quarter` (both `Int32`).
    pub fn to_frame(&self) -> Result<DataFrame> {
        let periods = self.periods();
        let years: Vec<i32> = periods.iter().map(|p| p.year()).collect();
        let quarters: Vec<i32> = periods.iter().map(|p| i32::from(p.quarter())).collect();

        Ok(DataFrame::new(vec![
            Series::new(columns::YEAR.into(), years).into(),
            Series::new(columns::QUARTER.into(), quarters).into(),
        ])?)
    }
}

/// Every quarter from the one containing `min_date` to the one containing `max_date`.
pub fn enumerate_periods(min_date: NaiveDate, max_date: NaiveDate) -> Result<Vec<Period>> {
    Ok(ReportingWindow::from_dates(min_date, max_date)?.periods())
}

/// Left-join segmented rows onto the full window.
///
/// Quarters with no rows survive as a single row whose metric columns are
/// null. Output is ordered by `(year, quarter, rank)` with null ranks last and
/// restricted to the report columns.
pub fn complete_window(window: &ReportingWindow, segmented: LazyFrame) -> Result<LazyFrame> {
    let keys = [col(columns::YEAR), col(columns::QUARTER)];

    let completed = window
        .to_frame()?
        .lazy()
        .join(
            segmented,
            keys.clone(),
            keys,
            JoinArgs::new(JoinType::Left),
        )
        .sort(
            [columns::YEAR, columns::QUARTER, columns::RANK],
            SortMultipleOptions::default()
                .with_nulls_last(true)
                .with_maintain_order(true),
        )
        .select(columns::REPORT_COLUMNS.map(col));

    Ok(completed)
}
