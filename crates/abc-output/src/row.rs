//! Typed report rows.

use crate::error::{OutputError, Result};
use abc_core::{Period, Segment, columns, period::date_from_epoch_days};
use chrono::NaiveDate;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// One line of the segmentation report.
///
/// Quarters without any sales keep a row with every metric absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    /// Customer identifier.
    pub customer_id: Option<String>,
    /// Calendar year.
    pub year: i32,
    /// Calendar quarter.
    pub quarter: u8,
    /// Latest transaction date in the batch.
    pub through_date: Option<NaiveDate>,
    /// Customer sales in the quarter.
    pub sales: Option<f64>,
    /// Running sales in rank order.
    pub cumulative_sales: Option<f64>,
    /// Cumulative share of quarterly sales.
    pub running_pct: Option<f64>,
    /// Position within the quarter, 1 = largest.
    pub rank: Option<u32>,
    /// ABC segment.
    pub segment: Option<Segment>,
}

fn series<'a>(frame: &'a DataFrame, name: &str) -> Result<&'a Series> {
    Ok(frame.column(name)?.as_materialized_series())
}

impl ReportRow {
    /// Period of the row.
    pub fn period(&self) -> Result<Period> {
        Ok(Period::new(self.year, i64::from(self.quarter))?)
    }

    /// Whether this row stands for a quarter without data.
    pub const fn is_empty_period(&self) -> bool {
        self.customer_id.is_none()
    }

    /// Decode every row of a report frame.
    pub fn from_frame(frame: &DataFrame) -> Result<Vec<Self>> {
        let ids = series(frame, columns::CUSTOMER_ID)?.str()?;
        let years = series(frame, columns::YEAR)?.i32()?;
        let quarters = series(frame, columns::QUARTER)?.i32()?;
        let through = series(frame, columns::THROUGH_DATE)?.cast(&DataType::Int32)?;
        let through = through.i32()?;
        let sales = series(frame, columns::SALES)?.f64()?;
        let cumulative = series(frame, columns::CUMULATIVE_SALES)?.f64()?;
        let pct = series(frame, columns::RUNNING_PCT)?.f64()?;
        let ranks = series(frame, columns::RANK)?.u32()?;
        let segments = series(frame, columns::SEGMENT)?.str()?;

        (0..frame.height())
            .map(|row| -> Result<Self> {
                let decode_err = |reason: String| OutputError::Decode { row, reason };

                let year = years
                    .get(row)
                    .ok_or_else(|| decode_err("missing year".to_string()))?;
                let quarter = quarters
                    .get(row)
                    .ok_or_else(|| decode_err("missing quarter".to_string()))?;
                let quarter = Period::new(year, i64::from(quarter))?.quarter();

                let through_date = match through.get(row) {
                    Some(days) => Some(
                        date_from_epoch_days(days)
                            .ok_or_else(|| decode_err(format!("date out of range: {days}")))?,
                    ),
                    None => None,
                };

                let segment = segments
                    .get(row)
                    .map(str::parse::<Segment>)
                    .transpose()?;

                Ok(Self {
                    customer_id: ids.get(row).map(str::to_string),
                    year,
                    quarter,
                    through_date,
                    sales: sales.get(row),
                    cumulative_sales: cumulative.get(row),
                    running_pct: pct.get(row),
                    rank: ranks.get(row),
                    segment,
                })
            })
            .collect()
    }
}
