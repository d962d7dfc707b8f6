//! Calendar quarters.
//!
//! A [`Period`] is a `(year, quarter)` pair. Dates are plain calendar dates;
//! no timezone is involved anywhere in bucketing.

use crate::{
    columns,
    error::{AbcError, Result},
};
use chrono::{Datelike, NaiveDate};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A calendar quarter.
///
/// Always holds a quarter in `1..=4`; deserialization goes through
/// [`Period::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPeriod")]
pub struct Period {
    year: i32,
    quarter: u8,
}

#[derive(Deserialize)]
struct RawPeriod {
    year: i32,
    quarter: i64,
}

impl TryFrom<RawPeriod> for Period {
    type Error = AbcError;

    fn try_from(raw: RawPeriod) -> Result<Self> {
        Self::new(raw.year, raw.quarter)
    }
}

impl Period {
    /// Create a period, validating the quarter.
    pub fn new(year: i32, quarter: i64) -> Result<Self> {
        match quarter {
            1..=4 => Ok(Self {
                year,
                quarter: quarter as u8,
            }),
            _ => Err(AbcError::InvalidQuarter(quarter)),
        }
    }

    /// Calendar year.
    pub const fn year(self) -> i32 {
        self.year
    }

    /// Quarter within the year, 1..=4.
    pub const fn quarter(self) -> u8 {
        self.quarter
    }

    /// The quarter containing `date`: months 1-3 are Q1, ..., 10-12 are Q4.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            quarter: (date.month0() / 3 + 1) as u8,
        }
    }

    /// The quarter immediately after this one.
    pub const fn next(self) -> Self {
        if self.quarter == 4 {
            Self {
                year: self.year.saturating_add(1),
                quarter: 1,
            }
        } else {
            Self {
                year: self.year,
                quarter: self.quarter + 1,
            }
        }
    }

    /// First calendar day of the quarter.
    pub fn first_day(self) -> Option<NaiveDate> {
        let month = u32::from(self.quarter).checked_mul(3)?.checked_sub(2)?;
        NaiveDate::from_ymd_opt(self.year, month, 1)
    }

    /// Last calendar day of the quarter.
    pub fn last_day(self) -> Option<NaiveDate> {
        self.next().first_day()?.pred_opt()
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-Q{}", self.year, self.quarter)
    }
}

/// Derive `year` and `quarter` columns from the `date` column.
///
/// Uses the same calendar-quarter rule as [`Period::from_date`]. Both columns
/// are `Int32`.
pub fn with_period_columns(frame: LazyFrame) -> LazyFrame {
    frame.with_columns([
        col(columns::DATE)
            .dt()
            .year()
            .cast(DataType::Int32)
            .alias(columns::YEAR),
        col(columns::DATE)
            .dt()
            .quarter()
            .cast(DataType::Int32)
            .alias(columns::QUARTER),
    ])
}

const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Convert a polars `Date` physical value (days since the Unix epoch).
pub fn date_from_epoch_days(days: i32) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(days.checked_add(UNIX_EPOCH_DAYS_FROM_CE)?)
}

/// Convert a date to its polars `Date` physical value.
pub fn epoch_days(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE
}

/// Earliest and latest `date` in a frame, or `None` when it has no dates.
pub fn date_bounds(frame: &DataFrame) -> Result<Option<(NaiveDate, NaiveDate)>> {
    let days = frame
        .column(columns::DATE)?
        .as_materialized_series()
        .cast(&DataType::Int32)?;
    let days = days.i32()?;

    let (Some(min), Some(max)) = (days.min(), days.max()) else {
        return Ok(None);
    };

    match (date_from_epoch_days(min), date_from_epoch_days(max)) {
        (Some(min), Some(max)) => Ok(Some((min, max))),
        _ => Err(AbcError::Schema(format!(
            "date column holds values outside the calendar range ({min}..{max} days)"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case(1, 1)]
    #[case(2, 1)]
    #[case(3, 1)]
    #[case(4, 2)]
    #[case(5, 2)]
    #[case(6, 2)]
    #[case(7, 3)]
    #[case(8, 3)]
    #[case(9, 3)]
    #[case(10, 4)]
    #[case(11, 4)]
    #[case(12, 4)]
    fn test_quarter_of_month(#[case] month: u32, #[case] quarter: u8) {
        assert_eq!(Period::from_date(date(2021, month, 15)).quarter(), quarter);
    }

    #[test]
    fn test_month_boundaries() {
        assert_eq!(Period::from_date(date(2020, 3, 31)), Period::new(2020, 1).unwrap());
        assert_eq!(Period::from_date(date(2020, 4, 1)), Period::new(2020, 2).unwrap());
        assert_eq!(Period::from_date(date(2020, 12, 31)), Period::new(2020, 4).unwrap());
        assert_eq!(Period::from_date(date(2021, 1, 1)), Period::new(2021, 1).unwrap());
    }

    #[test]
    fn test_invalid_quarter() {
        assert!(matches!(Period::new(2020, 0), Err(AbcError::InvalidQuarter(0))));
        assert!(matches!(Period::new(2020, 5), Err(AbcError::InvalidQuarter(5))));
    }

    #[rstest]
    #[case(r#"{"year":2020,"quarter":0}"#)]
    #[case(r#"{"year":2020,"quarter":5}"#)]
    #[case(r#"{"year":2020,"quarter":-1}"#)]
    fn test_deserialize_rejects_invalid_quarter(#[case] json: &str) {
        let err = serde_json::from_str::<Period>(json).unwrap_err();
        assert!(err.to_string().contains("quarter"));
    }

    #[test]
    fn test_serde_goes_through_validation() {
        let period: Period = serde_json::from_str(r#"{"year":2020,"quarter":3}"#).unwrap();
        assert_eq!(period, Period::new(2020, 3).unwrap());
        assert_eq!(period.first_day(), Some(date(2020, 7, 1)));
        assert_eq!(
            serde_json::to_string(&period).unwrap(),
            r#"{"year":2020,"quarter":3}"#
        );
    }

    #[test]
    fn test_next_rolls_over_year() {
        let q4 = Period::new(2019, 4).unwrap();
        assert_eq!(q4.next(), Period::new(2020, 1).unwrap());
        assert_eq!(Period::new(2020, 2).unwrap().next(), Period::new(2020, 3).unwrap());
    }

    #[test]
    fn test_first_and_last_day() {
        let q1 = Period::new(2024, 1).unwrap();
        assert_eq!(q1.first_day(), Some(date(2024, 1, 1)));
        assert_eq!(q1.last_day(), Some(date(2024, 3, 31)));

        let q4 = Period::new(2024, 4).unwrap();
        assert_eq!(q4.first_day(), Some(date(2024, 10, 1)));
        assert_eq!(q4.last_day(), Some(date(2024, 12, 31)));
    }

    #[test]
    fn test_display() {
        assert_eq!(Period::new(2018, 3).unwrap().to_string(), "2018-Q3");
    }

    #[test]
    fn test_epoch_day_conversion() {
        assert_eq!(epoch_days(date(1970, 1, 1)), 0);
        assert_eq!(date_from_epoch_days(0), Some(date(1970, 1, 1)));
        let d = date(2020, 2, 29);
        assert_eq!(date_from_epoch_days(epoch_days(d)), Some(d));
    }

    #[test]
    fn test_columnar_bucketing_matches_period_from_date() {
        let dates: Vec<NaiveDate> = (1..=12)
            .flat_map(|m| [date(2020, m, 1), date(2020, m, 28)])
            .collect();
        let days: Vec<i32> = dates.iter().copied().map(epoch_days).collect();
        let df = DataFrame::new(vec![
            Series::new(columns::DATE.into(), days)
                .cast(&DataType::Date)
                .unwrap()
                .into(),
        ])
        .unwrap();

        let out = with_period_columns(df.lazy()).collect().unwrap();
        let years = out
            .column(columns::YEAR)
            .unwrap()
            .as_materialized_series()
            .i32()
            .unwrap()
            .clone();
        let quarters = out
            .column(columns::QUARTER)
            .unwrap()
            .as_materialized_series()
            .i32()
            .unwrap()
            .clone();

        for (i, d) in dates.iter().enumerate() {
            let expected = Period::from_date(*d);
            assert_eq!(years.get(i), Some(expected.year()));
            assert_eq!(quarters.get(i), Some(i32::from(expected.quarter())));
        }
    }

    #[test]
    fn test_date_bounds() {
        let days = vec![epoch_days(date(2019, 5, 2)), epoch_days(date(2017, 1, 9))];
        let df = DataFrame::new(vec![
            Series::new(columns::DATE.into(), days)
                .cast(&DataType::Date)
                .unwrap()
                .into(),
        ])
        .unwrap();
        assert_eq!(
            date_bounds(&df).unwrap(),
            Some((date(2017, 1, 9), date(2019, 5, 2)))
        );

        let empty = df.head(Some(0));
        assert_eq!(date_bounds(&empty).unwrap(), None);
    }
}
