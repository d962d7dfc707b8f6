//! ABC segment classification.
//!
//! The decision table, evaluated top to bottom:
//!
//! | condition                      | segment        |
//! |--------------------------------|----------------|
//! | `sales == 0`                   | `No Purchases` |
//! | `running_pct < 0.50`           | `A`            |
//! | `0.50 <= running_pct < 0.75`   | `B`            |
//! | `running_pct >= 0.75`          | `C`            |
//!
//! The `sales` test comes first, so a quarter with zero total sales (whose
//! share is undefined) never reaches the share comparisons.

use crate::{columns, error::AbcError};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Upper bound (exclusive) of the cumulative share for segment `A`.
pub const A_UPPER_BOUND: f64 = 0.50;

/// Upper bound (exclusive) of the cumulative share for segment `B`.
pub const B_UPPER_BOUND: f64 = 0.75;

/// Customer segment within a quarter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Segment {
    /// No sales in the quarter
    #[serde(rename = "No Purchases")]
    NoPurchases,
    /// Customers making up the first half of quarterly sales
    A,
    /// Customers making up the next quarter of sales
    B,
    /// The long tail
    C,
}

impl Segment {
    /// All segments in report order.
    pub const ALL: [Self; 4] = [Self::A, Self::B, Self::C, Self::NoPurchases];

    /// Report label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::NoPurchases => "No Purchases",
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Segment {
    type Err = AbcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|segment| segment.label() == s)
            .ok_or_else(|| AbcError::UnknownSegment(s.to_string()))
    }
}

/// The two values a segment depends on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentInput {
    /// Customer sales in the quarter.
    pub sales: f64,
    /// Cumulative share of quarterly sales; `None` when the quarter total is zero.
    pub running_pct: Option<f64>,
}

/// Classify one ranked row.
pub fn classify(input: SegmentInput) -> Segment {
    if input.sales == 0.0 {
        return Segment::NoPurchases;
    }
    match input.running_pct {
        Some(pct) if pct < A_UPPER_BOUND => Segment::A,
        Some(pct) if pct < B_UPPER_BOUND => Segment::B,
        _ => Segment::C,
    }
}

/// Columnar form of [`classify`], producing the `segment` column.
pub fn segment_expr() -> Expr {
    when(col(columns::SALES).eq(lit(0.0)))
        .then(lit(Segment::NoPurchases.label()))
        .when(col(columns::RUNNING_PCT).lt(lit(A_UPPER_BOUND)))
        .then(lit(Segment::A.label()))
        .when(col(columns::RUNNING_PCT).lt(lit(B_UPPER_BOUND)))
        .then(lit(Segment::B.label()))
        .otherwise(lit(Segment::C.label()))
        .alias(columns::SEGMENT)
}

/// Add the `segment` column to a ranked frame.
pub fn assign_segments(ranked: LazyFrame) -> LazyFrame {
    ranked.with_column(segment_expr())
}
