//! Per-quarter ranking and running sales share.

use crate::columns;
use polars::prelude::*;

const PERIOD_TOTAL: &str = "__period_total";

/// Rank customers within each quarter and accumulate their sales.
///
/// Within a `(year, quarter)` group rows are ordered by descending `sales`,
/// ties broken by ascending `customer_id` (numerically for integer-sourced
/// ids). Adds:
/// - `rank`: 1-based position (`UInt32`), a permutation of `1..=N`
/// - `cumulative_sales`: running sum of `sales` in rank order
/// - `running_pct`: `cumulative_sales` over the quarter's total sales, or
///   null when that total is zero
///
/// The output is sorted by `(year, quarter, rank)`.
pub fn rank(aggregates: LazyFrame) -> LazyFrame {
    let period = [col(columns::YEAR), col(columns::QUARTER)];

    aggregates
        .sort(
            [
                columns::YEAR,
                columns::QUARTER,
                columns::SALES,
                columns::ID_ORDER,
                columns::CUSTOMER_ID,
            ],
            SortMultipleOptions::default()
                .with_order_descending_multi([false, false, true, false, false])
                .with_nulls_last(true)
                .with_maintain_order(true),
        )
        .with_columns([
            col(columns::SALES)
                .cum_count(false)
                .over(period.clone())
                .cast(DataType::UInt32)
                .alias(columns::RANK),
            col(columns::SALES)
                .cum_sum(false)
                .over(period.clone())
                .alias(columns::CUMULATIVE_SALES),
            col(columns::SALES)
                .sum()
                .over(period)
                .alias(PERIOD_TOTAL),
        ])
        // A zero-total quarter has no meaningful share; leave it null instead of NaN.
        .with_column(
            when(col(PERIOD_TOTAL).gt(lit(0.0)))
                .then(col(columns::CUMULATIVE_SALES) / col(PERIOD_TOTAL))
                .otherwise(lit(NULL))
                .alias(columns::RUNNING_PCT),
        )
        .select([
            col(columns::CUSTOMER_ID),
            col(columns::YEAR),
            col(columns::QUARTER),
            col(columns::THROUGH_DATE),
            col(columns::SALES),
            col(columns::CUMULATIVE_SALES),
            col(columns::RUNNING_PCT),
            col(columns::RANK),
        ])
}
