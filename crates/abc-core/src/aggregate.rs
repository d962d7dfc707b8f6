//! Quarterly sales aggregation.

use crate::{columns, period::with_period_columns};
use polars::prelude::*;

/// Sum sales per `(customer_id, year, quarter)`.
///
/// Expects a normalized transaction frame. Every output row carries
/// `through_date`, the latest `date` in the whole input, as the report's
/// as-of stamp. Output columns: `customer_id`, `year`, `quarter`,
/// `through_date`, the internal `__id_order` key, `sales`. Row order is
/// unspecified.
pub fn aggregate(transactions: LazyFrame) -> LazyFrame {
    with_period_columns(transactions)
        .with_column(col(columns::DATE).max().alias(columns::THROUGH_DATE))
        .group_by([
            col(columns::CUSTOMER_ID),
            col(columns::YEAR),
            col(columns::QUARTER),
            col(columns::THROUGH_DATE),
            col(columns::ID_ORDER),
        ])
        .agg([col(columns::SALES).sum()])
}
