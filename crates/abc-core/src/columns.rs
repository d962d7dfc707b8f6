//! Column names shared by every pipeline stage.

/// Transaction date.
pub const DATE: &str = "date";
/// Canonical customer identifier.
pub const CUSTOMER_ID: &str = "customer_id";
/// Sales amount.
pub const SALES: &str = "sales";
/// Calendar year of the period.
pub const YEAR: &str = "year";
/// Calendar quarter of the period (1..=4).
pub const QUARTER: &str = "quarter";
/// Latest transaction date in the batch.
pub const THROUGH_DATE: &str = "through_date";
/// Running sum of sales in rank order.
pub const CUMULATIVE_SALES: &str = "cumulative_sales";
/// Cumulative sales over total period sales.
pub const RUNNING_PCT: &str = "running_pct";
/// 1-based position within the period.
pub const RANK: &str = "rank";
/// Segment label.
pub const SEGMENT: &str = "segment";
/// Numeric tie-break key for integer-sourced identifiers, null for string ids.
///
/// Lives between normalization and ranking only; never part of the report.
pub const ID_ORDER: &str = "__id_order";

/// Columns of a finished report, in output order.
pub const REPORT_COLUMNS: [&str; 9] = [
    CUSTOMER_ID,
    YEAR,
    QUARTER,
    THROUGH_DATE,
    SALES,
    CUMULATIVE_SALES,
    RUNNING_PCT,
    RANK,
    SEGMENT,
];
