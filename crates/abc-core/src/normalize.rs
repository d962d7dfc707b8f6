//! Input validation and normalization.
//!
//! Brings an externally materialized transaction frame into the shape every
//! later stage relies on: `date: Date`, `customer_id: String` (canonical form),
//! `sales: Float64`, no nulls and no negative amounts.

use crate::{
    columns,
    config::MalformedPolicy,
    error::{AbcError, Result},
};
use polars::prelude::*;
use tracing::{debug, warn};

fn require_column<'a>(frame: &'a DataFrame, name: &str) -> Result<&'a DataType> {
    frame
        .column(name)
        .map(Column::dtype)
        .map_err(|_| AbcError::Schema(format!("missing required column `{name}`")))
}

fn date_expr(dtype: &DataType) -> Result<Expr> {
    match dtype {
        DataType::Date => Ok(col(columns::DATE)),
        DataType::Datetime(_, _) => Ok(col(columns::DATE).cast(DataType::Date)),
        other => Err(AbcError::Schema(format!(
            "`{}` must be a Date or Datetime column, found {other}",
            columns::DATE
        ))),
    }
}

fn customer_id_expr(dtype: &DataType) -> Result<Expr> {
    match dtype {
        DataType::String => Ok(col(columns::CUSTOMER_ID).str().strip_chars(lit(NULL))),
        DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32
        | DataType::UInt64 => Ok(col(columns::CUSTOMER_ID).cast(DataType::String)),
        other => Err(AbcError::Schema(format!(
            "`{}` must be a string or integer column, found {other}",
            columns::CUSTOMER_ID
        ))),
    }
}

/// Integer identifiers keep their numeric value so ties rank `2` before `10`.
fn id_order_expr(dtype: &DataType) -> Expr {
    if dtype.is_integer() {
        col(columns::CUSTOMER_ID).cast(DataType::Int64)
    } else {
        lit(NULL).cast(DataType::Int64)
    }
}

fn sales_expr(dtype: &DataType) -> Result<Expr> {
    match dtype {
        DataType::Float32
        | DataType::Float64
        | DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32
        | DataType::UInt64 => Ok(col(columns::SALES).cast(DataType::Float64)),
        other => Err(AbcError::Schema(format!(
            "`{}` must be numeric, found {other}",
            columns::SALES
        ))),
    }
}

/// Predicate selecting rows that cannot enter the pipeline.
fn malformed_expr() -> Expr {
    col(columns::DATE)
        .is_null()
        .or(col(columns::CUSTOMER_ID).is_null())
        .or(col(columns::CUSTOMER_ID).str().len_bytes().eq(lit(0)))
        .or(col(columns::SALES).is_null())
        .or(col(columns::SALES).is_finite().not())
        .or(col(columns::SALES).lt(lit(0.0)))
}

/// Validate and canonicalize a raw transaction frame.
///
/// Extra columns are dropped. Malformed rows are either removed or reported
/// according to `policy`. The output also carries the internal
/// [`columns::ID_ORDER`] key used by ranking.
pub fn normalize_transactions(frame: DataFrame, policy: MalformedPolicy) -> Result<DataFrame> {
    let date = date_expr(require_column(&frame, columns::DATE)?)?;
    let id_dtype = require_column(&frame, columns::CUSTOMER_ID)?;
    let customer_id = customer_id_expr(id_dtype)?;
    let id_order = id_order_expr(id_dtype);
    let sales = sales_expr(require_column(&frame, columns::SALES)?)?;

    let canonical = frame
        .lazy()
        .select([
            date.alias(columns::DATE),
            customer_id.alias(columns::CUSTOMER_ID),
            sales.alias(columns::SALES),
            id_order.alias(columns::ID_ORDER),
        ])
        .collect()?;

    let malformed = canonical
        .clone()
        .lazy()
        .filter(malformed_expr())
        .collect()?
        .height();

    if malformed == 0 {
        debug!(rows = canonical.height(), "input frame normalized");
        return Ok(canonical);
    }

    match policy {
        MalformedPolicy::FailBatch => Err(AbcError::MalformedInput {
            rows: malformed,
            reason: "have a missing date, missing customer_id or missing/negative sales"
                .to_string(),
        }),
        MalformedPolicy::Reject => {
            warn!(rejected = malformed, "dropping malformed transaction rows");
            let kept = canonical.lazy().filter(malformed_expr().not()).collect()?;
            debug!(rows = kept.height(), "input frame normalized");
            Ok(kept)
        }
    }
}
