//! Transaction sources.
//!
//! Ingestion lives outside this crate. A [`DataSource`] hands over an already
//! materialized frame with `date`, `customer_id` and `sales` columns; the
//! pipeline takes the source by reference, so the caller decides when it is
//! opened and when it is released.

use crate::{
    columns,
    error::{AbcError, Result},
    exclusion::CustomerId,
    period::epoch_days,
};
use chrono::NaiveDate;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// A single sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Calendar date of the sale.
    pub date: NaiveDate,
    /// Customer that bought.
    pub customer_id: CustomerId,
    /// Sales amount, non-negative.
    pub sales: f64,
}

impl TransactionRecord {
    /// Create a new transaction record.
    pub const fn new(date: NaiveDate, customer_id: CustomerId, sales: f64) -> Self {
        Self {
            date,
            customer_id,
            sales,
        }
    }
}

/// Build a transaction frame from typed records.
pub fn records_to_frame(records: &[TransactionRecord]) -> Result<DataFrame> {
    let days: Vec<i32> = records.iter().map(|r| epoch_days(r.date)).collect();
    let ids: Vec<&str> = records.iter().map(|r| r.customer_id.as_str()).collect();
    let sales: Vec<f64> = records.iter().map(|r| r.sales).collect();

    Ok(DataFrame::new(vec![
        Series::new(columns::DATE.into(), days)
            .cast(&DataType::Date)?
            .into(),
        Series::new(columns::CUSTOMER_ID.into(), ids).into(),
        Series::new(columns::SALES.into(), sales).into(),
    ])?)
}

/// Supplier of the raw transaction frame for one report run.
pub trait DataSource {
    /// Hand over the transactions for this run.
    fn load_transactions(&mut self) -> Result<DataFrame>;

    /// Short human-readable description for logs.
    fn describe(&self) -> String;
}

/// A source over a frame that is already in memory.
///
/// The frame is handed over once; a second load is an error.
#[derive(Debug)]
pub struct InMemorySource {
    name: String,
    frame: Option<DataFrame>,
}

impl InMemorySource {
    /// Wrap an existing frame.
    pub fn new(name: impl Into<String>, frame: DataFrame) -> Self {
        Self {
            name: name.into(),
            frame: Some(frame),
        }
    }

    /// Build a source from typed records.
    pub fn from_records(name: impl Into<String>, records: &[TransactionRecord]) -> Result<Self> {
        Ok(Self::new(name, records_to_frame(records)?))
    }
}

impl DataSource for InMemorySource {
    fn load_transactions(&mut self) -> Result<DataFrame> {
        self.frame
            .take()
            .ok_or_else(|| AbcError::Source(format!("{} has already been consumed", self.name)))
    }

    fn describe(&self) -> String {
        match &self.frame {
            Some(frame) => format!("in-memory `{}` ({} rows)", self.name, frame.height()),
            None => format!("in-memory `{}` (consumed)", self.name),
        }
    }
}
