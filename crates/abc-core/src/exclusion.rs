//! Customer identifiers and the exclusion filter.
//!
//! Identifiers arrive from two places: the transaction frame and an externally
//! supplied exclusion list. Both are funnelled through [`CustomerId`] so that
//! membership is always decided between values of one canonical type. Numeric
//! identifiers are rendered in decimal, string identifiers are trimmed.

use crate::{
    columns,
    error::{AbcError, Result},
};
use derive_more::{Display, Into};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::{borrow::Borrow, collections::BTreeSet};
use tracing::debug;

/// Canonical customer identifier.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Into, Serialize, Deserialize,
)]
#[serde(from = "String", into = "String")]
pub struct CustomerId(String);

impl CustomerId {
    /// Create an identifier from its textual form, trimming surrounding whitespace.
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(id.as_ref().trim().to_string())
    }

    /// The canonical string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for CustomerId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CustomerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for CustomerId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl From<i64> for CustomerId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl From<u64> for CustomerId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

/// A parameterized `NOT IN` predicate with its bound values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundPredicate {
    /// SQL text using `?` placeholders.
    pub sql: String,
    /// Values bound to the placeholders, in order.
    pub params: Vec<String>,
}

/// Set of customers removed from every computation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionList {
    ids: BTreeSet<CustomerId>,
}

impl ExclusionList {
    /// Create an empty exclusion list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an identifier. Blank identifiers are ignored.
    pub fn insert(&mut self, id: impl Into<CustomerId>) -> bool {
        let id = id.into();
        if id.as_str().is_empty() {
            return false;
        }
        self.ids.insert(id)
    }

    /// Check membership of an identifier in canonical or raw string form.
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id.trim())
    }

    /// Number of excluded identifiers.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing is excluded.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterate over the identifiers in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &CustomerId> {
        self.ids.iter()
    }

    /// Render a `NOT IN` predicate for a query engine that binds parameters.
    ///
    /// Returns `None` for an empty list, since `NOT IN ()` is not valid SQL and
    /// no predicate is needed.
    pub fn not_in_clause(&self, column: &str) -> Option<BoundPredicate> {
        if self.is_empty() {
            return None;
        }
        let placeholders = vec!["?"; self.len()].join(", ");
        Some(BoundPredicate {
            sql: format!("{column} NOT IN ({placeholders})"),
            params: self.ids.iter().map(|id| id.as_str().to_string()).collect(),
        })
    }
}

impl<I: Into<CustomerId>> FromIterator<I> for ExclusionList {
    fn from_iter<T: IntoIterator<Item = I>>(iter: T) -> Self {
        let mut list = Self::new();
        for id in iter {
            list.insert(id);
        }
        list
    }
}

/// Remove every row whose `customer_id` is on the exclusion list.
///
/// The frame must already carry canonical string identifiers (see
/// [`crate::normalize::normalize_transactions`]); any other dtype is rejected
/// rather than compared.
pub fn filter_excluded(frame: DataFrame, exclusions: &ExclusionList) -> Result<DataFrame> {
    if exclusions.is_empty() {
        return Ok(frame);
    }

    let ids = frame.column(columns::CUSTOMER_ID)?.as_materialized_series();
    if ids.dtype() != &DataType::String {
        return Err(AbcError::Schema(format!(
            "exclusion filter requires canonical string identifiers, found {}",
            ids.dtype()
        )));
    }

    let keep: BooleanChunked = ids
        .str()?
        .into_iter()
        .map(|id| id.is_none_or(|id| !exclusions.contains(id)))
        .collect();

    let before = frame.height();
    let filtered = frame.filter(&keep)?;
    debug!(
        excluded_ids = exclusions.len(),
        removed_rows = before - filtered.height(),
        "applied exclusion list"
    );

    Ok(filtered)
}
