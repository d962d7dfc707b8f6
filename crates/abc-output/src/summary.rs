//! Per-quarter segment summaries.
//!
//! Rolls the customer-level rows of a report up to one line per quarter:
//! how many customers landed in each segment and how much of the quarter's
//! sales they account for.

use crate::{error::Result, row::ReportRow};
use abc_core::{Period, Segment};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt};

/// Customers and sales of a single segment within a quarter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SegmentBreakdown {
    /// The segment.
    pub segment: Segment,
    /// Number of customers in the segment.
    pub customers: usize,
    /// Sum of their sales.
    pub sales: f64,
    /// Fraction of the quarter's sales (0 when the quarter had none).
    pub share: f64,
}

/// Segment breakdown for one quarter of the reporting window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PeriodSummary {
    /// The quarter.
    pub period: Period,
    /// Distinct customers with at least one transaction.
    pub customers: usize,
    /// Total quarterly sales.
    pub total_sales: f64,
    /// One entry per segment, in `A`, `B`, `C`, `No Purchases` order.
    pub segments: Vec<SegmentBreakdown>,
}

impl PeriodSummary {
    /// Breakdown for a particular segment.
    pub fn segment(&self, segment: Segment) -> Option<&SegmentBreakdown> {
        self.segments.iter().find(|s| s.segment == segment)
    }

    /// Whether the quarter had no transactions at all.
    pub const fn is_empty(&self) -> bool {
        self.customers == 0
    }
}

impl fmt::Display for PeriodSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} customers, sales {:.2}",
            self.period, self.customers, self.total_sales
        )?;
        for s in &self.segments {
            write!(f, ", {} {} ({:.1}%)", s.segment, s.customers, s.share * 100.0)?;
        }
        Ok(())
    }
}

/// Summarize report rows per quarter, keeping quarters without data.
pub fn summarize(rows: &[ReportRow]) -> Result<Vec<PeriodSummary>> {
    let mut by_period: BTreeMap<Period, Vec<&ReportRow>> = BTreeMap::new();
    for row in rows {
        by_period.entry(row.period()?).or_default().push(row);
    }

    Ok(by_period
        .into_iter()
        .map(|(period, rows)| {
            let customers: Vec<&ReportRow> =
                rows.into_iter().filter(|r| !r.is_empty_period()).collect();
            let total_sales: f64 = customers.iter().filter_map(|r| r.sales).sum();

            let segments = Segment::ALL
                .into_iter()
                .map(|segment| {
                    let members: Vec<&&ReportRow> = customers
                        .iter()
                        .filter(|r| r.segment == Some(segment))
                        .collect();
                    let sales: f64 = members.iter().filter_map(|r| r.sales).sum();
                    let share = if total_sales > 0.0 {
                        sales / total_sales
                    } else {
                        0.0
                    };
                    SegmentBreakdown {
                        segment,
                        customers: members.len(),
                        sales,
                        share,
                    }
                })
                .collect();

            PeriodSummary {
                period,
                customers: customers.len(),
                total_sales,
                segments,
            }
        })
        .collect())
}

/// Render summaries as a fixed-width terminal table.
pub fn summaries_to_ascii_table(summaries: &[PeriodSummary]) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{:<10} {:>9} {:>14} {:>12} {:>12} {:>12} {:>14}\n",
        "Quarter", "Customers", "Sales", "A", "B", "C", "No Purchases"
    ));
    output.push_str(&"-".repeat(89));
    output.push('\n');

    for summary in summaries {
        let cell = |segment: Segment| {
            summary.segment(segment).map_or_else(String::new, |s| {
                format!("{} ({:.0}%)", s.customers, s.share * 100.0)
            })
        };
        output.push_str(&format!(
            "{:<10} {:>9} {:>14.2} {:>12} {:>12} {:>12} {:>14}\n",
            summary.period.to_string(),
            summary.customers,
            summary.total_sales,
            cell(Segment::A),
            cell(Segment::B),
            cell(Segment::C),
            summary
                .segment(Segment::NoPurchases)
                .map_or(0, |s| s.customers),
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn row(quarter: u8, id: Option<&str>, sales: f64, segment: Option<Segment>) -> ReportRow {
        ReportRow {
            customer_id: id.map(str::to_string),
            year: 2020,
            quarter,
            through_date: None,
            sales: id.map(|_| sales),
            cumulative_sales: None,
            running_pct: None,
            rank: None,
            segment,
        }
    }

    fn sample() -> Vec<ReportRow> {
        vec![
            row(1, Some("1"), 60.0, Some(Segment::A)),
            row(1, Some("2"), 25.0, Some(Segment::B)),
            row(1, Some("3"), 15.0, Some(Segment::C)),
            row(1, Some("4"), 0.0, Some(Segment::NoPurchases)),
            row(2, None, 0.0, None),
        ]
    }

    #[test]
    fn test_summarize_counts_and_shares() {
        let summaries = summarize(&sample()).unwrap();
        assert_eq!(summaries.len(), 2);

        let q1 = &summaries[0];
        assert_eq!(q1.customers, 4);
        assert_relative_eq!(q1.total_sales, 100.0);
        assert_eq!(q1.segment(Segment::A).unwrap().customers, 1);
        assert_relative_eq!(q1.segment(Segment::A).unwrap().share, 0.6);
        assert_relative_eq!(q1.segment(Segment::B).unwrap().share, 0.25);
        assert_eq!(q1.segment(Segment::NoPurchases).unwrap().customers, 1);

        let shares: f64 = q1.segments.iter().map(|s| s.share).sum();
        assert_relative_eq!(shares, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_empty_quarter_is_kept() {
        let summaries = summarize(&sample()).unwrap();
        let q2 = &summaries[1];
        assert!(q2.is_empty());
        assert_eq!(q2.total_sales, 0.0);
        assert!(q2.segments.iter().all(|s| s.customers == 0 && s.share == 0.0));
    }

    #[test]
    fn test_ascii_table() {
        let table = summaries_to_ascii_table(&summarize(&sample()).unwrap());
        assert!(table.contains("Quarter"));
        assert!(table.contains("2020-Q1"));
        assert!(table.contains("2020-Q2"));
        assert!(table.contains("1 (60%)"));
    }

    #[test]
    fn test_display() {
        let summaries = summarize(&sample()).unwrap();
        let text = summaries[0].to_string();
        assert!(text.starts_with("2020-Q1: 4 customers"));
        assert!(text.contains("A 1 (60.0%)"));
    }
}
