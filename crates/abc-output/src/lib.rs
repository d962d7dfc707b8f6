#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/abc-report/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod export;
pub mod report;
pub mod row;
pub mod summary;

pub use error::{OutputError, Result};
pub use export::{ExportFormat, Exporter};
pub use report::Report;
pub use row::ReportRow;
pub use summary::{PeriodSummary, SegmentBreakdown, summaries_to_ascii_table, summarize};
