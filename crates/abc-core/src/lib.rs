#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/abc-report/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod aggregate;
pub mod columns;
pub mod config;
pub mod error;
pub mod exclusion;
pub mod normalize;
pub mod period;
pub mod pipeline;
pub mod rank;
pub mod segment;
pub mod source;
pub mod window;

pub use aggregate::aggregate;
pub use config::{MalformedPolicy, ReportConfig};
pub use error::{AbcError, Result};
pub use exclusion::{BoundPredicate, CustomerId, ExclusionList, filter_excluded};
pub use normalize::normalize_transactions;
pub use period::Period;
pub use pipeline::{SegmentedReport, build_report, run_report};
pub use rank::rank;
pub use segment::{
    A_UPPER_BOUND, B_UPPER_BOUND, Segment, SegmentInput, assign_segments, classify, segment_expr,
};
pub use source::{DataSource, InMemorySource, TransactionRecord, records_to_frame};
pub use window::{ReportingWindow, complete_window, enumerate_periods};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
