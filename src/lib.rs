// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod errors;
pub mod io;
pub mod reconcile;
pub mod report;

// Re-export commonly used types
pub use crate::core::{safe_count, CategoryCounts, MetricsBlock};

pub use crate::reconcile::{
    compute_diff, derive_baseline, is_diff_empty, resolve_category_order, resolve_status_order,
    validate_realism, BaselineResult, InvalidEntry, IssueReason, RealismIssue, RealismReport,
    DEFAULT_CATEGORY_ORDER, DEFAULT_STATUS_ORDER,
};

pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};

pub use crate::report::{DiffReport, ReconcileReport, Report, ReportMetadata, ValidationReport};
