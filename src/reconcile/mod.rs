//! The reconciliation core: pure, synchronous functions over count blocks.
//!
//! Everything in this module is side-effect free and infallible. Inputs may
//! be arbitrarily malformed; outputs are always fully defined, with
//! anomalies reported as accompanying data rather than errors.

pub mod baseline;
pub mod diff;
pub mod order;
pub mod realism;

pub use baseline::{derive_baseline, BaselineResult, InvalidEntry};
pub use diff::{compute_diff, is_diff_empty};
pub use order::{
    resolve_category_order, resolve_status_order, DEFAULT_CATEGORY_ORDER, DEFAULT_STATUS_ORDER,
};
pub use realism::{validate_realism, IssueReason, RealismIssue, RealismReport};
