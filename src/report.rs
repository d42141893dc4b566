//! Report shapes produced by the commands and consumed by the writers.

use crate::core::MetricsBlock;
use crate::reconcile::{InvalidEntry, RealismIssue};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: String,
    pub inputs: Vec<String>,
}

impl ReportMetadata {
    pub fn now(inputs: Vec<String>) -> Self {
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            inputs,
        }
    }
}

/// Output of `ncdrecon reconcile`: the derived baseline plus any cells that
/// went negative after subtracting adjustments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcileReport {
    pub metadata: ReportMetadata,
    /// Status order the baseline was resolved with, so renderers can lay
    /// out columns without re-resolving.
    pub statuses: Vec<String>,
    pub baseline: MetricsBlock,
    pub invalid_entries: Vec<InvalidEntry>,
    pub is_clean: bool,
}

/// Output of `ncdrecon diff`: the elementwise delta and the no-op flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiffReport {
    pub metadata: ReportMetadata,
    pub statuses: Vec<String>,
    pub diff: MetricsBlock,
    pub is_empty: bool,
}

/// Output of `ncdrecon validate`: realism issues found in a stored record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub metadata: ReportMetadata,
    pub statuses: Vec<String>,
    pub is_valid: bool,
    pub issues: Vec<RealismIssue>,
}

/// Any report the writers know how to render.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Report {
    Reconcile(ReconcileReport),
    Diff(DiffReport),
    Validation(ValidationReport),
}
