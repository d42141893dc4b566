//! Realism validation: population counts must be non-negative integers.

use crate::core::MetricsBlock;
use crate::reconcile::order::{resolve_category_order, resolve_status_order};
use serde::{Deserialize, Serialize};

/// Why a cell failed realism validation.
///
/// A cell is flagged for at most one reason; negativity takes priority over
/// fractionality, so `-1.5` reports as `Negative` only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueReason {
    Negative,
    Fractional,
}

impl std::fmt::Display for IssueReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IssueReason::Negative => write!(f, "negative"),
            IssueReason::Fractional => write!(f, "fractional"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RealismIssue {
    pub category: String,
    pub status: String,
    pub value: f64,
    pub reason: IssueReason,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RealismReport {
    pub is_valid: bool,
    pub issues: Vec<RealismIssue>,
}

/// Check every resolved cell for counts that cannot describe a real
/// population. Never mutates, never fails; anomalies come back as issues.
pub fn validate_realism(
    metrics: &MetricsBlock,
    category_order: Option<&[String]>,
    status_order: Option<&[String]>,
) -> RealismReport {
    let categories = resolve_category_order(category_order, &[metrics]);
    let statuses = resolve_status_order(status_order);

    let mut issues = Vec::new();
    for category in &categories {
        for status in &statuses {
            let value = metrics.count(category, status);
            let reason = if value < 0.0 {
                Some(IssueReason::Negative)
            } else if value.fract() != 0.0 {
                Some(IssueReason::Fractional)
            } else {
                None
            };
            if let Some(reason) = reason {
                issues.push(RealismIssue {
                    category: category.clone(),
                    status: status.clone(),
                    value,
                    reason,
                });
            }
        }
    }

    RealismReport {
        is_valid: issues.is_empty(),
        issues,
    }
}
