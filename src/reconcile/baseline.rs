//! Baseline derivation: `baseline = adjusted - adjustments`.
//!
//! The adjustments block is the authoritative delta; the baseline is always
//! recomputed, never stored. Negative cells are kept in the output and
//! reported as invalid entries so the caller can block a save or surface a
//! warning. Nothing in here returns an error: anomalies are data.

use crate::core::{CategoryCounts, MetricsBlock};
use crate::reconcile::order::{resolve_category_order, resolve_status_order};
use serde::{Deserialize, Serialize};

/// A cell whose derived baseline went negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvalidEntry {
    pub category: String,
    pub status: String,
    pub baseline: f64,
    pub adjusted: f64,
    pub adjustment: f64,
}

/// Derived baseline plus the cells that could not have come from a real
/// population count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineResult {
    pub baseline: MetricsBlock,
    pub invalid_entries: Vec<InvalidEntry>,
}

impl BaselineResult {
    /// True when every derived cell is non-negative.
    pub fn is_clean(&self) -> bool {
        self.invalid_entries.is_empty()
    }
}

/// Derive the baseline block by subtracting `adjustments` from `adjusted`,
/// cell by cell, in resolved category-major order.
///
/// With no adjustments every delta is 0, so the baseline equals the adjusted
/// block (fully populated in resolved order) and the invalid list is empty.
/// Malformed cells coerce to 0 before subtraction.
pub fn derive_baseline(
    adjusted: &MetricsBlock,
    adjustments: Option<&MetricsBlock>,
    category_order: Option<&[String]>,
    status_order: Option<&[String]>,
) -> BaselineResult {
    let mut blocks: Vec<&MetricsBlock> = vec![adjusted];
    if let Some(deltas) = adjustments {
        blocks.push(deltas);
    }
    let categories = resolve_category_order(category_order, &blocks);
    let statuses = resolve_status_order(status_order);

    let mut baseline = MetricsBlock::new();
    let mut invalid_entries = Vec::new();

    for category in &categories {
        let mut counts = CategoryCounts::new();
        for status in &statuses {
            let adjusted_value = adjusted.count(category, status);
            let adjustment_value = adjustments
                .map(|deltas| deltas.count(category, status))
                .unwrap_or(0.0);
            let baseline_value = adjusted_value - adjustment_value;

            counts.set(status.clone(), baseline_value);
            if baseline_value < 0.0 {
                invalid_entries.push(InvalidEntry {
                    category: category.clone(),
                    status: status.clone(),
                    baseline: baseline_value,
                    adjusted: adjusted_value,
                    adjustment: adjustment_value,
                });
            }
        }
        baseline.insert(category.clone(), counts);
    }

    BaselineResult {
        baseline,
        invalid_entries,
    }
}
