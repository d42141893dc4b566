//! Elementwise diffs between count blocks, and the no-op save gate.

use crate::core::{CategoryCounts, MetricsBlock};
use crate::reconcile::order::{resolve_category_order, resolve_status_order};

/// Compute `proposed - baseline` for every resolved category/status cell.
///
/// Category resolution is proposed-centric: keys from `proposed` are
/// harvested before keys from `baseline`, since diffs are usually rendered
/// for the record being edited. A missing baseline reads as all zeros, so
/// the diff then equals the proposed block. The output is fully populated:
/// every resolved cell gets a value, zero-filled where neither side has one.
pub fn compute_diff(
    baseline: Option<&MetricsBlock>,
    proposed: &MetricsBlock,
    category_order: Option<&[String]>,
    status_order: Option<&[String]>,
) -> MetricsBlock {
    let mut blocks: Vec<&MetricsBlock> = vec![proposed];
    if let Some(base) = baseline {
        blocks.push(base);
    }
    let categories = resolve_category_order(category_order, &blocks);
    let statuses = resolve_status_order(status_order);

    let mut diff = MetricsBlock::new();
    for category in &categories {
        let mut counts = CategoryCounts::new();
        for status in &statuses {
            let proposed_value = proposed.count(category, status);
            let baseline_value = baseline
                .map(|base| base.count(category, status))
                .unwrap_or(0.0);
            counts.set(status.clone(), proposed_value - baseline_value);
        }
        diff.insert(category.clone(), counts);
    }
    diff
}

/// True when the diff represents no actual change.
///
/// `None` counts as empty, as does any block whose every resolved cell
/// coerces to exactly 0 (so malformed cells read as "no change").
pub fn is_diff_empty(
    diff: Option<&MetricsBlock>,
    category_order: Option<&[String]>,
    status_order: Option<&[String]>,
) -> bool {
    let Some(diff) = diff else {
        return true;
    };

    let categories = resolve_category_order(category_order, &[diff]);
    let statuses = resolve_status_order(status_order);

    categories.iter().all(|category| {
        statuses
            .iter()
            .all(|status| diff.count(category, status) == 0.0)
    })
}
