//! Deterministic category and status ordering.
//!
//! Every reconciliation entry point walks cells in a resolved order so that
//! anomaly lists and output blocks are reproducible: same inputs, same
//! iteration, same report.

use crate::core::MetricsBlock;

/// Canonical screening category order used when no override is supplied.
pub const DEFAULT_CATEGORY_ORDER: [&str; 7] = [
    "Overview",
    "Obesity",
    "Diabetes",
    "Hypertension",
    "Mental",
    "Alcohol",
    "Smoking",
];

/// Canonical status order used when no override is supplied.
pub const DEFAULT_STATUS_ORDER: [&str; 3] = ["normal", "risk", "sick"];

/// Resolve the category iteration order.
///
/// A non-empty override wins verbatim, with blank entries stripped and
/// duplicates removed by first occurrence. Otherwise the canonical defaults
/// come first, followed by any extra keys found in `blocks`, in the order
/// they are first encountered (earlier blocks before later ones).
pub fn resolve_category_order(
    override_order: Option<&[String]>,
    blocks: &[&MetricsBlock],
) -> Vec<String> {
    if let Some(order) = sanitize_override(override_order) {
        return order;
    }

    let defaults = DEFAULT_CATEGORY_ORDER.iter().map(|key| key.to_string());
    let harvested = blocks
        .iter()
        .flat_map(|block| block.categories())
        .map(|key| key.to_string());
    dedup_first_occurrence(defaults.chain(harvested))
}

/// Resolve the status iteration order. Unlike categories, statuses are never
/// harvested from blocks; absent an override the canonical set is used.
pub fn resolve_status_order(override_order: Option<&[String]>) -> Vec<String> {
    if let Some(order) = sanitize_override(override_order) {
        return order;
    }
    DEFAULT_STATUS_ORDER.iter().map(|key| key.to_string()).collect()
}

/// Strip blank entries and dedup; `None` when the override is absent or
/// degenerates to nothing usable.
fn sanitize_override(override_order: Option<&[String]>) -> Option<Vec<String>> {
    let order = override_order?;
    let cleaned = dedup_first_occurrence(
        order
            .iter()
            .filter(|key| !key.trim().is_empty())
            .cloned(),
    );
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

fn dedup_first_occurrence(keys: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for key in keys {
        if !seen.contains(&key) {
            seen.push(key);
        }
    }
    seen
}
