use crate::error::{FlowTreeError, Result};
use crate::tree::TreeNode;

/// One cent of drift allowed per billion dollars of input total.
const RELATIVE_TOLERANCE: f64 = 0.01 / 1e9;

/// Absolute tolerance for a given expected total: the configured floor,
/// widened proportionally for large totals so accumulated floating-point
/// error on multi-billion-dollar ledgers does not trip the gate.
pub fn effective_tolerance(base: f64, expected_total: f64) -> f64 {
    base.max(expected_total.abs() * RELATIVE_TOLERANCE)
}

/// The end-to-end correctness gate: every pipeline stage is required to be
/// sum-preserving, and this is the single place that enforces it. Compares
/// the tree's leaf sum against the input total computed independently before
/// any aggregation; a divergence beyond `tolerance` is fatal and carries both
/// the absolute and the relative discrepancy.
pub fn validate(tree: &TreeNode, expected_total: f64, tolerance: f64) -> Result<()> {
    let leaf_sum = tree.leaf_sum();
    let difference = leaf_sum - expected_total;

    if difference.abs() > tolerance {
        let relative = if expected_total != 0.0 {
            difference / expected_total
        } else {
            f64::INFINITY
        };
        return Err(FlowTreeError::TotalMismatch {
            leaf_sum,
            expected: expected_total,
            difference,
            relative,
        });
    }

    Ok(())
}
