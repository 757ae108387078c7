//! Confidence filtering.

use tracing::debug;

use crate::finding::Finding;

/// Keeps findings whose confidence is at or above `threshold`.
///
/// The comparison is inclusive, so a finding at exactly the threshold
/// survives. Order is preserved.
pub fn filter_by_confidence(findings: Vec<Finding>, threshold: f32) -> Vec<Finding> {
    let before = findings.len();
    let kept: Vec<Finding> = findings
        .into_iter()
        .filter(|f| f.confidence >= threshold)
        .collect();
    let dropped = before - kept.len();
    if dropped > 0 {
        debug!(dropped, threshold, "dropped low-confidence findings");
    }
    kept
}
