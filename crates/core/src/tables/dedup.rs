//! Combining table detections into one consistent set per page.

use tracing::debug;

use crate::layout::params::TableParams;
use crate::layout::{TableCandidate, geometry::iou};

use super::strategy::StrategyDetection;

/// Drop candidates that overlap an earlier accepted candidate by more than
/// `threshold` IoU. The first detection wins.
pub fn dedup_candidates<I>(candidates: I, threshold: f64) -> Vec<TableCandidate>
where
    I: IntoIterator<Item = TableCandidate>,
{
    let mut accepted: Vec<TableCandidate> = Vec::new();
    for candidate in candidates {
        let duplicate = accepted
            .iter()
            .any(|seen| iou(candidate.bbox, seen.bbox) > threshold);
        if duplicate {
            debug!(bbox = ?candidate.bbox, "dropping duplicate table");
            continue;
        }
        accepted.push(candidate);
    }
    accepted
}

/// True when the grid looks like a real table rather than a paragraph or a
/// stray rule.
pub fn passes_shape_filter(table: &TableCandidate, params: &TableParams) -> bool {
    let shape = table.shape();
    shape.rows >= params.min_rows
        && shape.cols >= params.min_cols
        && shape.non_empty >= params.min_non_empty
}

/// Reduce the per-strategy detections of a page to its retained tables.
///
/// Candidates are taken in strategy order with their bboxes normalized,
/// deduplicated, then filtered by shape. Failed strategies and candidates
/// with a non-finite bbox contribute nothing.
pub fn detect_tables(detections: &[StrategyDetection], params: &TableParams) -> Vec<TableCandidate> {
    let candidates = detections
        .iter()
        .flat_map(|d| d.candidates().iter().cloned())
        .filter_map(|table| {
            let bbox = table.bbox;
            let normalized = table.normalized();
            if normalized.is_none() {
                debug!(bbox = ?bbox, "dropping table with non-finite bbox");
            }
            normalized
        });
    dedup_candidates(candidates, params.dedup_iou)
        .into_iter()
        .filter(|table| {
            let keep = passes_shape_filter(table, params);
            if !keep {
                debug!(shape = ?table.shape(), "dropping weak table");
            }
            keep
        })
        .collect()
}
