//! Grouping of free words into visual text lines.

use ordered_float::OrderedFloat;
use tracing::trace;

use super::clustering::{cluster_1d, nearest_index};
use super::params::LayoutParams;
use super::types::{Line, Token};
use super::words::merge_fragments;

/// Group words into lines by clustering their tops.
///
/// Each word goes to the nearest cluster center (the earlier center on an
/// exact tie). Within a line, words are sorted by `x0` and fragments are
/// merged. Lines come out top to bottom.
pub fn group_lines(words: Vec<Token>, params: &LayoutParams) -> Vec<Line> {
    if words.is_empty() {
        return Vec::new();
    }

    let tops: Vec<f64> = words.iter().map(|w| w.top).collect();
    let centers = cluster_1d(&tops, params.line_tolerance);
    let mut groups: Vec<Vec<Token>> = vec![Vec::new(); centers.len()];
    for word in words {
        if let Some(idx) = nearest_index(word.top, &centers) {
            groups[idx].push(word);
        }
    }

    let mut lines = Vec::with_capacity(centers.len());
    for (y_center, mut group) in centers.into_iter().zip(groups) {
        if group.is_empty() {
            continue;
        }
        group.sort_by_key(|w| OrderedFloat(w.x0));
        let words = merge_fragments(group, params);
        trace!(y_center, words = words.len(), "line");
        lines.push(Line { y_center, words });
    }
    lines
}
