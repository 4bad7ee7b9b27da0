//! One-dimensional clustering for line detection.
//!
//! Values are grouped by greedy chaining: a value joins the current cluster
//! when it lies within `tolerance` of the last value accepted into it.

use itertools::Itertools;
use ordered_float::OrderedFloat;

/// Cluster a list of f64 values based on tolerance.
///
/// Non-finite values are ignored. Clusters come out in ascending order.
pub fn cluster_groups(values: &[f64], tolerance: f64) -> Vec<Vec<f64>> {
    let mut xs: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    xs.sort_by_key(|v| OrderedFloat(*v));

    let mut groups: Vec<Vec<f64>> = Vec::new();
    let mut current: Vec<f64> = Vec::new();
    for x in xs {
        if let Some(&last) = current.last()
            && (x - last).abs() > tolerance
        {
            groups.push(std::mem::take(&mut current));
        }
        current.push(x);
    }
    if !current.is_empty() {
        groups.push(current);
    }
    groups
}

/// Cluster centers (arithmetic means), ascending.
pub fn cluster_1d(values: &[f64], tolerance: f64) -> Vec<f64> {
    cluster_groups(values, tolerance)
        .into_iter()
        .map(|group| group.iter().sum::<f64>() / group.len() as f64)
        .collect()
}

/// Index of the center closest to `value`. Ties go to the lowest index.
pub fn nearest_index(value: f64, centers: &[f64]) -> Option<usize> {
    centers
        .iter()
        .position_min_by_key(|c| OrderedFloat((value - **c).abs()))
}
