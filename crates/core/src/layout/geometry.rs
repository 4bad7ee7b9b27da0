//! Bounding-box geometry used to reconcile words with table regions.

use super::types::BBox;

/// Compute the overlap between two bounding boxes.
pub fn bbox_overlap(a: BBox, b: BBox) -> Option<BBox> {
    let o_left = a.x0.max(b.x0);
    let o_right = a.x1.min(b.x1);
    let o_top = a.top.max(b.top);
    let o_bottom = a.bottom.min(b.bottom);
    if o_right - o_left > 0.0 && o_bottom - o_top > 0.0 {
        Some(BBox {
            x0: o_left,
            top: o_top,
            x1: o_right,
            bottom: o_bottom,
        })
    } else {
        None
    }
}

/// Intersection over union of two axis-aligned boxes, in `[0, 1]`.
///
/// Negative dimensions count as zero, so a degenerate or inverted box never
/// overlaps anything.
pub fn iou(a: BBox, b: BBox) -> f64 {
    let area_a = a.area();
    let area_b = b.area();
    if !(area_a > 0.0 && area_b > 0.0) {
        return 0.0;
    }
    let inter = match bbox_overlap(a, b) {
        Some(overlap) => overlap.area(),
        None => return 0.0,
    };
    let union = area_a + area_b - inter;
    let ratio = inter / union;
    if ratio.is_finite() && union > 0.0 {
        ratio.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

impl BBox {
    /// Grow the box by `margin` on every side.
    pub fn expand(&self, margin: f64) -> BBox {
        BBox {
            x0: self.x0 - margin,
            top: self.top - margin,
            x1: self.x1 + margin,
            bottom: self.bottom + margin,
        }
    }

    /// Inclusive point containment.
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        self.x0 <= x && x <= self.x1 && self.top <= y && y <= self.bottom
    }
}

/// Index of the first region containing the point.
pub fn find_region(x: f64, y: f64, regions: &[BBox]) -> Option<usize> {
    regions.iter().position(|r| r.contains_point(x, y))
}
