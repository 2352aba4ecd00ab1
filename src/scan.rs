// Linear scans over a slice of shapes, driven only by the Shape contract.

use smallvec::SmallVec;

use crate::geom::Rect;
use crate::shape::{AnyShape, Shape};

/// Indices of shapes whose MBR intersects `range`, in slice order.
pub fn range_filter(shapes: &[AnyShape], range: &Rect) -> SmallVec<[usize; 8]> {
    let mut out = SmallVec::new();
    for (i, shape) in shapes.iter().enumerate() {
        if shape.is_intersected(range) {
            out.push(i);
        }
    }
    out
}

/// Closest shape to (x, y) by `distance_to`, with that distance.
///
/// Ties keep the earlier index. NaN distances never win.
pub fn nearest(shapes: &[AnyShape], x: f64, y: f64) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (i, shape) in shapes.iter().enumerate() {
        let d = shape.distance_to(x, y);
        if d.is_nan() {
            continue;
        }
        match best {
            Some((_, bd)) if bd <= d => {}
            _ => best = Some((i, d)),
        }
    }
    best
}
