// this_file: crates/textrail-core/src/utils.rs

//! Small geometry helpers shared across the engine.

use kurbo::{BezPath, PathEl, Point};

/// Every control point of a path: anchors and handles alike.
///
/// Margin and pivot computations work on the raw control cage, not the
/// exact curve extents, matching how the produced outlines are measured.
pub fn control_points(path: &BezPath) -> Vec<Point> {
    let mut points = Vec::new();
    for el in path.elements() {
        match el {
            PathEl::MoveTo(p) | PathEl::LineTo(p) => points.push(*p),
            PathEl::QuadTo(c, p) => points.extend([*c, *p]),
            PathEl::CurveTo(c1, c2, p) => points.extend([*c1, *c2, *p]),
            PathEl::ClosePath => {}
        }
    }
    points
}

/// Min and max X over all control points, `None` for pointless paths.
pub fn control_x_range(path: &BezPath) -> Option<(f64, f64)> {
    minmax(control_points(path).iter().map(|p| p.x))
}

/// Min and max Y over all control points, `None` for pointless paths.
pub fn control_y_range(path: &BezPath) -> Option<(f64, f64)> {
    minmax(control_points(path).iter().map(|p| p.y))
}

fn minmax(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut any = false;
    for v in values {
        min = min.min(v);
        max = max.max(v);
        any = true;
    }
    any.then_some((min, max))
}
