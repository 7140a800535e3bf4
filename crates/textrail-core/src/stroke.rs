// this_file: crates/textrail-core/src/stroke.rs

//! Guide stroke geometry: cubic Bezier strokes with arc-length queries.
//!
//! A stroke is one continuous path component, stored as an ordered run of
//! cubic segments plus a closed flag. `point_at` answers arc-length
//! queries with the local position and the unsigned dy/dx gradient; the
//! direction-aware layer on top lives in [`crate::sampler`].

use kurbo::{
    Arc, BezPath, CubicBez, ParamCurve, ParamCurveArclen, ParamCurveDeriv, PathEl, Point, SvgArc,
    Vec2,
};
use svgtypes::{PathParser, PathSegment};

use crate::error::{Error, Result};

/// Clamp tolerance at open-stroke endpoints
const END_EPSILON: f64 = 1e-9;

/// Tolerance when expanding elliptical arcs to cubic runs
const ARC_TOLERANCE: f64 = 0.1;

/// Position and unsigned gradient at one point of a stroke.
#[derive(Debug, Clone, Copy)]
pub struct RawSample {
    pub point: Point,
    /// dy/dx at the sample; infinite on vertical tangents
    pub slope: f64,
}

/// Arc-length view of one path component.
///
/// `point_at` returning `None` is the invalid-query signal: open strokes
/// reject distances outside `[0, length]` (beyond a tiny endpoint clamp),
/// closed strokes wrap the distance and never reject.
pub trait Stroke {
    /// Number of cubic segments
    fn curve_count(&self) -> usize;
    /// Whether the stroke loops back onto its start
    fn is_closed(&self) -> bool;
    /// Total arc length, computed at the given accuracy
    fn length(&self, accuracy: f64) -> f64;
    /// Sample at an arc-length distance from the stroke start
    fn point_at(&self, distance: f64, accuracy: f64) -> Option<RawSample>;
}

/// A stroke backed by kurbo cubic segments.
#[derive(Debug, Clone)]
pub struct BezierStroke {
    pub segments: Vec<CubicBez>,
    pub closed: bool,
}

impl BezierStroke {
    pub fn new(segments: Vec<CubicBez>, closed: bool) -> Self {
        Self { segments, closed }
    }
}

impl Stroke for BezierStroke {
    fn curve_count(&self) -> usize {
        self.segments.len()
    }

    fn is_closed(&self) -> bool {
        self.closed
    }

    fn length(&self, accuracy: f64) -> f64 {
        self.segments.iter().map(|seg| seg.arclen(accuracy)).sum()
    }

    fn point_at(&self, distance: f64, accuracy: f64) -> Option<RawSample> {
        if self.segments.is_empty() {
            return None;
        }
        let total = self.length(accuracy);
        let dist = if self.closed {
            if total <= 0.0 {
                return None;
            }
            distance.rem_euclid(total)
        } else {
            if distance < -END_EPSILON || distance > total + END_EPSILON {
                return None;
            }
            distance.clamp(0.0, total)
        };

        let mut remaining = dist;
        let last = self.segments.len() - 1;
        for (i, seg) in self.segments.iter().enumerate() {
            let len = seg.arclen(accuracy);
            if remaining > len && i < last {
                remaining -= len;
                continue;
            }
            let t = if len > 0.0 {
                seg.inv_arclen(remaining.min(len), accuracy)
            } else {
                1.0
            };
            let point = seg.eval(t);
            let d = seg.deriv().eval(t);
            return Some(RawSample {
                point,
                slope: d.y / d.x,
            });
        }
        None
    }
}

/// Named, ordered list of strokes making up one guide.
#[derive(Debug, Clone)]
pub struct GuidePath {
    pub name: String,
    pub strokes: Vec<BezierStroke>,
}

impl GuidePath {
    /// Split a kurbo path into strokes, one per subpath.
    pub fn from_bez_path(name: impl Into<String>, path: &BezPath) -> Self {
        Self {
            name: name.into(),
            strokes: strokes_from_elements(path.elements().iter().copied()),
        }
    }

    /// Parse SVG path data into a guide.
    pub fn from_svg_data(name: impl Into<String>, data: &str) -> Result<Self> {
        let path = parse_path_data(data)?;
        Ok(Self::from_bez_path(name, &path))
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }
}

/// Raise a line to an equivalent cubic segment.
fn line_to_cubic(p0: Point, p3: Point) -> CubicBez {
    let d = (p3 - p0) / 3.0;
    CubicBez::new(p0, p0 + d, p0 + d * 2.0, p3)
}

/// All four control points coincide; such segments carry no geometry.
fn is_degenerate(c: &CubicBez) -> bool {
    (c.p1 - c.p0).hypot() < 1e-12 && (c.p2 - c.p0).hypot() < 1e-12 && (c.p3 - c.p0).hypot() < 1e-12
}

fn strokes_from_elements(elements: impl Iterator<Item = PathEl>) -> Vec<BezierStroke> {
    let mut out = Vec::new();
    let mut segments: Vec<CubicBez> = Vec::new();
    let mut start = Point::ZERO;
    let mut current = Point::ZERO;

    fn push(segments: &mut Vec<CubicBez>, seg: CubicBez) {
        if !is_degenerate(&seg) {
            segments.push(seg);
        }
    }
    fn flush(segments: &mut Vec<CubicBez>, closed: bool, out: &mut Vec<BezierStroke>) {
        if !segments.is_empty() {
            out.push(BezierStroke::new(std::mem::take(segments), closed));
        }
    }

    for el in elements {
        match el {
            PathEl::MoveTo(p) => {
                flush(&mut segments, false, &mut out);
                start = p;
                current = p;
            }
            PathEl::LineTo(p) => {
                push(&mut segments, line_to_cubic(current, p));
                current = p;
            }
            PathEl::QuadTo(c, p) => {
                push(&mut segments, kurbo::QuadBez::new(current, c, p).raise());
                current = p;
            }
            PathEl::CurveTo(c1, c2, p) => {
                push(&mut segments, CubicBez::new(current, c1, c2, p));
                current = p;
            }
            PathEl::ClosePath => {
                if (current - start).hypot() > END_EPSILON {
                    push(&mut segments, line_to_cubic(current, start));
                }
                flush(&mut segments, true, &mut out);
                current = start;
            }
        }
    }
    flush(&mut segments, false, &mut out);
    out
}

/// Parse SVG path data into a kurbo path, resolving relative coordinates,
/// smooth-segment control point reflection and elliptical arcs.
fn parse_path_data(data: &str) -> Result<BezPath> {
    let mut path = BezPath::new();
    let mut current = Point::ZERO;
    let mut start = Point::ZERO;
    let mut last_cubic_ctrl: Option<Point> = None;
    let mut last_quad_ctrl: Option<Point> = None;

    let resolve = |abs: bool, x: f64, y: f64, current: Point| -> Point {
        if abs {
            Point::new(x, y)
        } else {
            current + Vec2::new(x, y)
        }
    };
    let reflect = |ctrl: Option<Point>, current: Point| -> Point {
        match ctrl {
            Some(c) => current + (current - c),
            None => current,
        }
    };

    for segment in PathParser::from(data) {
        let segment = segment.map_err(|e| Error::PathData {
            reason: e.to_string(),
        })?;
        match segment {
            PathSegment::MoveTo { abs, x, y } => {
                current = resolve(abs, x, y, current);
                start = current;
                path.move_to(current);
                last_cubic_ctrl = None;
                last_quad_ctrl = None;
            }
            PathSegment::LineTo { abs, x, y } => {
                current = resolve(abs, x, y, current);
                path.line_to(current);
                last_cubic_ctrl = None;
                last_quad_ctrl = None;
            }
            PathSegment::HorizontalLineTo { abs, x } => {
                current = if abs {
                    Point::new(x, current.y)
                } else {
                    Point::new(current.x + x, current.y)
                };
                path.line_to(current);
                last_cubic_ctrl = None;
                last_quad_ctrl = None;
            }
            PathSegment::VerticalLineTo { abs, y } => {
                current = if abs {
                    Point::new(current.x, y)
                } else {
                    Point::new(current.x, current.y + y)
                };
                path.line_to(current);
                last_cubic_ctrl = None;
                last_quad_ctrl = None;
            }
            PathSegment::CurveTo {
                abs,
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => {
                let c1 = resolve(abs, x1, y1, current);
                let c2 = resolve(abs, x2, y2, current);
                current = resolve(abs, x, y, current);
                path.curve_to(c1, c2, current);
                last_cubic_ctrl = Some(c2);
                last_quad_ctrl = None;
            }
            PathSegment::SmoothCurveTo { abs, x2, y2, x, y } => {
                let c1 = reflect(last_cubic_ctrl, current);
                let c2 = resolve(abs, x2, y2, current);
                current = resolve(abs, x, y, current);
                path.curve_to(c1, c2, current);
                last_cubic_ctrl = Some(c2);
                last_quad_ctrl = None;
            }
            PathSegment::Quadratic { abs, x1, y1, x, y } => {
                let c = resolve(abs, x1, y1, current);
                current = resolve(abs, x, y, current);
                path.quad_to(c, current);
                last_quad_ctrl = Some(c);
                last_cubic_ctrl = None;
            }
            PathSegment::SmoothQuadratic { abs, x, y } => {
                let c = reflect(last_quad_ctrl, current);
                current = resolve(abs, x, y, current);
                path.quad_to(c, current);
                last_quad_ctrl = Some(c);
                last_cubic_ctrl = None;
            }
            PathSegment::EllipticalArc {
                abs,
                rx,
                ry,
                x_axis_rotation,
                large_arc,
                sweep,
                x,
                y,
            } => {
                let to = resolve(abs, x, y, current);
                append_arc(
                    &mut path,
                    current,
                    to,
                    rx,
                    ry,
                    x_axis_rotation.to_radians(),
                    large_arc,
                    sweep,
                );
                current = to;
                last_cubic_ctrl = None;
                last_quad_ctrl = None;
            }
            PathSegment::ClosePath { .. } => {
                path.close_path();
                current = start;
                last_cubic_ctrl = None;
                last_quad_ctrl = None;
            }
        }
    }
    Ok(path)
}

#[allow(clippy::too_many_arguments)]
fn append_arc(
    path: &mut BezPath,
    from: Point,
    to: Point,
    rx: f64,
    ry: f64,
    x_rotation: f64,
    large_arc: bool,
    sweep: bool,
) {
    let svg_arc = SvgArc {
        from,
        to,
        radii: Vec2::new(rx.abs(), ry.abs()),
        x_rotation,
        large_arc,
        sweep,
    };
    match Arc::from_svg_arc(&svg_arc) {
        Some(arc) => arc.to_cubic_beziers(ARC_TOLERANCE, |c1, c2, p| path.curve_to(c1, c2, p)),
        // Degenerate radii collapse to a straight segment
        None => path.line_to(to),
    }
}
