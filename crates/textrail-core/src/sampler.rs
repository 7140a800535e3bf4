// this_file: crates/textrail-core/src/sampler.rs

//! Direction-aware arc-length sampling on top of [`Stroke`].
//!
//! The raw stroke gradient is an unsigned dy/dx and carries no sense of
//! travel, so the sampler takes a second sample half a unit further along
//! and recovers the oriented tangent angle from the coordinate deltas.

use kurbo::Point;

use crate::error::{Error, Result};
use crate::stroke::{RawSample, Stroke};

/// Gradients steeper than this are treated as vertical.
const VERTICAL_SLOPE: f64 = 100_000.0;

/// Arc-length sampler for one stroke, honoring travel direction.
pub struct StrokeSampler<'a, S: Stroke> {
    stroke: &'a S,
    backwards: bool,
    delta: f64,
    precision: f64,
    length: f64,
}

impl<'a, S: Stroke> StrokeSampler<'a, S> {
    /// Wrap a stroke. Sampling accuracy adapts to the segment count; the
    /// total length is computed once here.
    pub fn new(stroke: &'a S, backwards: bool) -> Self {
        let curves = stroke.curve_count().max(1);
        let precision = 0.05 / curves as f64;
        let length = stroke.length(precision);
        log::trace!(
            "sampler: {} curve(s), precision {:.5}, length {:.3}, backwards {}",
            curves,
            precision,
            length,
            backwards
        );
        Self {
            stroke,
            backwards,
            delta: if backwards { -0.5 } else { 0.5 },
            precision,
            length,
        }
    }

    /// Cached total arc length
    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn is_closed(&self) -> bool {
        self.stroke.is_closed()
    }

    pub fn precision(&self) -> f64 {
        self.precision
    }

    fn raw_point_at(&self, distance: f64) -> Result<RawSample> {
        self.stroke
            .point_at(distance, self.precision)
            .ok_or(Error::Sample {
                distance,
                length: self.length,
            })
    }

    /// Position and oriented tangent angle (radians) at a distance from
    /// the traversal start. Callers must stay at least half a character
    /// width away from an open stroke's ends so the auxiliary sample
    /// remains on the stroke.
    pub fn point_and_tangent_at(&self, distance: f64) -> Result<(Point, f64)> {
        let distance = if self.backwards {
            self.length - distance
        } else {
            distance
        };
        let base = self.raw_point_at(distance)?;
        let aux = self.raw_point_at(distance + self.delta)?;
        let d = aux.point - base.point;
        Ok((base.point, oriented_angle(d.x, d.y, base.slope)))
    }
}

/// Combine the unsigned gradient with the travel deltas into an oriented
/// angle: the gradient keeps its magnitude, the deltas give it direction.
fn oriented_angle(dx: f64, dy: f64, slope: f64) -> f64 {
    if !slope.is_finite() || slope.abs() > VERTICAL_SLOPE {
        dy.atan2(dx)
    } else {
        slope.copysign(dy).atan2(1f64.copysign(dx))
    }
}
