// this_file: crates/textrail-core/src/place.rs

//! Final placement of characters on the stroke.
//!
//! Takes a laid out character, samples the stroke at its position and
//! produces the transform that moves the character box there: where the
//! box corner goes, where the pivot sits inside the box, and the tilt.
//! Jitter offsets are drawn in the tangent frame of the stroke, so
//! horizontal wiggle slides characters along the guide even on steep
//! sections.

use kurbo::Point;

use crate::character::Character;
use crate::error::Result;
use crate::options::FormatOptions;
use crate::pivot::VerticalFrame;
use crate::sampler::StrokeSampler;
use crate::stroke::Stroke;

/// Small xorshift generator for jitter.
///
/// Layout needs repeatable randomness more than statistical quality.
/// A seeded run places every character exactly the same way again.
#[derive(Debug, Clone)]
pub struct Jitter {
    state: u64,
}

impl Jitter {
    /// Generator with a fixed seed. A zero seed is replaced, the
    /// xorshift state must never be zero.
    pub fn seeded(seed: u64) -> Self {
        Self {
            state: if seed == 0 {
                0x9E37_79B9_7F4A_7C15
            } else {
                seed
            },
        }
    }

    /// Generator seeded from the wall clock.
    pub fn from_entropy() -> Self {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();
        Self::seeded(nanos)
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform draw from `[low, high)`. Always consumes one draw, even
    /// for an empty range, so seeded runs stay aligned when individual
    /// wiggle ranges are zero.
    pub fn uniform(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.next_f64()
    }
}

/// Transform of one character onto the stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Layer position of the character box corner.
    pub corner: Point,
    /// Pivot point inside the box, relative to the corner.
    pub pivot: Point,
    /// Rotation about the pivot, in degrees.
    pub tilt: f64,
}

/// Places characters of one laid out run onto one stroke.
pub struct Placer<'a, S: Stroke> {
    sampler: &'a StrokeSampler<'a, S>,
    frame: VerticalFrame,
    options: &'a FormatOptions,
    wiggle_x_max: f64,
    jitter: &'a mut Jitter,
}

impl<'a, S: Stroke> Placer<'a, S> {
    pub fn new(
        sampler: &'a StrokeSampler<'a, S>,
        frame: VerticalFrame,
        options: &'a FormatOptions,
        wiggle_x_max: f64,
        jitter: &'a mut Jitter,
    ) -> Self {
        Self {
            sampler,
            frame,
            options,
            wiggle_x_max,
            jitter,
        }
    }

    /// Resolves the transform for `character` at its laid out position.
    pub fn place(&mut self, character: &Character) -> Result<Placement> {
        let (point, slope) = self.sampler.point_and_tangent_at(character.position)?;
        let tilt = if self.options.keep_upright {
            0.0
        } else {
            slope.to_degrees()
        };

        let wiggle_x_range = self.wiggle_x_max * self.options.wiggle_x_percent / 100.0;
        let wiggle_y_range = self.frame.wiggle_y_max * self.options.wiggle_y_percent / 100.0;
        let wx = self.jitter.uniform(-wiggle_x_range, wiggle_x_range);
        let wy = self.jitter.uniform(-wiggle_y_range, wiggle_y_range);
        let wtilt = self
            .jitter
            .uniform(-self.options.wiggle_tilt, self.options.wiggle_tilt);

        let (sin, cos) = slope.sin_cos();
        let x = point.x + wx * cos - wy * sin;
        let y = point.y + wy * cos + wx * sin;
        log::trace!("{:.2} moved to {:.2},{:.2}", character.position, x, y);

        Ok(Placement {
            corner: Point::new(x - character.width / 2.0, y - self.frame.pivot_y),
            pivot: Point::new(character.width / 2.0, self.frame.pivot_y),
            tilt: tilt + wtilt,
        })
    }
}
