// this_file: crates/textrail-core/src/pivot.rs

//! Vertical anchor resolution.
//!
//! The pivot is the horizontal line of the character box that rides on
//! the stroke. Box anchors come straight from the line metrics; the
//! uppercase and lowercase anchors are measured on reference glyphs so
//! they follow the face's actual cap and x heights.

use crate::error::Result;
use crate::metrics::TextMetrics;
use crate::options::PivotRef;
use crate::utils::control_y_range;

/// Resolved vertical frame for a whole run.
#[derive(Debug, Clone, Copy)]
pub struct VerticalFrame {
    /// Y of the anchor line in the layer frame, vertical adjust included.
    pub pivot_y: f64,
    /// Bound for vertical jitter, the line height of the reference glyph.
    pub wiggle_y_max: f64,
}

/// Top and optical middle of `sample`'s outline.
///
/// Round glyphs overshoot the baseline by the same amount they overshoot
/// the flat top, so the overshoot below the baseline is folded back into
/// the reported top.
fn vertical_spread<M: TextMetrics + ?Sized>(
    metrics: &M,
    sample: &str,
    ascent: f64,
    height: f64,
) -> Result<(f64, f64)> {
    let range = match metrics.outline(sample)? {
        Some(path) => control_y_range(&path),
        None => None,
    };
    let Some((min_y, max_y)) = range else {
        // No geometry to inspect, fall back to the box anchors.
        return Ok((0.0, height / 2.0));
    };
    let top = min_y + (max_y - ascent);
    let middle = (min_y + max_y) / 2.0;
    Ok((top, middle))
}

/// Resolves the pivot height for the face behind `metrics`.
pub fn compute_vertical_frame<M: TextMetrics + ?Sized>(
    metrics: &M,
    pivot: PivotRef,
    vertical_adjust: f64,
) -> Result<VerticalFrame> {
    let extents = metrics.measure("X")?;
    log::trace!(
        "reference extents: width {:.2} height {:.2} ascent {:.2} descent {:.2}",
        extents.width,
        extents.height,
        extents.ascent,
        extents.descent
    );
    let (height, ascent) = (extents.height, extents.ascent);

    let anchor = match pivot {
        PivotRef::Baseline => ascent,
        PivotRef::BoxTop => 0.0,
        PivotRef::BoxBottom => height,
        PivotRef::BoxMiddle => height / 2.0,
        PivotRef::UppercaseTop | PivotRef::UppercaseMiddle => {
            let (top, middle) = vertical_spread(metrics, "X", ascent, height)?;
            if pivot == PivotRef::UppercaseTop {
                top
            } else {
                middle
            }
        }
        PivotRef::LowercaseTop | PivotRef::LowercaseMiddle => {
            let (top, middle) = vertical_spread(metrics, "x", ascent, height)?;
            if pivot == PivotRef::LowercaseTop {
                top
            } else {
                middle
            }
        }
    };
    let pivot_y = anchor + vertical_adjust;
    log::debug!("pivot {:?}: y {:.2}", pivot, pivot_y);

    Ok(VerticalFrame {
        pivot_y,
        wiggle_y_max: height,
    })
}
