// this_file: crates/textrail-core/src/metrics.rs

//! Text measurement contract between the engine and its host text system.

use kurbo::BezPath;

use crate::error::Result;

/// Logical extents of a measured string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextExtents {
    pub width: f64,
    pub height: f64,
    /// Distance from the top of the line box down to the baseline
    pub ascent: f64,
    /// Distance from the baseline down to the bottom of the line box
    pub descent: f64,
}

/// Provider of string extents and outline geometry.
///
/// Outlines are produced in the layer frame: Y grows downward, the origin
/// is the top-left corner of the line box and the baseline sits at
/// `y = ascent`. Providers are stateless with respect to runs; measuring a
/// two-character string must account for the pair's kerning, which is how
/// the engine derives per-pair adjustments.
pub trait TextMetrics {
    /// Measure a string, kerning included between consecutive characters.
    fn measure(&self, text: &str) -> Result<TextExtents>;
    /// Outline geometry for a string, or `None` when it renders nothing.
    fn outline(&self, text: &str) -> Result<Option<BezPath>>;
}
