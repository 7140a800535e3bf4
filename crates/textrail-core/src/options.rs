// this_file: crates/textrail-core/src/options.rs

//! Formatting options shared by the layout engine, the placer and the
//! output collector.

use serde::{Deserialize, Serialize};

/// Horizontal layout policy along a stroke
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayoutMode {
    /// Flush with the start of the stroke
    Left,
    /// Flush with the end of the stroke
    Right,
    /// Centered on the stroke
    Center,
    /// Spacing solved so the text spans the whole stroke
    Justify,
    /// Text (plus joiner) tiled as many times as fits
    Repeat,
}

/// Vertical reference the characters pivot around
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PivotRef {
    /// Font baseline
    Baseline,
    /// Top of the line box
    BoxTop,
    /// Bottom of the line box
    BoxBottom,
    /// Middle of the line box
    BoxMiddle,
    /// Top of an uppercase reference glyph
    UppercaseTop,
    /// Middle of an uppercase reference glyph
    UppercaseMiddle,
    /// Top of a lowercase reference glyph
    LowercaseTop,
    /// Middle of a lowercase reference glyph
    LowercaseMiddle,
}

/// How generated outlines are grouped into output containers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputGrouping {
    /// Everything into a single container
    Combined,
    /// One container per stroke
    PerStroke,
    /// Text characters and joiner characters split apart
    SplitByClass,
    /// One container per placed character
    PerCharacter,
}

/// Options controlling one formatting run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    /// Layout policy
    pub layout: LayoutMode,
    /// Apply pair kerning between consecutive characters
    pub use_kerning: bool,
    /// Additional spacing between characters (guide units)
    pub extra_spacing: f64,
    /// Vertical reference for character placement
    pub pivot: PivotRef,
    /// Offset added to the resolved pivot height (downward positive)
    pub vertical_adjust: f64,
    /// Keep characters unrotated regardless of the tangent
    pub keep_upright: bool,
    /// Random horizontal displacement, percent of the mean character slot
    pub wiggle_x_percent: f64,
    /// Random vertical displacement, percent of the reference line height
    pub wiggle_y_percent: f64,
    /// Random rotation, degrees
    pub wiggle_tilt: f64,
    /// Traverse strokes end to start
    pub backwards: bool,
    /// Output container grouping
    pub grouping: OutputGrouping,
    /// Also emit the character bounding boxes
    pub show_boxes: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            layout: LayoutMode::Center,
            use_kerning: true,
            extra_spacing: 0.0,
            pivot: PivotRef::Baseline,
            vertical_adjust: 0.0,
            keep_upright: false,
            wiggle_x_percent: 0.0,
            wiggle_y_percent: 0.0,
            wiggle_tilt: 0.0,
            backwards: false,
            grouping: OutputGrouping::Combined,
            show_boxes: false,
        }
    }
}
