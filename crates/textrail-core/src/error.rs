// this_file: crates/textrail-core/src/error.rs

//! Error types for textrail.
//!
//! Every failure aborts the whole run; accumulated output is discarded by
//! the collector and nothing is partially committed.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for textrail operations.
#[derive(Error, Debug)]
pub enum Error {
    /// No text was provided to lay out
    #[error("No text provided")]
    EmptyText,

    /// The guide path contains no strokes
    #[error("No strokes in guide path '{name}'")]
    EmptyGuide { name: String },

    /// The laid-out text is wider than the stroke it should follow
    #[error("Text is too long for stroke: {text_width:.2} > {stroke_length:.2}")]
    DoesNotFit {
        text_width: f64,
        stroke_length: f64,
    },

    /// Multi-line mode: line count does not match stroke count
    #[error("Guide path '{name}' has {strokes} stroke(s) but {lines} line(s) of text were given")]
    StrokeCountMismatch {
        name: String,
        strokes: usize,
        lines: usize,
    },

    /// Arc-length sampling failed (distance outside the stroke)
    #[error("No point found at {distance:.4} in stroke with length {length:.4}")]
    Sample { distance: f64, length: f64 },

    /// Font file not found at specified path
    #[error("Font file not found: {path}")]
    FontNotFound { path: PathBuf },

    /// Invalid font format or corrupted font file
    #[error("Invalid font file at {path}: {reason}")]
    InvalidFont { path: PathBuf, reason: String },

    /// Guide path data could not be parsed
    #[error("Invalid guide path data: {reason}")]
    PathData { reason: String },

    /// Text metrics provider reported a failure
    #[error("Metrics provider error: {reason}")]
    Metrics { reason: String },
}

/// Specialized Result type for textrail operations.
pub type Result<T> = std::result::Result<T, Error>;
