// this_file: crates/textrail-core/src/lib.rs

//! Core types and layout engine for placing text along curved guides.

pub mod character;
pub mod collect;
pub mod error;
pub mod format;
pub mod layout;
pub mod metrics;
pub mod options;
pub mod pivot;
pub mod place;
pub mod sampler;
pub mod stroke;
pub mod utils;

#[cfg(test)]
pub(crate) mod testing;

pub use character::{build_characters, CharClass, Character, CharacterSet, BLANK_CHARACTERS};
pub use collect::{GeneratedPath, PathCollector};
pub use error::{Error, Result};
pub use format::{text_along_path, text_along_path_multi, Formatter};
pub use layout::{layout_on_stroke, LaidOutRun};
pub use metrics::{TextExtents, TextMetrics};
pub use options::{FormatOptions, LayoutMode, OutputGrouping, PivotRef};
pub use pivot::{compute_vertical_frame, VerticalFrame};
pub use place::{Jitter, Placement, Placer};
pub use sampler::StrokeSampler;
pub use stroke::{BezierStroke, GuidePath, RawSample, Stroke};
