// this_file: src/lib.rs

//! textrail places text along curved guide paths.
//!
//! The layout engine lives in `textrail-core`; `textrail-ttf` supplies
//! font metrics and outlines. This crate ties both together with a JSON
//! job runner and an SVG writer, and re-exports the common surface so
//! most users only need `use textrail::...`.

pub mod job;
pub mod svg;

pub use textrail_core::{
    text_along_path, text_along_path_multi, CharClass, Error, FormatOptions, Formatter,
    GeneratedPath, GuidePath, Jitter, LayoutMode, OutputGrouping, PivotRef, Result, TextExtents,
    TextMetrics,
};
pub use textrail_ttf::TtfMetrics;

pub use job::{process_job, Job, JobResult, JobSpec, PathOutput, RunOutput};
pub use svg::SvgWriter;
