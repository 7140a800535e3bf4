// this_file: backends/textrail-ttf/src/lib.rs

//! TrueType metrics provider for the textrail layout engine.

pub mod metrics;
mod outlines;

pub use metrics::TtfMetrics;
