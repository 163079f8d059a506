//! Clip extraction and export pipelines

/// Extract-then-encode pipeline
pub mod export;
/// Range extraction with fades
pub mod extract;

pub use export::{ExportSettings, export_clip};
pub use extract::extract;
