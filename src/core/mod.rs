//! Core audio types and structures

/// Source, range, fade and processed-sample types
pub mod audio;
/// Encoded output types
pub mod blob;

pub use audio::{AudioMetadata, AudioSource, FadeSpec, ProcessedSamples, TimeRange};
pub use blob::{EncodedBlob, ExportFormat};
