#![warn(missing_docs)]

//! # trimfade: Audio clip trimming, fading and re-encoding
//!
//! Cuts a time range out of a decoded audio source, applies linear fade-in
//! and fade-out envelopes, and encodes the result as 16-bit PCM WAV or MP3.
//!
//! ## Features
//!
//! - **Extract** - Sample-accurate range extraction with composable fades
//! - **Encode** - Canonical 44-byte-header WAV, MP3 through a pluggable block compressor
//! - **Decode** - Any format symphonia understands, from a path or from memory
//! - **Export** - Filesystem and in-memory download sinks
//! - **CLI** - `trimfade probe` and `trimfade export`
//!
//! ## Quick Start
//!
//! ```
//! use trimfade::{AudioSource, FadeSpec, TimeRange};
//! use trimfade::encoder::encode_wav;
//! use trimfade::processor::extract;
//!
//! # fn main() -> trimfade::AudioResult<()> {
//! // Three seconds of stereo at 44.1kHz
//! let source = AudioSource::new(vec![vec![0.5; 132300]; 2], 44100)?;
//!
//! // Keep the middle second, fading a quarter second at each end
//! let range = TimeRange::new(1.0, 2.0)?;
//! let fade = FadeSpec::new(0.25, 0.25)?;
//! let samples = extract(&source, &range, &fade)?;
//!
//! let blob = encode_wav(&samples)?;
//! assert_eq!(blob.mime_type(), "audio/wav");
//! assert_eq!(blob.len(), 44 + 44100 * 4);
//! # Ok(())
//! # }
//! ```

/// Core audio types and structures
pub mod core;
/// Error types for audio operations
pub mod error;
/// Audio decoder implementations
pub mod decoder;
/// Audio filter implementations
pub mod filter;
/// Audio encoder implementations
pub mod encoder;
/// Audio processing pipelines
pub mod processor;
/// Export destinations
pub mod sink;

// Export public types
pub use crate::core::{
    AudioMetadata, AudioSource, EncodedBlob, ExportFormat, FadeSpec, ProcessedSamples, TimeRange,
};
pub use error::{AudioError, AudioResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
