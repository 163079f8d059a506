//! Audio filter implementations

/// Linear fade envelope
pub mod fade;

pub use fade::FadeEnvelope;

use crate::error::AudioResult;

/// Trait for filters applied to one channel of planar samples
pub trait Filter {
    /// Process a channel's samples, returning the filtered copy
    fn process(&mut self, samples: &[f32]) -> AudioResult<Vec<f32>>;
}
