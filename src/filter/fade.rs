use crate::core::FadeSpec;
use crate::error::AudioResult;

/// Linear fade-in/fade-out envelope with output clamping
///
/// Gain ramps 0 -> 1 over the first `fade_in_samples` and 1 -> 0 over the
/// last `fade_out_samples` of a channel. When the two windows overlap the
/// ramps multiply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FadeEnvelope {
    fade_in_samples: usize,
    fade_out_samples: usize,
}

impl FadeEnvelope {
    /// Create an envelope from lengths in samples
    pub fn new(fade_in_samples: usize, fade_out_samples: usize) -> Self {
        FadeEnvelope {
            fade_in_samples,
            fade_out_samples,
        }
    }

    /// Convert fade lengths in seconds to whole samples (floor)
    pub fn from_spec(fade: &FadeSpec, sample_rate: u32) -> Self {
        let rate = sample_rate as f64;
        // Negative or NaN products saturate to 0
        Self::new(
            (fade.fade_in * rate).floor() as usize,
            (fade.fade_out * rate).floor() as usize,
        )
    }

    /// Fade-in length in samples
    pub fn fade_in_samples(&self) -> usize {
        self.fade_in_samples
    }

    /// Fade-out length in samples
    pub fn fade_out_samples(&self) -> usize {
        self.fade_out_samples
    }

    /// Gain applied at `index` within a clip of `frame_count` frames
    pub fn gain_at(&self, index: usize, frame_count: usize) -> f64 {
        let mut gain = 1.0;

        if self.fade_in_samples > 0 && index < self.fade_in_samples {
            gain = index as f64 / self.fade_in_samples as f64;
        }

        let dist_from_end = frame_count.saturating_sub(index + 1);
        if self.fade_out_samples > 0 && dist_from_end < self.fade_out_samples {
            gain *= dist_from_end as f64 / self.fade_out_samples as f64;
        }

        gain
    }

    /// Apply the envelope to one sample and clamp to [-1.0, 1.0]
    pub fn apply_at(&self, sample: f32, index: usize, frame_count: usize) -> f32 {
        (sample as f64 * self.gain_at(index, frame_count)).clamp(-1.0, 1.0) as f32
    }
}

impl super::Filter for FadeEnvelope {
    fn process(&mut self, samples: &[f32]) -> AudioResult<Vec<f32>> {
        let frame_count = samples.len();
        Ok(samples
            .iter()
            .enumerate()
            .map(|(i, &s)| self.apply_at(s, i, frame_count))
            .collect())
    }
}
