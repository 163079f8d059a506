use crate::error::{AudioError, AudioResult};
use std::time::Duration;

/// Decoded multi-channel audio, stored planar (one sample vector per channel)
///
/// Samples are 32-bit floats, nominally in -1.0 to 1.0. All channels hold
/// the same number of frames.
#[derive(Debug, Clone)]
pub struct AudioSource {
    /// Per-channel sample vectors
    channels: Vec<Vec<f32>>,
    /// Sample rate in Hz (e.g., 44100, 48000)
    sample_rate: u32,
}

impl AudioSource {
    /// Create a source from planar channel data
    pub fn new(channels: Vec<Vec<f32>>, sample_rate: u32) -> AudioResult<Self> {
        if sample_rate == 0 {
            return Err(AudioError::InvalidSampleRate { rate: sample_rate });
        }

        if channels.is_empty() {
            return Err(AudioError::InvalidChannels {
                expected: 1,
                got: 0,
            });
        }

        let frames = channels[0].len();
        if let Some((index, channel)) = channels
            .iter()
            .enumerate()
            .find(|(_, c)| c.len() != frames)
        {
            return Err(AudioError::BufferError(format!(
                "Channel {} has {} samples, channel 0 has {}",
                index,
                channel.len(),
                frames
            )));
        }

        Ok(AudioSource {
            channels,
            sample_rate,
        })
    }

    /// Create a source from interleaved samples ([L0, R0, L1, R1, ...])
    pub fn from_interleaved(samples: &[f32], sample_rate: u32, channels: u16) -> AudioResult<Self> {
        if channels == 0 {
            return Err(AudioError::InvalidChannels {
                expected: 1,
                got: 0,
            });
        }

        let count = channels as usize;
        if samples.len() % count != 0 {
            return Err(AudioError::BufferError(
                "Sample count not divisible by channel count".to_string(),
            ));
        }

        let frames = samples.len() / count;
        let mut planar = vec![Vec::with_capacity(frames); count];
        for frame in samples.chunks_exact(count) {
            for (channel, &sample) in planar.iter_mut().zip(frame) {
                channel.push(sample);
            }
        }

        Self::new(planar, sample_rate)
    }

    /// Get sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Get number of channels
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Get number of frames (samples per channel)
    pub fn frame_count(&self) -> usize {
        self.channels[0].len()
    }

    /// Get a single channel's samples
    pub fn channel(&self, index: usize) -> Option<&[f32]> {
        self.channels.get(index).map(Vec::as_slice)
    }

    /// Iterate over all channels in order
    pub fn channels(&self) -> impl Iterator<Item = &[f32]> {
        self.channels.iter().map(Vec::as_slice)
    }

    /// Get duration in seconds
    pub fn duration_secs(&self) -> f64 {
        self.frame_count() as f64 / self.sample_rate as f64
    }

    /// Get duration
    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.duration_secs())
    }
}

/// Time range within a source, in seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeRange {
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds (exclusive)
    pub end: f64,
}

impl TimeRange {
    /// Create a validated time range (0 <= start < end)
    pub fn new(start: f64, end: f64) -> AudioResult<Self> {
        if !start.is_finite() || !end.is_finite() {
            return Err(AudioError::InvalidRange(format!(
                "Range bounds must be finite, got {} to {}",
                start, end
            )));
        }

        if start < 0.0 {
            return Err(AudioError::InvalidRange(format!(
                "Start time cannot be negative: {}",
                start
            )));
        }

        if end <= start {
            return Err(AudioError::InvalidRange(format!(
                "End time ({}) must be greater than start time ({})",
                end, start
            )));
        }

        Ok(TimeRange { start, end })
    }

    /// Build a range by pinning both bounds into [0, duration]
    ///
    /// Mirrors what an interactive selector does with dragged handles: the
    /// result may be empty (start == end) and is not validated.
    pub fn clamped(start: f64, end: f64, duration: f64) -> Self {
        let duration = duration.max(0.0);
        let start = start.clamp(0.0, duration);
        let end = end.clamp(start, duration);
        TimeRange { start, end }
    }

    /// Get the length of the range in seconds
    pub fn duration_secs(&self) -> f64 {
        self.end - self.start
    }
}

/// Fade-in and fade-out lengths, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FadeSpec {
    /// Fade-in length in seconds
    pub fade_in: f64,
    /// Fade-out length in seconds
    pub fade_out: f64,
}

impl FadeSpec {
    /// Create a fade specification
    ///
    /// The two fades may together exceed the clip length; overlapping ramps
    /// multiply.
    pub fn new(fade_in: f64, fade_out: f64) -> AudioResult<Self> {
        for (name, value) in [("fade-in", fade_in), ("fade-out", fade_out)] {
            if !value.is_finite() || value < 0.0 {
                return Err(AudioError::ConfigError(format!(
                    "{} must be a non-negative number of seconds, got {}",
                    name, value
                )));
            }
        }

        Ok(FadeSpec { fade_in, fade_out })
    }

    /// No fades
    pub const fn none() -> Self {
        FadeSpec {
            fade_in: 0.0,
            fade_out: 0.0,
        }
    }
}

/// Extracted, faded samples ready for an encoder
#[derive(Debug, Clone)]
pub struct ProcessedSamples {
    channels: Vec<Vec<f32>>,
    sample_rate: u32,
}

impl ProcessedSamples {
    /// Wrap planar channel data produced by the extractor
    pub(crate) fn new(channels: Vec<Vec<f32>>, sample_rate: u32) -> Self {
        ProcessedSamples {
            channels,
            sample_rate,
        }
    }

    /// Get sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Get number of channels
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Get number of frames (samples per channel)
    pub fn frame_count(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    /// Get a single channel's samples
    pub fn channel(&self, index: usize) -> Option<&[f32]> {
        self.channels.get(index).map(Vec::as_slice)
    }

    /// Iterate over all channels in order
    pub fn channels(&self) -> impl Iterator<Item = &[f32]> {
        self.channels.iter().map(Vec::as_slice)
    }

    /// Get duration in seconds
    pub fn duration_secs(&self) -> f64 {
        self.frame_count() as f64 / self.sample_rate as f64
    }

    /// Check if there are no frames
    pub fn is_empty(&self) -> bool {
        self.frame_count() == 0
    }
}

/// Audio metadata/information
#[derive(Debug, Clone)]
pub struct AudioMetadata {
    /// Total duration of the audio, if the container reports it
    pub duration: Option<Duration>,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of channels
    pub channels: u16,
    /// Codec name (e.g., "mp3", "flac", "pcm_s16le")
    pub codec: String,
    /// Bits per sample if known
    pub bits_per_sample: Option<u32>,
}

impl AudioMetadata {
    /// Create new metadata
    pub fn new(sample_rate: u32, channels: u16, codec: String) -> AudioResult<Self> {
        if sample_rate == 0 {
            return Err(AudioError::InvalidSampleRate { rate: sample_rate });
        }

        Ok(AudioMetadata {
            duration: None,
            sample_rate,
            channels,
            codec,
            bits_per_sample: None,
        })
    }

    /// Set duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Set bits per sample
    pub fn with_bits_per_sample(mut self, bits: u32) -> Self {
        self.bits_per_sample = Some(bits);
        self
    }

    /// Get duration in seconds
    pub fn duration_secs(&self) -> Option<f64> {
        self.duration.map(|d| d.as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_creation() {
        let source = AudioSource::new(vec![vec![0.1, 0.2], vec![0.3, 0.4]], 44100).unwrap();

        assert_eq!(source.sample_rate(), 44100);
        assert_eq!(source.channel_count(), 2);
        assert_eq!(source.frame_count(), 2);
        assert_eq!(source.channel(1), Some(&[0.3, 0.4][..]));
        assert!(source.channel(2).is_none());
    }

    #[test]
    fn test_source_rejects_bad_input() {
        assert!(matches!(
            AudioSource::new(vec![vec![0.0]], 0),
            Err(AudioError::InvalidSampleRate { rate: 0 })
        ));
        assert!(matches!(
            AudioSource::new(Vec::new(), 44100),
            Err(AudioError::InvalidChannels { .. })
        ));
        assert!(matches!(
            AudioSource::new(vec![vec![0.0; 3], vec![0.0; 2]], 44100),
            Err(AudioError::BufferError(_))
        ));
    }

    #[test]
    fn test_source_from_interleaved() {
        let interleaved = [0.1, 0.2, 0.3, 0.4, 0.5, 0.6];
        let source = AudioSource::from_interleaved(&interleaved, 8000, 2).unwrap();

        assert_eq!(source.frame_count(), 3);
        assert_eq!(source.channel(0), Some(&[0.1, 0.3, 0.5][..]));
        assert_eq!(source.channel(1), Some(&[0.2, 0.4, 0.6][..]));

        // Odd number of samples for stereo should fail
        assert!(AudioSource::from_interleaved(&[0.1, 0.2, 0.3], 8000, 2).is_err());
    }

    #[test]
    fn test_source_duration() {
        let source = AudioSource::new(vec![vec![0.0; 88200]], 44100).unwrap();
        assert_eq!(source.duration_secs(), 2.0);
        assert_eq!(source.duration(), Duration::from_secs(2));
    }

    #[test]
    fn test_time_range_validation() {
        assert!(TimeRange::new(1.0, 2.0).is_ok());
        assert!(matches!(TimeRange::new(2.0, 1.0), Err(AudioError::InvalidRange(_))));
        assert!(matches!(TimeRange::new(1.0, 1.0), Err(AudioError::InvalidRange(_))));
        assert!(matches!(TimeRange::new(-0.5, 1.0), Err(AudioError::InvalidRange(_))));
        assert!(matches!(TimeRange::new(0.0, f64::NAN), Err(AudioError::InvalidRange(_))));
    }

    #[test]
    fn test_time_range_clamped() {
        let range = TimeRange::clamped(-1.0, 12.0, 10.0);
        assert_eq!(range, TimeRange { start: 0.0, end: 10.0 });

        // End dragged before start collapses onto start
        let range = TimeRange::clamped(4.0, 3.0, 10.0);
        assert_eq!(range, TimeRange { start: 4.0, end: 4.0 });
        assert_eq!(range.duration_secs(), 0.0);
    }

    #[test]
    fn test_fade_spec_validation() {
        assert_eq!(FadeSpec::new(0.0, 0.0).unwrap(), FadeSpec::none());
        assert!(FadeSpec::new(0.25, 1.5).is_ok());
        assert!(matches!(FadeSpec::new(-1.0, 0.0), Err(AudioError::ConfigError(_))));
        assert!(matches!(FadeSpec::new(0.0, f64::INFINITY), Err(AudioError::ConfigError(_))));
    }

    #[test]
    fn test_audio_metadata() {
        let metadata = AudioMetadata::new(48000, 2, "mp3".to_string())
            .unwrap()
            .with_duration(Duration::from_secs(60))
            .with_bits_per_sample(16);

        assert_eq!(metadata.sample_rate, 48000);
        assert_eq!(metadata.channels, 2);
        assert_eq!(metadata.duration_secs(), Some(60.0));
        assert_eq!(metadata.bits_per_sample, Some(16));
        assert!(AudioMetadata::new(0, 2, "mp3".to_string()).is_err());
    }
}
