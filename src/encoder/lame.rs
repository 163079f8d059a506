use super::mp3::{BlockCompressor, CompressorFactory};
use crate::error::{AudioError, AudioResult};
use mp3lame_encoder::{Bitrate, Builder, DualPcm, FlushNoGap, MonoPcm, Quality};

// LAME's documented worst case for a final flush
const FLUSH_BUFFER_SIZE: usize = 7200;

/// Compressor factory backed by libmp3lame
#[derive(Debug, Clone, Copy, Default)]
pub struct LameFactory;

impl LameFactory {
    /// Create a LAME factory
    pub fn new() -> Self {
        LameFactory
    }
}

fn bitrate_for(kbps: u32) -> AudioResult<Bitrate> {
    Ok(match kbps {
        8 => Bitrate::Kbps8,
        16 => Bitrate::Kbps16,
        24 => Bitrate::Kbps24,
        32 => Bitrate::Kbps32,
        40 => Bitrate::Kbps40,
        48 => Bitrate::Kbps48,
        64 => Bitrate::Kbps64,
        80 => Bitrate::Kbps80,
        96 => Bitrate::Kbps96,
        112 => Bitrate::Kbps112,
        128 => Bitrate::Kbps128,
        160 => Bitrate::Kbps160,
        192 => Bitrate::Kbps192,
        224 => Bitrate::Kbps224,
        256 => Bitrate::Kbps256,
        320 => Bitrate::Kbps320,
        other => {
            return Err(AudioError::ConfigError(format!(
                "Unsupported MP3 bitrate: {} kbps",
                other
            )));
        }
    })
}

impl CompressorFactory for LameFactory {
    fn create(
        &self,
        channels: u16,
        sample_rate: u32,
        bitrate_kbps: u32,
    ) -> AudioResult<Box<dyn BlockCompressor>> {
        if !(1..=2).contains(&channels) {
            return Err(AudioError::InvalidChannels {
                expected: 2,
                got: channels as u32,
            });
        }

        let mut builder = Builder::new().ok_or_else(|| {
            AudioError::DependencyUnavailable("LAME encoder could not be allocated".to_string())
        })?;

        let config_error = |e| AudioError::ConfigError(format!("LAME rejected setting: {:?}", e));
        builder.set_num_channels(channels as u8).map_err(config_error)?;
        builder.set_sample_rate(sample_rate).map_err(config_error)?;
        builder.set_brate(bitrate_for(bitrate_kbps)?).map_err(config_error)?;
        builder.set_quality(Quality::Best).map_err(config_error)?;

        let encoder = builder.build().map_err(|e| {
            AudioError::EncodingFailure(format!("LAME initialisation failed: {:?}", e))
        })?;

        Ok(Box::new(LameCompressor { encoder }))
    }
}

struct LameCompressor {
    encoder: mp3lame_encoder::Encoder,
}

impl BlockCompressor for LameCompressor {
    fn encode_block(&mut self, left: &[i16], right: Option<&[i16]>) -> AudioResult<Vec<u8>> {
        let mut out = Vec::with_capacity(mp3lame_encoder::max_required_buffer_size(left.len()));
        let written = match right {
            Some(right) => self.encoder.encode_to_vec(DualPcm { left, right }, &mut out),
            None => self.encoder.encode_to_vec(MonoPcm(left), &mut out),
        };
        written.map_err(|e| AudioError::EncodingFailure(format!("{:?}", e)))?;
        Ok(out)
    }

    fn flush(&mut self) -> AudioResult<Vec<u8>> {
        let mut out = Vec::with_capacity(FLUSH_BUFFER_SIZE);
        self.encoder
            .flush_to_vec::<FlushNoGap>(&mut out)
            .map_err(|e| AudioError::EncodingFailure(format!("{:?}", e)))?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ProcessedSamples;
    use crate::encoder::encode_mp3;

    #[test]
    fn test_unsupported_bitrate() {
        assert!(bitrate_for(128).is_ok());
        assert!(matches!(bitrate_for(100), Err(AudioError::ConfigError(_))));
    }

    #[test]
    fn test_encodes_sine_to_frames() {
        let tone: Vec<f32> = (0..44100)
            .map(|i| (i as f32 * 440.0 * std::f32::consts::TAU / 44100.0).sin() * 0.5)
            .collect();
        let samples = ProcessedSamples::new(vec![tone.clone(), tone], 44100);

        let blob = encode_mp3(&samples, Some(&LameFactory::new())).unwrap();

        assert!(!blob.is_empty());
        // Frame sync word
        let data = blob.data();
        assert!(data.windows(2).any(|w| w[0] == 0xFF && w[1] & 0xE0 == 0xE0));
    }
}
