use super::pcm::quantize_channel;
use crate::core::{EncodedBlob, ExportFormat, ProcessedSamples};
use crate::error::{AudioError, AudioResult};
use log::debug;

/// Frames per MPEG-1 Layer III frame; blocks are submitted at this size
pub const MP3_FRAME_SIZE: usize = 1152;

/// Bitrate used when none is configured
pub const DEFAULT_BITRATE_KBPS: u32 = 128;

/// A block-oriented MP3 compressor
///
/// Accepts 16-bit PCM one block at a time and returns whatever compressed
/// bytes are ready. Output may lag input; `flush` drains the remainder.
pub trait BlockCompressor {
    /// Compress one block; `right` is `None` for mono
    fn encode_block(&mut self, left: &[i16], right: Option<&[i16]>) -> AudioResult<Vec<u8>>;

    /// Drain any buffered compressed data
    fn flush(&mut self) -> AudioResult<Vec<u8>>;
}

/// Constructs compressors for a given stream layout
pub trait CompressorFactory {
    /// Create a compressor for `channels` (1 or 2) at `sample_rate`
    fn create(
        &self,
        channels: u16,
        sample_rate: u32,
        bitrate_kbps: u32,
    ) -> AudioResult<Box<dyn BlockCompressor>>;
}

/// MP3 encoder driving an injected block compressor
pub struct Mp3Encoder<'a> {
    factory: Option<&'a dyn CompressorFactory>,
    bitrate_kbps: u32,
}

impl<'a> Mp3Encoder<'a> {
    /// Create an encoder; `None` means no compressor is available
    pub fn new(factory: Option<&'a dyn CompressorFactory>) -> Self {
        Mp3Encoder {
            factory,
            bitrate_kbps: DEFAULT_BITRATE_KBPS,
        }
    }

    /// Set the target bitrate in kbps
    pub fn with_bitrate(mut self, bitrate_kbps: u32) -> Self {
        self.bitrate_kbps = bitrate_kbps;
        self
    }

    /// Get the target bitrate in kbps
    pub fn bitrate_kbps(&self) -> u32 {
        self.bitrate_kbps
    }
}

impl std::fmt::Debug for Mp3Encoder<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mp3Encoder")
            .field("has_compressor", &self.factory.is_some())
            .field("bitrate_kbps", &self.bitrate_kbps)
            .finish()
    }
}

impl super::Encoder for Mp3Encoder<'_> {
    fn format(&self) -> ExportFormat {
        ExportFormat::Mp3
    }

    fn encode(&mut self, samples: &ProcessedSamples) -> AudioResult<EncodedBlob> {
        let factory = self.factory.ok_or_else(|| {
            AudioError::DependencyUnavailable("no MP3 compressor is loaded".to_string())
        })?;

        // Compressor handles mono or stereo only; extra channels are dropped
        let channels = samples.channel_count().min(2);
        if channels == 0 {
            return Err(AudioError::InvalidChannels {
                expected: 1,
                got: 0,
            });
        }

        let pcm: Vec<Vec<i16>> = samples.channels().take(channels).map(quantize_channel).collect();
        let left = &pcm[0];
        let right = pcm.get(1);

        let mut compressor =
            factory.create(channels as u16, samples.sample_rate(), self.bitrate_kbps)?;

        let mut chunks: Vec<Vec<u8>> = Vec::new();
        let mut blocks = 0usize;
        for start in (0..left.len()).step_by(MP3_FRAME_SIZE) {
            let end = (start + MP3_FRAME_SIZE).min(left.len());
            let chunk = compressor
                .encode_block(&left[start..end], right.map(|r| &r[start..end]))
                .map_err(mid_stream_failure)?;
            if !chunk.is_empty() {
                chunks.push(chunk);
            }
            blocks += 1;
        }

        let tail = compressor.flush().map_err(mid_stream_failure)?;
        if !tail.is_empty() {
            chunks.push(tail);
        }

        let data = chunks.concat();

        debug!(
            "Encoded MP3: {} frames in {} blocks, {} of {} channels, {} kbps, {} bytes",
            left.len(),
            blocks,
            channels,
            samples.channel_count(),
            self.bitrate_kbps,
            data.len()
        );

        Ok(EncodedBlob::new(data, ExportFormat::Mp3))
    }
}

/// Encode samples as MP3 at the default bitrate
pub fn encode_mp3(
    samples: &ProcessedSamples,
    factory: Option<&dyn CompressorFactory>,
) -> AudioResult<EncodedBlob> {
    use super::Encoder;
    Mp3Encoder::new(factory).encode(samples)
}

fn mid_stream_failure(err: AudioError) -> AudioError {
    match err {
        AudioError::EncodingFailure(_) => err,
        other => AudioError::EncodingFailure(other.to_string()),
    }
}
