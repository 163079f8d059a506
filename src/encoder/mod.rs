//! Audio encoder implementations

/// LAME-backed MP3 compressor
#[cfg(feature = "lame")]
pub mod lame;
/// MP3 encoding through a block compressor
pub mod mp3;
/// Float to 16-bit PCM conversion
pub mod pcm;
/// Canonical 16-bit PCM WAV encoding
pub mod wav;

#[cfg(feature = "lame")]
pub use lame::LameFactory;
pub use mp3::{BlockCompressor, CompressorFactory, Mp3Encoder, encode_mp3};
pub use wav::{WavEncoder, encode_wav};

use crate::core::{EncodedBlob, ExportFormat, ProcessedSamples};
use crate::error::AudioResult;

/// Trait for audio encoders
pub trait Encoder {
    /// Container format this encoder produces
    fn format(&self) -> ExportFormat;

    /// Encode a complete clip into a blob
    fn encode(&mut self, samples: &ProcessedSamples) -> AudioResult<EncodedBlob>;
}

/// Build the encoder for `format`
///
/// `compressor` and `bitrate_kbps` only apply to MP3; a missing compressor
/// surfaces when encoding starts.
pub fn for_format<'a>(
    format: ExportFormat,
    compressor: Option<&'a dyn CompressorFactory>,
    bitrate_kbps: u32,
) -> Box<dyn Encoder + 'a> {
    match format {
        ExportFormat::Wav => Box::new(WavEncoder::new()),
        ExportFormat::Mp3 => Box::new(Mp3Encoder::new(compressor).with_bitrate(bitrate_kbps)),
    }
}

/// The compressor built into this binary, if any
pub fn default_compressor() -> Option<&'static dyn CompressorFactory> {
    #[cfg(feature = "lame")]
    {
        static LAME: LameFactory = LameFactory;
        Some(&LAME)
    }
    #[cfg(not(feature = "lame"))]
    {
        None
    }
}
