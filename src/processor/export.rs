use super::extract::extract;
use crate::core::{AudioSource, EncodedBlob, ExportFormat, FadeSpec, TimeRange};
use crate::encoder::{self, CompressorFactory, mp3::DEFAULT_BITRATE_KBPS};
use crate::error::{AudioError, AudioResult};
use log::info;

/// Output options for a clip export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportSettings {
    /// Container format
    pub format: ExportFormat,
    /// MP3 bitrate in kbps (ignored for WAV)
    pub mp3_bitrate_kbps: u32,
}

impl ExportSettings {
    /// Settings for `format` at the default MP3 bitrate
    pub fn new(format: ExportFormat) -> Self {
        ExportSettings {
            format,
            mp3_bitrate_kbps: DEFAULT_BITRATE_KBPS,
        }
    }

    /// Set the MP3 bitrate
    pub fn with_bitrate(mut self, kbps: u32) -> Self {
        self.mp3_bitrate_kbps = kbps;
        self
    }
}

/// Trim, fade and encode a clip in one pass
///
/// The intermediate sample buffers are released before the blob is
/// returned. An MP3 export without a compressor fails before any samples
/// are touched.
pub fn export_clip(
    source: &AudioSource,
    range: &TimeRange,
    fade: &FadeSpec,
    settings: &ExportSettings,
    compressor: Option<&dyn CompressorFactory>,
) -> AudioResult<EncodedBlob> {
    if settings.format == ExportFormat::Mp3 && compressor.is_none() {
        return Err(AudioError::DependencyUnavailable(
            "no MP3 compressor is loaded".to_string(),
        ));
    }

    let samples = extract(source, range, fade)?;
    let mut encoder = encoder::for_format(settings.format, compressor, settings.mp3_bitrate_kbps);
    let blob = encoder.encode(&samples)?;
    drop(samples);

    info!(
        "Exported {:.3}s to {:.3}s as {} ({} bytes)",
        range.start,
        range.end,
        blob.mime_type(),
        blob.len()
    );

    Ok(blob)
}
