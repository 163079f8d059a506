use crate::core::AudioMetadata;
use crate::error::{AudioError, AudioResult};
use log::{debug, warn};
use std::fs::File;
use std::io::Cursor;
use std::path::Path;
use symphonia::core::audio::{AudioBuffer, Signal};
use symphonia::core::codecs::{CODEC_TYPE_NULL, DecoderOptions};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::{FormatOptions, FormatReader};
use symphonia::core::io::{MediaSource, MediaSourceStream};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// Symphonia-based audio decoder
pub struct SymphoniaDecoder {
    /// Container reader
    reader: Box<dyn FormatReader>,
    /// Codec decoder for the selected track
    decoder: Box<dyn symphonia::core::codecs::Decoder>,
    /// Track being decoded
    track_id: u32,
    /// Stream information
    metadata: AudioMetadata,
    /// Whether decoding is finished
    finished: bool,
}

impl SymphoniaDecoder {
    /// Create decoder from file path
    pub fn from_file<P: AsRef<Path>>(path: P) -> AudioResult<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;

        let mut hint = Hint::new();
        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            hint.with_extension(ext);
        }

        Self::from_source(Box::new(file), &hint)
    }

    /// Create decoder from an in-memory file (e.g. a dropped or uploaded file)
    pub fn from_bytes(data: Vec<u8>, extension_hint: Option<&str>) -> AudioResult<Self> {
        let mut hint = Hint::new();
        if let Some(ext) = extension_hint {
            hint.with_extension(ext);
        }

        Self::from_source(Box::new(Cursor::new(data)), &hint)
    }

    /// Create decoder from any media source
    pub fn from_source(source: Box<dyn MediaSource>, hint: &Hint) -> AudioResult<Self> {
        let mss = MediaSourceStream::new(source, Default::default());

        let probed = symphonia::default::get_probe()
            .format(hint, mss, &FormatOptions::default(), &MetadataOptions::default())
            .map_err(|e| AudioError::UnsupportedFormat(e.to_string()))?;

        let reader = probed.format;

        // Find the first audio track
        let track = reader
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
            .ok_or_else(|| AudioError::InvalidMetadata("No audio track found".to_string()))?;

        let track_id = track.id;
        let params = &track.codec_params;

        let sample_rate = params
            .sample_rate
            .ok_or_else(|| AudioError::InvalidMetadata("Unknown sample rate".to_string()))?;

        // Some containers only reveal the layout once a packet is decoded
        let channels = params.channels.map_or(0, |c| c.count() as u16);

        let codec = symphonia::default::get_codecs()
            .get_codec(params.codec)
            .map_or_else(|| "unknown".to_string(), |d| d.short_name.to_string());

        let mut metadata = AudioMetadata::new(sample_rate, channels, codec)?;
        if let Some(frames) = params.n_frames {
            metadata = metadata.with_duration(std::time::Duration::from_secs_f64(
                frames as f64 / sample_rate as f64,
            ));
        }
        if let Some(bits) = params.bits_per_sample {
            metadata = metadata.with_bits_per_sample(bits);
        }

        let decoder = symphonia::default::get_codecs()
            .make(params, &DecoderOptions::default())
            .map_err(|e| AudioError::DecodeError(e.to_string()))?;

        debug!(
            "Opened {} track {}: {} Hz, {} channels",
            metadata.codec, track_id, metadata.sample_rate, metadata.channels
        );

        Ok(SymphoniaDecoder {
            reader,
            decoder,
            track_id,
            metadata,
            finished: false,
        })
    }
}

impl super::Decoder for SymphoniaDecoder {
    fn metadata(&self) -> &AudioMetadata {
        &self.metadata
    }

    fn decode_packet(&mut self) -> AudioResult<Option<Vec<Vec<f32>>>> {
        if self.finished {
            return Ok(None);
        }

        loop {
            let packet = match self.reader.next_packet() {
                Ok(packet) => packet,
                Err(SymphoniaError::IoError(ref e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    self.finished = true;
                    return Ok(None);
                }
                Err(SymphoniaError::ResetRequired) => {
                    self.finished = true;
                    return Ok(None);
                }
                Err(e) => return Err(e.into()),
            };

            // Only process packets from our audio track
            if packet.track_id() != self.track_id {
                continue;
            }

            let decoded = match self.decoder.decode(&packet) {
                Ok(decoded) => decoded,
                Err(SymphoniaError::DecodeError(msg)) => {
                    warn!("Skipping corrupt packet: {}", msg);
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            let spec = *decoded.spec();
            let channel_count = spec.channels.count();
            if self.metadata.channels == 0 {
                self.metadata.channels = channel_count as u16;
            }

            let mut buffer = AudioBuffer::<f32>::new(decoded.capacity() as u64, spec);
            decoded.convert(&mut buffer);

            let planes = (0..channel_count).map(|c| buffer.chan(c).to_vec()).collect();
            return Ok(Some(planes));
        }
    }

    fn is_finished(&self) -> bool {
        self.finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::Decoder;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_wav(samples: &[i16], channels: u16, sample_rate: u32) -> NamedTempFile {
        let file = tempfile::Builder::new().suffix(".wav").tempfile().unwrap();
        let spec = hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(file.path(), spec).unwrap();
        for &s in samples {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();
        file
    }

    #[test]
    fn test_invalid_file() {
        let result = SymphoniaDecoder::from_file("/nonexistent/file.mp3");
        assert!(matches!(result, Err(AudioError::Io(_))));
    }

    #[test]
    fn test_garbage_bytes() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"definitely not audio").unwrap();

        assert!(SymphoniaDecoder::from_file(file.path()).is_err());
    }

    #[test]
    fn test_decode_stereo_wav() {
        // Interleaved L/R pairs
        let interleaved: Vec<i16> = (0..2000)
            .map(|i| if i % 2 == 0 { 16384 } else { -16384 })
            .collect();
        let file = write_wav(&interleaved, 2, 22050);

        let mut decoder = SymphoniaDecoder::from_file(file.path()).unwrap();
        assert_eq!(decoder.metadata().sample_rate, 22050);
        assert_eq!(decoder.metadata().channels, 2);
        assert_eq!(decoder.metadata().bits_per_sample, Some(16));

        let source = decoder.decode_all().unwrap();
        assert!(decoder.is_finished());
        assert_eq!(source.channel_count(), 2);
        assert_eq!(source.frame_count(), 1000);
        assert!(source.channel(0).unwrap().iter().all(|&s| (s - 0.5).abs() < 1e-4));
        assert!(source.channel(1).unwrap().iter().all(|&s| (s + 0.5).abs() < 1e-4));
    }

    #[test]
    fn test_decode_from_bytes() {
        let file = write_wav(&vec![0i16; 4410], 1, 44100);
        let bytes = std::fs::read(file.path()).unwrap();

        let mut decoder = SymphoniaDecoder::from_bytes(bytes, Some("wav")).unwrap();
        let duration = decoder.metadata().duration_secs().unwrap();
        assert!((duration - 0.1).abs() < 1e-9);

        let source = decoder.decode_all().unwrap();
        assert_eq!(source.frame_count(), 4410);
        assert_eq!(source.sample_rate(), 44100);
    }
}
