use super::pcm::quantize_i16;
use crate::core::{EncodedBlob, ExportFormat, ProcessedSamples};
use crate::error::{AudioError, AudioResult};
use log::debug;

/// Size of the canonical RIFF/WAVE header
pub const WAV_HEADER_SIZE: usize = 44;

const BITS_PER_SAMPLE: u16 = 16;
const BYTES_PER_SAMPLE: u16 = BITS_PER_SAMPLE / 8;
const FORMAT_PCM: u16 = 1;

/// Fields of a 16-bit PCM WAV header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct WavHeader {
    channels: u16,
    sample_rate: u32,
    block_align: u16,
    byte_rate: u32,
    data_size: u32,
}

impl WavHeader {
    fn for_samples(samples: &ProcessedSamples) -> AudioResult<Self> {
        // block_align is a u16 field, which caps the channel count
        let max_channels = u16::MAX / BYTES_PER_SAMPLE;
        let channels = u16::try_from(samples.channel_count())
            .ok()
            .filter(|&c| c <= max_channels)
            .ok_or(AudioError::InvalidChannels {
                expected: max_channels as u32,
                got: samples.channel_count() as u32,
            })?;

        let block_align = channels * BYTES_PER_SAMPLE;
        let sample_rate = samples.sample_rate();
        let byte_rate = sample_rate.checked_mul(block_align as u32).ok_or_else(|| {
            AudioError::BufferError(format!(
                "Byte rate for {} Hz x {} channels exceeds the WAV field size",
                sample_rate, channels
            ))
        })?;

        let data_size = samples.frame_count() as u64 * block_align as u64;
        // RIFF sizes are u32 and the chunk size adds 36 on top of the data
        let data_size = u32::try_from(data_size)
            .ok()
            .filter(|size| size.checked_add(36).is_some())
            .ok_or_else(|| {
                AudioError::BufferError(format!(
                    "{} bytes of PCM data exceed the WAV size limit",
                    data_size
                ))
            })?;

        Ok(WavHeader {
            channels,
            sample_rate,
            block_align,
            byte_rate,
            data_size,
        })
    }

    fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(b"RIFF");
        out.extend_from_slice(&(36 + self.data_size).to_le_bytes());
        out.extend_from_slice(b"WAVE");
        out.extend_from_slice(b"fmt ");
        out.extend_from_slice(&16u32.to_le_bytes());
        out.extend_from_slice(&FORMAT_PCM.to_le_bytes());
        out.extend_from_slice(&self.channels.to_le_bytes());
        out.extend_from_slice(&self.sample_rate.to_le_bytes());
        out.extend_from_slice(&self.byte_rate.to_le_bytes());
        out.extend_from_slice(&self.block_align.to_le_bytes());
        out.extend_from_slice(&BITS_PER_SAMPLE.to_le_bytes());
        out.extend_from_slice(b"data");
        out.extend_from_slice(&self.data_size.to_le_bytes());
    }
}

/// WAV encoder producing 16-bit interleaved PCM with a 44-byte header
#[derive(Debug, Clone, Copy, Default)]
pub struct WavEncoder;

impl WavEncoder {
    /// Create a new WAV encoder
    pub fn new() -> Self {
        WavEncoder
    }
}

impl super::Encoder for WavEncoder {
    fn format(&self) -> ExportFormat {
        ExportFormat::Wav
    }

    fn encode(&mut self, samples: &ProcessedSamples) -> AudioResult<EncodedBlob> {
        encode_wav(samples)
    }
}

/// Encode samples as a canonical 16-bit PCM WAV file
pub fn encode_wav(samples: &ProcessedSamples) -> AudioResult<EncodedBlob> {
    let header = WavHeader::for_samples(samples)?;

    let mut out = Vec::with_capacity(WAV_HEADER_SIZE + header.data_size as usize);
    header.write_to(&mut out);

    let channels: Vec<&[f32]> = samples.channels().collect();
    for frame in 0..samples.frame_count() {
        for channel in &channels {
            out.extend_from_slice(&quantize_i16(channel[frame]).to_le_bytes());
        }
    }

    debug!(
        "Encoded WAV: {} frames, {} channels, {} Hz, {} bytes",
        samples.frame_count(),
        header.channels,
        header.sample_rate,
        out.len()
    );

    Ok(EncodedBlob::new(out, ExportFormat::Wav))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::Encoder;
    use hound::WavReader;
    use std::io::Cursor;

    fn u16_at(bytes: &[u8], offset: usize) -> u16 {
        u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
    }

    fn u32_at(bytes: &[u8], offset: usize) -> u32 {
        u32::from_le_bytes([
            bytes[offset],
            bytes[offset + 1],
            bytes[offset + 2],
            bytes[offset + 3],
        ])
    }

    #[test]
    fn test_one_second_mono_silence() {
        let samples = ProcessedSamples::new(vec![vec![0.0; 44100]], 44100);
        let blob = encode_wav(&samples).unwrap();
        let bytes = blob.data();

        assert_eq!(blob.mime_type(), "audio/wav");
        assert_eq!(bytes.len(), 44 + 44100 * 2);
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(u32_at(bytes, 4), 36 + 88200);
        assert_eq!(&bytes[8..12], b"WAVE");
        assert_eq!(&bytes[12..16], b"fmt ");
        assert_eq!(u32_at(bytes, 16), 16);
        assert_eq!(u16_at(bytes, 20), 1);
        assert_eq!(u16_at(bytes, 22), 1);
        assert_eq!(u32_at(bytes, 24), 44100);
        assert_eq!(u32_at(bytes, 28), 88200);
        assert_eq!(u16_at(bytes, 32), 2);
        assert_eq!(u16_at(bytes, 34), 16);
        assert_eq!(&bytes[36..40], b"data");
        assert_eq!(u32_at(bytes, 40), 88200);
        assert!(bytes[44..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_interleaving_and_quantization() {
        let samples = ProcessedSamples::new(vec![vec![1.0, -1.0], vec![0.5, -0.5]], 8000);
        let blob = encode_wav(&samples).unwrap();
        let body = &blob.data()[WAV_HEADER_SIZE..];

        let decoded: Vec<i16> = body
            .chunks_exact(2)
            .map(|b| i16::from_le_bytes([b[0], b[1]]))
            .collect();
        assert_eq!(decoded, vec![32767, 16383, -32768, -16384]);

        // Block align and byte rate for stereo
        assert_eq!(u16_at(blob.data(), 32), 4);
        assert_eq!(u32_at(blob.data(), 28), 32000);
    }

    #[test]
    fn test_clamps_out_of_range_input() {
        let samples = ProcessedSamples::new(vec![vec![1.5, -3.0]], 8000);
        let blob = encode_wav(&samples).unwrap();
        let body = &blob.data()[WAV_HEADER_SIZE..];

        assert_eq!(i16::from_le_bytes([body[0], body[1]]), 32767);
        assert_eq!(i16::from_le_bytes([body[2], body[3]]), -32768);
    }

    #[test]
    fn test_multichannel_header_stays_canonical() {
        let samples = ProcessedSamples::new(vec![vec![0.0; 10]; 6], 48000);
        let blob = encode_wav(&samples).unwrap();

        assert_eq!(blob.len(), 44 + 10 * 6 * 2);
        assert_eq!(u16_at(blob.data(), 22), 6);
        assert_eq!(u16_at(blob.data(), 32), 12);
    }

    #[test]
    fn test_too_many_channels_rejected() {
        // 32768 channels would need a block align of 65536
        let samples = ProcessedSamples::new(vec![Vec::new(); 32768], 8000);
        assert!(matches!(
            encode_wav(&samples),
            Err(AudioError::InvalidChannels {
                expected: 32767,
                got: 32768
            })
        ));

        let samples = ProcessedSamples::new(vec![Vec::new(); 32767], 8000);
        let blob = encode_wav(&samples).unwrap();
        assert_eq!(u16_at(blob.data(), 32), 65534);
    }

    #[test]
    fn test_byte_rate_overflow_rejected() {
        let samples = ProcessedSamples::new(vec![Vec::new(); 8], u32::MAX / 4);
        assert!(matches!(encode_wav(&samples), Err(AudioError::BufferError(_))));
    }

    #[test]
    fn test_empty_clip() {
        let samples = ProcessedSamples::new(vec![Vec::new(), Vec::new()], 44100);
        let blob = encode_wav(&samples).unwrap();

        assert_eq!(blob.len(), WAV_HEADER_SIZE);
        assert_eq!(u32_at(blob.data(), 40), 0);
    }

    #[test]
    fn test_readable_by_hound() {
        let left: Vec<f32> = (0..100).map(|i| (i as f32 / 50.0) - 1.0).collect();
        let right: Vec<f32> = left.iter().map(|s| -s).collect();
        let samples = ProcessedSamples::new(vec![left.clone(), right.clone()], 22050);

        let mut encoder = WavEncoder::new();
        assert_eq!(encoder.format(), ExportFormat::Wav);
        let blob = encoder.encode(&samples).unwrap();

        let mut reader = WavReader::new(Cursor::new(blob.into_data())).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 2);
        assert_eq!(spec.sample_rate, 22050);
        assert_eq!(spec.bits_per_sample, 16);
        assert_eq!(spec.sample_format, hound::SampleFormat::Int);

        let decoded: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(decoded.len(), 200);
        assert_eq!(decoded[0], quantize_i16(left[0]));
        assert_eq!(decoded[1], quantize_i16(right[0]));
        assert_eq!(decoded[199], quantize_i16(right[99]));
    }

    #[test]
    fn test_deterministic_output() {
        let data: Vec<f32> = (0..1000).map(|i| ((i as f32) * 0.05).sin()).collect();
        let samples = ProcessedSamples::new(vec![data.clone(), data], 16000);

        assert_eq!(encode_wav(&samples).unwrap(), encode_wav(&samples).unwrap());
    }
}
