//! Decoding of input files into [`AudioSource`]s

/// Symphonia-backed decoder
pub mod symphonia;

pub use symphonia::SymphoniaDecoder;

use crate::core::{AudioMetadata, AudioSource};
use crate::error::{AudioError, AudioResult};
use std::path::Path;

/// Trait for audio decoders
pub trait Decoder: Send {
    /// Stream information known so far
    fn metadata(&self) -> &AudioMetadata;

    /// Decode the next packet into planar channels, `None` at end of stream
    fn decode_packet(&mut self) -> AudioResult<Option<Vec<Vec<f32>>>>;

    /// Check if decoder is finished
    fn is_finished(&self) -> bool;

    /// Decode the remaining stream into a single source
    fn decode_all(&mut self) -> AudioResult<AudioSource> {
        let mut channels: Vec<Vec<f32>> = Vec::new();

        while let Some(planes) = self.decode_packet()? {
            if channels.is_empty() {
                channels = vec![Vec::new(); planes.len()];
            }

            if planes.len() != channels.len() {
                return Err(AudioError::InvalidChannels {
                    expected: channels.len() as u32,
                    got: planes.len() as u32,
                });
            }

            for (channel, plane) in channels.iter_mut().zip(planes) {
                channel.extend(plane);
            }
        }

        if channels.is_empty() {
            return Err(AudioError::DecodeError("Stream contained no audio".to_string()));
        }

        AudioSource::new(channels, self.metadata().sample_rate)
    }
}

/// Create a decoder from a file path
pub fn from_file<P: AsRef<Path>>(path: P) -> AudioResult<Box<dyn Decoder>> {
    SymphoniaDecoder::from_file(path).map(|d| Box::new(d) as Box<dyn Decoder>)
}

/// Read stream information without decoding samples
pub fn probe<P: AsRef<Path>>(path: P) -> AudioResult<AudioMetadata> {
    SymphoniaDecoder::from_file(path).map(|d| d.metadata().clone())
}

/// Decode a whole file into memory
pub fn load_source<P: AsRef<Path>>(path: P) -> AudioResult<AudioSource> {
    from_file(path)?.decode_all()
}
