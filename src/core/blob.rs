use crate::error::AudioError;
use std::fmt;
use std::str::FromStr;

/// Container format of an exported clip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// 16-bit PCM WAV
    Wav,
    /// MPEG-1 Layer III
    Mp3,
}

impl ExportFormat {
    /// MIME type tag attached to encoded blobs
    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Wav => "audio/wav",
            ExportFormat::Mp3 => "audio/mp3",
        }
    }

    /// File extension without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Wav => "wav",
            ExportFormat::Mp3 => "mp3",
        }
    }

    /// Look up a format by file extension (case-insensitive)
    pub fn from_extension(ext: &str) -> Option<Self> {
        if ext.eq_ignore_ascii_case("wav") || ext.eq_ignore_ascii_case("wave") {
            Some(ExportFormat::Wav)
        } else if ext.eq_ignore_ascii_case("mp3") {
            Some(ExportFormat::Mp3)
        } else {
            None
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = AudioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_extension(s.trim_start_matches('.'))
            .ok_or_else(|| AudioError::UnsupportedFormat(s.to_string()))
    }
}

/// Encoded file contents plus the MIME type they were produced as
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedBlob {
    data: Vec<u8>,
    format: ExportFormat,
}

impl EncodedBlob {
    /// Wrap encoded bytes
    pub fn new(data: Vec<u8>, format: ExportFormat) -> Self {
        EncodedBlob { data, format }
    }

    /// Get the encoded bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Get owned bytes (consumes blob)
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Get the container format
    pub fn format(&self) -> ExportFormat {
        self.format
    }

    /// Get the MIME type tag
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    /// Get size in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if blob is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
