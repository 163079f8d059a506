//! Destinations for encoded clips
//!
//! [`FileSink`] writes into a directory on the local filesystem.
//! [`DownloadSink`] keeps blobs in memory for a host UI to offer as
//! downloads or share targets.

use crate::core::{EncodedBlob, ExportFormat};
use crate::error::{AudioError, AudioResult};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// Something that accepts finished exports
pub trait ExportSink {
    /// Hand over an encoded clip under `file_name`
    fn deliver(&mut self, file_name: &str, blob: EncodedBlob) -> AudioResult<()>;
}

/// Default output name for a clip cut from `stem`
pub fn suggested_file_name(stem: &str, format: ExportFormat) -> String {
    let stem = stem.trim();
    let stem = if stem.is_empty() { "audio" } else { stem };
    format!("{}_trimmed.{}", stem, format.extension())
}

fn check_file_name(file_name: &str) -> AudioResult<()> {
    let plain = !file_name.is_empty()
        && file_name != "."
        && file_name != ".."
        && !file_name.contains(['/', '\\']);
    if plain {
        Ok(())
    } else {
        Err(AudioError::ConfigError(format!(
            "Export file name must be a plain file name, got {:?}",
            file_name
        )))
    }
}

/// Writes exports into a directory
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    /// Create a sink writing into `dir` (created on first delivery)
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        FileSink {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Path a delivery under `file_name` is written to
    pub fn path_for(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }
}

impl ExportSink for FileSink {
    fn deliver(&mut self, file_name: &str, blob: EncodedBlob) -> AudioResult<()> {
        check_file_name(file_name)?;
        fs::create_dir_all(&self.dir)?;

        let path = self.path_for(file_name);
        fs::write(&path, blob.data())?;

        info!("Wrote {} ({} bytes, {})", path.display(), blob.len(), blob.mime_type());
        Ok(())
    }
}

/// A pending download held in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    /// Suggested file name
    pub file_name: String,
    /// Encoded contents
    pub blob: EncodedBlob,
}

/// Collects exports in memory for a host to hand to the user
#[derive(Debug, Clone, Default)]
pub struct DownloadSink {
    downloads: Vec<Download>,
}

impl DownloadSink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Pending downloads in delivery order
    pub fn downloads(&self) -> &[Download] {
        &self.downloads
    }

    /// Remove and return all pending downloads
    pub fn take(&mut self) -> Vec<Download> {
        std::mem::take(&mut self.downloads)
    }
}

impl ExportSink for DownloadSink {
    fn deliver(&mut self, file_name: &str, blob: EncodedBlob) -> AudioResult<()> {
        check_file_name(file_name)?;
        self.downloads.push(Download {
            file_name: file_name.to_string(),
            blob,
        });
        Ok(())
    }
}
