use std::path::{Path, PathBuf};

use axum::body::Bytes;
use axum::extract::Multipart;
use tempfile::TempDir;
use tracing::{debug, warn};

use crate::asr::AudioFormat;
use crate::error::{AppError, ValidationError};

/// Form field carrying the audio file.
pub const AUDIO_FIELD: &str = "audio_file";

/// A validated audio upload, held in memory until stored.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub format: AudioFormat,
    pub bytes: Bytes,
}

impl UploadedFile {
    /// Pull the audio field out of a multipart body and validate it.
    ///
    /// Fields other than [`AUDIO_FIELD`] are skipped. Validation happens before
    /// the file content is read.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        while let Some(field) = multipart.next_field().await? {
            if field.name() != Some(AUDIO_FIELD) {
                continue;
            }

            // Browsers send an empty filename when nothing was picked
            let filename = field.file_name().unwrap_or_default().to_string();
            let format = validate_filename(&filename)?;
            let bytes = field.bytes().await?;
            debug!("Received {} ({} bytes)", filename, bytes.len());

            return Ok(Self {
                filename,
                format,
                bytes,
            });
        }

        Err(ValidationError::NoFileUploaded.into())
    }

    pub fn extension(&self) -> &'static str {
        self.format.extension()
    }

    /// Name used on disk. The client filename is only logged: it may be too long,
    /// contain NUL or path separators.
    pub fn stored_name(&self) -> String {
        format!("upload.{}", self.extension())
    }
}

/// Lowercase suffix after the last `.`, if any.
pub fn extension_of(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
}

pub fn validate_filename(filename: &str) -> Result<AudioFormat, ValidationError> {
    if filename.is_empty() {
        return Err(ValidationError::NoFileSelected);
    }
    extension_of(filename)
        .and_then(|ext| AudioFormat::from_extension(&ext))
        .ok_or(ValidationError::UnsupportedFormat)
}

/// Creates one private temporary directory per upload.
#[derive(Debug, Clone, Default)]
pub struct UploadStore {
    parent: Option<PathBuf>,
}

impl UploadStore {
    pub fn new(parent: Option<PathBuf>) -> Self {
        Self { parent }
    }

    pub async fn store(&self, upload: &UploadedFile) -> std::io::Result<StoredUpload> {
        let builder = {
            let mut b = tempfile::Builder::new();
            b.prefix("transcribe-");
            b
        };
        let dir = match &self.parent {
            Some(parent) => builder.tempdir_in(parent)?,
            None => builder.tempdir()?,
        };

        // The directory is unique per request, so a fixed file name cannot collide.
        let path = dir.path().join(upload.stored_name());
        tokio::fs::write(&path, &upload.bytes).await?;
        debug!("Stored {} at {}", upload.filename, path.display());

        Ok(StoredUpload { dir, path })
    }
}

/// An upload written to disk. The directory is removed when this is dropped or closed.
#[derive(Debug)]
pub struct StoredUpload {
    dir: TempDir,
    path: PathBuf,
}

impl StoredUpload {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn close(self) {
        let dir = self.dir.path().to_path_buf();
        if let Err(e) = self.dir.close() {
            warn!("Failed to remove temporary directory {}: {}", dir.display(), e);
        }
    }
}
