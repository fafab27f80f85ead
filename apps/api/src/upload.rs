use std::path::PathBuf;

use axum::extract::multipart::{Field, MultipartError};
use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

use crate::config::Config;

/// Content types accepted for CV uploads, paired with the extension used for
/// the stored file.
const ALLOWED_TYPES: &[(&str, &str)] = &[
    ("application/pdf", "pdf"),
    ("application/msword", "doc"),
    (
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "docx",
    ),
];

/// Distinct rejection causes, so callers and tests can tell a missing file
/// from a disallowed type from an oversize upload.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Missing fields or file")]
    Missing,

    #[error("Unsupported file type: {0}")]
    InvalidType(String),

    #[error("File exceeds the {limit_mb} MB upload limit")]
    TooLarge { limit_mb: u64 },

    #[error("Malformed upload stream: {0}")]
    Stream(#[from] MultipartError),

    #[error("Failed to store upload: {0}")]
    Io(#[from] std::io::Error),
}

/// Upload constraints and destination directory, built once at startup.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    dir: PathBuf,
    max_bytes: u64,
    limit_mb: u64,
}

/// A validated CV buffered in memory. Nothing is durable yet.
#[derive(Debug)]
pub struct ReceivedCv {
    extension: &'static str,
    data: Vec<u8>,
}

/// A CV committed to the upload directory.
#[derive(Debug)]
pub struct StoredCv {
    pub path: PathBuf,
    pub size: u64,
}

impl UploadPolicy {
    pub fn new(dir: impl Into<PathBuf>, max_mb: u64) -> Self {
        Self {
            dir: dir.into(),
            max_bytes: max_mb * 1024 * 1024,
            limit_mb: max_mb,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.upload_dir, config.upload_max_mb)
    }

    /// Checks the declared content type against the allow-list, then buffers
    /// the field while enforcing the size ceiling. Nothing touches disk here,
    /// so rejection can never leave a partial file behind.
    pub async fn receive(&self, mut field: Field<'_>) -> Result<ReceivedCv, UploadError> {
        let declared = field.content_type().unwrap_or_default().to_string();
        let extension =
            allowed_extension(&declared).ok_or_else(|| UploadError::InvalidType(declared.clone()))?;

        let mut data = Vec::new();
        while let Some(chunk) = field.chunk().await? {
            if (data.len() + chunk.len()) as u64 > self.max_bytes {
                return Err(UploadError::TooLarge {
                    limit_mb: self.limit_mb,
                });
            }
            data.extend_from_slice(&chunk);
        }

        if data.is_empty() {
            return Err(UploadError::Missing);
        }

        Ok(ReceivedCv { extension, data })
    }

    /// Writes a received CV under a collision-resistant generated name and
    /// returns the stored path. The client-supplied filename is never used as
    /// the storage key.
    pub async fn store(&self, cv: ReceivedCv) -> Result<StoredCv, UploadError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let name = format!("{}.{}", Uuid::new_v4(), cv.extension);
        let path = self.dir.join(name);
        tokio::fs::write(&path, &cv.data).await?;

        Ok(StoredCv {
            path,
            size: cv.data.len() as u64,
        })
    }
}

/// Removes a stored CV after a downstream failure. Best effort: a leftover
/// file is logged, never surfaced to the client.
pub async fn discard(stored: &StoredCv) {
    if let Err(err) = tokio::fs::remove_file(&stored.path).await {
        warn!(path = %stored.path.display(), "failed to remove orphaned upload: {err}");
    }
}

fn allowed_extension(content_type: &str) -> Option<&'static str> {
    ALLOWED_TYPES
        .iter()
        .find(|(ct, _)| *ct == content_type)
        .map(|(_, ext)| *ext)
}
