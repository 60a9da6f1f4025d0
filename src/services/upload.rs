//! Upload service — stores image files under the public content directory.
//!
//! DESIGN
//! ======
//! Each upload is written as `<unix-millis>-<sanitized original name>` so
//! repeated uploads of the same file never collide and no client-chosen name
//! can escape the directory. The returned reference is the URL path the
//! router serves the directory under; the catalog stores it as an image
//! reference.
//!
//! ERROR HANDLING
//! ==============
//! The directory is created on demand. Any filesystem failure surfaces as
//! `UploadError::Io`, which the route maps to a 500.

#[cfg(test)]
#[path = "upload_test.rs"]
mod upload_test;

use std::path::{Path, PathBuf};

use axum::extract::multipart::MultipartError;
use tracing::info;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("no file uploaded")]
    MissingFile,
    #[error("malformed multipart body: {0}")]
    Multipart(#[from] MultipartError),
    #[error("upload i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Where uploads land on disk and the URL prefix they are served under.
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
    url_prefix: String,
    max_bytes: usize,
}

impl UploadStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, url_prefix: &str, max_bytes: usize) -> Self {
        Self { dir: dir.into(), url_prefix: url_prefix.trim_end_matches('/').to_owned(), max_bytes }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn url_prefix(&self) -> &str {
        &self.url_prefix
    }

    /// Largest accepted request body for the upload route.
    #[must_use]
    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Write `bytes` under a collision-resistant name derived from
    /// `original_name`. Returns the public path of the stored file.
    ///
    /// # Errors
    ///
    /// Returns `UploadError::Io` if the directory cannot be created or the
    /// file cannot be written.
    pub async fn save(&self, original_name: &str, bytes: &[u8]) -> Result<String, UploadError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let file_name = stored_file_name(now_millis(), original_name);
        tokio::fs::write(self.dir.join(&file_name), bytes).await?;

        let path = format!("{}/{file_name}", self.url_prefix);
        info!(%path, size = bytes.len(), "upload stored");
        Ok(path)
    }
}

// =============================================================================
// NAMING
// =============================================================================

/// Replace every character outside `[A-Za-z0-9.]` with `-`, one dash per
/// UTF-16 code unit so names match the ones the browser client produces.
#[must_use]
pub fn sanitize_file_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() || c == '.' {
            out.push(c);
        } else {
            out.extend(std::iter::repeat_n('-', c.len_utf16()));
        }
    }
    out
}

/// `<timestamp>-<sanitized name>`.
#[must_use]
pub fn stored_file_name(timestamp_ms: i128, original_name: &str) -> String {
    format!("{timestamp_ms}-{}", sanitize_file_name(original_name))
}

fn now_millis() -> i128 {
    time::OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000
}
