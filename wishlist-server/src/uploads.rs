//! Item image uploads
//!
//! Files land in `<public_dir>/uploads/` under a generated
//! `<unix-millis>-<random>.<ext>` name and are served back from
//! `/uploads/<name>`. No size or type checks.

use std::path::{Path, PathBuf};

use chrono::Utc;
use rand::Rng;
use tokio::fs;

/// Sub-directory of the public dir holding uploads
pub const UPLOADS_DIR: &str = "uploads";

/// Upload error type
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("failed to store upload {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Disk location for uploaded images
#[derive(Debug, Clone)]
pub struct UploadStore {
    public_dir: PathBuf,
}

impl UploadStore {
    pub fn new(public_dir: impl Into<PathBuf>) -> Self {
        Self {
            public_dir: public_dir.into(),
        }
    }

    /// Directory served as static files
    pub fn public_dir(&self) -> &Path {
        &self.public_dir
    }

    /// Directory uploads are written to
    pub fn uploads_dir(&self) -> PathBuf {
        self.public_dir.join(UPLOADS_DIR)
    }

    /// Write an uploaded file, returning its web path (`/uploads/<name>`).
    pub async fn save(&self, original_name: &str, bytes: &[u8]) -> Result<String, UploadError> {
        let dir = self.uploads_dir();
        fs::create_dir_all(&dir)
            .await
            .map_err(|source| UploadError::Io { path: dir.clone(), source })?;

        let file_name = unique_file_name(original_name);
        let path = dir.join(&file_name);
        fs::write(&path, bytes)
            .await
            .map_err(|source| UploadError::Io { path: path.clone(), source })?;

        tracing::info!(path = %path.display(), size = bytes.len(), "Stored upload");
        Ok(format!("/{}/{}", UPLOADS_DIR, file_name))
    }
}

/// Generate `<unix-millis>-<random>[.<ext>]`, keeping the original extension.
pub fn unique_file_name(original_name: &str) -> String {
    let millis = Utc::now().timestamp_millis();
    let suffix: u32 = rand::thread_rng().gen_range(0..=1_000_000_000);

    match extension(original_name) {
        Some(ext) => format!("{}-{}.{}", millis, suffix, ext),
        None => format!("{}-{}", millis, suffix),
    }
}

/// Extension of the last path component; dotfiles like `.env` have none.
fn extension(original_name: &str) -> Option<&str> {
    let base = original_name.rsplit(['/', '\\']).next().unwrap_or(original_name);
    match base.rfind('.') {
        Some(idx) if idx > 0 && idx + 1 < base.len() => Some(&base[idx + 1..]),
        _ => None,
    }
}
