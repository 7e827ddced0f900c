//! Upload staging area.
//!
//! Incoming uploads are written to a unique file under the staging
//! directory before being pushed to the object store. Staged files must
//! never accumulate: [`StagedFile::remove`] is called on every exit path
//! of the upload pipeline, and `Drop` deletes the file as a backstop if
//! the explicit removal was skipped (e.g. an early `?` return).

use std::path::{Path, PathBuf};

use bytes::Bytes;
use tokio::fs;
use tracing::warn;
use uuid::Uuid;

use nimbus_core::error::{AppError, ErrorKind};
use nimbus_core::result::AppResult;

/// The directory uploads are staged into.
#[derive(Debug, Clone)]
pub struct StagingArea {
    dir: PathBuf,
}

impl StagingArea {
    /// Create the staging area, creating the directory if needed.
    pub async fn new(dir: &str) -> AppResult<Self> {
        let dir = PathBuf::from(dir);
        fs::create_dir_all(&dir).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create staging directory: {}", dir.display()),
                e,
            )
        })?;
        Ok(Self { dir })
    }

    /// Write an upload body to a fresh staging file.
    pub async fn stage(&self, data: &[u8]) -> AppResult<StagedFile> {
        let path = self.dir.join(format!("{}.part", Uuid::new_v4()));
        fs::write(&path, data).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to stage upload: {}", path.display()),
                e,
            )
        })?;
        Ok(StagedFile { path })
    }

    /// The staging directory path.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

/// A file staged on local disk, deleted when removed or dropped.
#[derive(Debug)]
pub struct StagedFile {
    path: PathBuf,
}

impl StagedFile {
    /// Path of the staged file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the staged file fully into memory.
    pub async fn read(&self) -> AppResult<Bytes> {
        let data = fs::read(&self.path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to read staged upload: {}", self.path.display()),
                e,
            )
        })?;
        Ok(Bytes::from(data))
    }

    /// Delete the staged file. Failures other than the file already being
    /// gone are logged, never surfaced: cleanup must not mask the
    /// pipeline's own result.
    pub async fn remove(mut self) {
        let path = std::mem::take(&mut self.path);
        std::mem::forget(self);
        if let Err(e) = fs::remove_file(&path).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %path.display(), error = %e, "Failed to remove staging file");
            }
        }
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        if !self.path.as_os_str().is_empty() {
            let _ = std::fs::remove_file(&self.path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn staged_count(dir: &Path) -> usize {
        let mut entries = fs::read_dir(dir).await.unwrap();
        let mut count = 0;
        while entries.next_entry().await.unwrap().is_some() {
            count += 1;
        }
        count
    }

    #[tokio::test]
    async fn test_stage_read_remove() {
        let dir = tempfile::tempdir().unwrap();
        let area = StagingArea::new(dir.path().to_str().unwrap()).await.unwrap();

        let staged = area.stage(b"payload").await.unwrap();
        assert_eq!(staged.read().await.unwrap(), Bytes::from("payload"));
        assert_eq!(staged_count(area.dir()).await, 1);

        staged.remove().await;
        assert_eq!(staged_count(area.dir()).await, 0);
    }

    #[tokio::test]
    async fn test_drop_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let area = StagingArea::new(dir.path().to_str().unwrap()).await.unwrap();

        {
            let _staged = area.stage(b"payload").await.unwrap();
            assert_eq!(staged_count(area.dir()).await, 1);
        }
        assert_eq!(staged_count(area.dir()).await, 0);
    }

    #[tokio::test]
    async fn test_remove_is_idempotent_about_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let area = StagingArea::new(dir.path().to_str().unwrap()).await.unwrap();

        let staged = area.stage(b"payload").await.unwrap();
        fs::remove_file(staged.path()).await.unwrap();
        staged.remove().await;
    }
}
