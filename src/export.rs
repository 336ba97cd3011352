//! Export sinks for rendered artifacts and JSON text

use crate::error::{Error, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// MIME type of exported JSON files
pub const JSON_MIME: &str = "application/json;charset=utf-8";

/// Where exported files end up
#[async_trait]
pub trait ExportTarget: Send + Sync {
    /// Store `bytes` under `file_name`, returning where they were written.
    ///
    /// Failures are reported as [`Error::ExportFailed`].
    async fn save(&self, file_name: &str, mime: &str, bytes: &[u8]) -> Result<PathBuf>;
}

/// Writes exported files into a directory
#[derive(Debug, Clone)]
pub struct DirectoryTarget {
    dir: PathBuf,
}

impl DirectoryTarget {
    /// Target writing into `dir`; the directory is created on first save
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Output directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl ExportTarget for DirectoryTarget {
    async fn save(&self, file_name: &str, mime: &str, bytes: &[u8]) -> Result<PathBuf> {
        if file_name.is_empty() || file_name.contains(['/', '\\']) {
            return Err(Error::ExportFailed(format!(
                "Refusing to write invalid file name '{file_name}'"
            )));
        }

        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            Error::ExportFailed(format!(
                "Failed to create directory {}: {e}",
                self.dir.display()
            ))
        })?;

        let path = self.dir.join(file_name);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| Error::ExportFailed(format!("Failed to write {}: {e}", path.display())))?;

        tracing::info!(path = %path.display(), mime, bytes = bytes.len(), "Exported file");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_directory_target_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = DirectoryTarget::new(dir.path().join("nested"));

        let path = target.save("a.json", JSON_MIME, b"{}").await.unwrap();

        assert_eq!(path, dir.path().join("nested").join("a.json"));
        assert_eq!(std::fs::read(&path).unwrap(), b"{}");
    }

    #[tokio::test]
    async fn test_directory_target_rejects_path_separators() {
        let dir = tempfile::tempdir().unwrap();
        let target = DirectoryTarget::new(dir.path());

        let err = target.save("../escape.png", "image/png", b"").await.unwrap_err();
        assert!(matches!(err, Error::ExportFailed(_)));
    }

    #[tokio::test]
    async fn test_directory_target_reports_io_failure() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, b"not a directory").unwrap();
        let target = DirectoryTarget::new(&blocker);

        let err = target.save("a.png", "image/png", b"png").await.unwrap_err();
        assert!(matches!(err, Error::ExportFailed(_)));
    }
}
