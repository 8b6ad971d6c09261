//! Implements ExportPort by writing files into an export directory.

use crate::domain::DomainError;
use crate::ports::ExportPort;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Filesystem exporter. One file per export under `dir`.
pub struct FsExporter {
    dir: PathBuf,
}

impl FsExporter {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }
}

#[async_trait::async_trait]
impl ExportPort for FsExporter {
    /// Atomic write: temp file, sync_all, then rename over the target.
    /// A crash mid-write never leaves a truncated export behind.
    async fn write_export(&self, file_name: &str, contents: &str) -> Result<PathBuf, DomainError> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| DomainError::Export(format!("create export dir: {}", e)))?;

        let target = self.dir.join(file_name);
        let temp_path = self.dir.join(format!("{}.tmp", file_name));
        let mut f = fs::File::create(&temp_path)
            .await
            .map_err(|e| DomainError::Export(format!("create temp file: {}", e)))?;
        f.write_all(contents.as_bytes())
            .await
            .map_err(|e| DomainError::Export(format!("write temp file: {}", e)))?;
        f.sync_all()
            .await
            .map_err(|e| DomainError::Export(format!("sync temp file: {}", e)))?;
        drop(f);

        fs::rename(&temp_path, &target)
            .await
            .map_err(|e| DomainError::Export(format!("atomic rename failed: {}", e)))?;

        debug!(path = %target.display(), bytes = contents.len(), "export written");
        Ok(target)
    }
}
