// Local filesystem adapter

use std::io::ErrorKind;
use std::path::Path;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::errors::*;
use crate::ports::*;

/// Filesystem adapter backed by `tokio::fs`
#[derive(Debug, Default)]
pub struct LocalFsAdapter;

impl LocalFsAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FsPort for LocalFsAdapter {
    async fn file_exists(&self, file_path: &Path) -> Result<bool, DomainError> {
        match tokio::fs::metadata(file_path).await {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(DomainError::Fs(format!(
                "Failed to stat {}: {}",
                file_path.display(),
                e
            ))),
        }
    }

    async fn create_directory(&self, dir_path: &Path) -> Result<(), DomainError> {
        tokio::fs::create_dir_all(dir_path).await.map_err(|e| {
            DomainError::Fs(format!(
                "Failed to create directory {}: {}",
                dir_path.display(),
                e
            ))
        })?;
        debug!("Output directory ready: {}", dir_path.display());
        Ok(())
    }

    async fn delete_file(&self, file_path: &Path) -> Result<(), DomainError> {
        match tokio::fs::remove_file(file_path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DomainError::Fs(format!(
                "Failed to delete {}: {}",
                file_path.display(),
                e
            ))),
        }
    }
}
