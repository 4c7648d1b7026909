// Ports - Interface definitions (contracts)

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::errors::*;
use crate::domain::model::*;

/// Port for media duration probing
#[async_trait]
pub trait ProbePort: Send + Sync {
    /// Container-level duration of the file in seconds
    async fn probe_duration(&self, file_path: &Path) -> Result<f64, DomainError>;
}

/// Parameters for cutting one segment out of the source
#[derive(Debug, Clone, PartialEq)]
pub struct TranscodeRequest {
    pub source: PathBuf,
    pub start: f64,
    pub duration: f64,
    pub frame: TargetFrame,
    pub output: PathBuf,
}

/// Port for the external transcoding tool
#[async_trait]
pub trait MediaToolPort: Send + Sync {
    /// Trim, scale and pad one segment into an intermediate clip
    async fn transcode_segment(&self, request: &TranscodeRequest) -> Result<PathBuf, DomainError>;

    /// Copy the audio track of `clip` into a standalone file
    async fn extract_audio(&self, clip: &Path, output: &Path) -> Result<PathBuf, DomainError>;

    /// Combine a video-only file with an audio file into the final container
    async fn mux(&self, video: &Path, audio: &Path, output: &Path) -> Result<PathBuf, DomainError>;
}

/// Summary of a finished overlay pass
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayReport {
    pub output: PathBuf,
    pub frames: u64,
    pub frame_rate: f64,
}

/// Port for burning captions into every frame of a clip
#[async_trait]
pub trait OverlayPort: Send + Sync {
    /// Render `spec` onto `input`, writing a video-only file to `output`
    async fn render_overlay(
        &self,
        input: &Path,
        output: &Path,
        spec: &OverlaySpec,
    ) -> Result<OverlayReport, DomainError>;
}

/// Port for file system operations
#[async_trait]
pub trait FsPort: Send + Sync {
    /// Check if file exists
    async fn file_exists(&self, file_path: &Path) -> Result<bool, DomainError>;

    /// Create directory (including parent directories)
    async fn create_directory(&self, dir_path: &Path) -> Result<(), DomainError>;

    /// Delete file; a missing file is not an error
    async fn delete_file(&self, file_path: &Path) -> Result<(), DomainError>;
}
