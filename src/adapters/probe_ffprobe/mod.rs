//! FFprobe adapter for media duration probing
//!
//! Asks ffprobe for the container-level duration only, printed as plain
//! decimal text on stdout.

use std::path::Path;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::errors::*;
use crate::ports::*;
use crate::utils::process::run_tool;

/// FFprobe-based probe adapter
pub struct FfprobeAdapter {
    program: String,
}

impl FfprobeAdapter {
    /// Create new FFprobe adapter
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Arguments requesting `format=duration` as bare text
    pub fn probe_args(file_path: &Path) -> Vec<String> {
        vec![
            "-v".to_string(),
            "error".to_string(),
            "-show_entries".to_string(),
            "format=duration".to_string(),
            "-of".to_string(),
            "default=noprint_wrappers=1:nokey=1".to_string(),
            file_path.to_string_lossy().into_owned(),
        ]
    }

    /// Parse ffprobe's stdout into seconds
    pub fn parse_duration(stdout: &str) -> Result<f64, DomainError> {
        let text = stdout.trim();
        let seconds: f64 = text
            .parse()
            .map_err(|_| DomainError::Probe(format!("Unexpected ffprobe output: '{}'", text)))?;

        if !seconds.is_finite() || seconds < 0.0 {
            return Err(DomainError::Probe(format!(
                "ffprobe reported an invalid duration: {}",
                text
            )));
        }
        Ok(seconds)
    }
}

#[async_trait]
impl ProbePort for FfprobeAdapter {
    async fn probe_duration(&self, file_path: &Path) -> Result<f64, DomainError> {
        debug!("Probing duration of {}", file_path.display());

        let output = run_tool(&self.program, &Self::probe_args(file_path))
            .await
            .map_err(|e| DomainError::Probe(format!("Failed to run {}: {}", self.program, e)))?;

        if !output.success() {
            return Err(DomainError::Probe(output.failure_summary(&self.program)));
        }

        let seconds = Self::parse_duration(&output.stdout)?;
        info!("Total video duration: {:.2} seconds", seconds);
        Ok(seconds)
    }
}
