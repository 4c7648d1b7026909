// Domain errors - Error types for the domain layer

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Domain-specific error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Configuration rejected before any work started
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Duration lookup failed
    #[error("Failed to probe media duration: {0}")]
    Probe(String),

    /// Segment extraction failed
    #[error("Segment transcode failed: {0}")]
    Transcode(String),

    /// Frame decode, draw or encode failed while burning the overlay
    #[error("Overlay rendering failed: {0}")]
    Overlay(String),

    /// Audio extraction or final multiplexing failed
    #[error("Audio/video mux failed: {0}")]
    Mux(String),

    /// Overlay font could not be opened or parsed
    #[error("Failed to load overlay font: {0}")]
    FontLoad(String),

    /// File system operation failed
    #[error("File system error: {0}")]
    Fs(String),
}

impl DomainError {
    /// Machine-readable kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::InvalidConfig(_) => ErrorKind::InvalidConfig,
            DomainError::Probe(_) => ErrorKind::Probe,
            DomainError::Transcode(_) => ErrorKind::Transcode,
            DomainError::Overlay(_) => ErrorKind::Overlay,
            DomainError::Mux(_) => ErrorKind::Mux,
            DomainError::FontLoad(_) => ErrorKind::FontLoad,
            DomainError::Fs(_) => ErrorKind::Fs,
        }
    }

    /// Whether the error stops the whole run rather than a single segment
    pub fn is_run_fatal(&self) -> bool {
        !matches!(
            self,
            DomainError::Transcode(_) | DomainError::Overlay(_) | DomainError::Mux(_)
        )
    }
}

/// Serializable error classification used in run reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidConfig,
    Probe,
    Transcode,
    Overlay,
    Mux,
    FontLoad,
    Fs,
}

impl From<std::io::Error> for DomainError {
    fn from(err: std::io::Error) -> Self {
        DomainError::Fs(err.to_string())
    }
}
