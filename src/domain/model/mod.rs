// Domain models - Core types and data structures

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::errors::{DomainError, ErrorKind};

/// Segment length used when the user does not pick one
pub const DEFAULT_SEGMENT_SECONDS: u32 = 80;

/// Length of one reel in whole seconds, always positive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentDuration(u32);

impl SegmentDuration {
    /// Create from a number of seconds, rejecting zero
    pub fn from_secs(seconds: u32) -> Result<Self, DomainError> {
        if seconds == 0 {
            return Err(DomainError::InvalidConfig(
                "Segment duration must be a positive number of seconds".to_string(),
            ));
        }
        Ok(Self(seconds))
    }

    /// Parse user text such as "80"
    pub fn parse(text: &str) -> Result<Self, DomainError> {
        let trimmed = text.trim();
        let value: i64 = trimmed.parse().map_err(|_| {
            DomainError::InvalidConfig(format!(
                "Segment duration must be a whole number of seconds, got '{}'",
                trimmed
            ))
        })?;

        if value <= 0 {
            return Err(DomainError::InvalidConfig(format!(
                "Segment duration must be positive, got {}",
                value
            )));
        }

        let seconds = u32::try_from(value).map_err(|_| {
            DomainError::InvalidConfig(format!("Segment duration {} is too large", value))
        })?;
        Self::from_secs(seconds)
    }

    pub fn as_secs(&self) -> u32 {
        self.0
    }

    pub fn as_secs_f64(&self) -> f64 {
        self.0 as f64
    }
}

impl Default for SegmentDuration {
    fn default() -> Self {
        Self(DEFAULT_SEGMENT_SECONDS)
    }
}

impl fmt::Display for SegmentDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

/// Output frame geometry for every reel of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetFrame {
    pub width: u32,
    pub height: u32,
}

impl TargetFrame {
    /// 9:16 portrait frame all reels are rendered into
    pub const REEL_720: TargetFrame = TargetFrame {
        width: 720,
        height: 1280,
    };
}

impl Default for TargetFrame {
    fn default() -> Self {
        Self::REEL_720
    }
}

impl fmt::Display for TargetFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// One planned reel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// 1-based position, used in file names and the "Part N" caption
    pub index: u32,
    /// Offset into the source in seconds
    pub start: f64,
    /// Requested length in seconds; the trim tool clamps the last one
    pub duration: f64,
}

impl Segment {
    /// Requested end offset (may lie past the end of the source)
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}

/// Ordered list of segments covering a source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentPlan {
    pub total_duration: f64,
    pub segment_duration: SegmentDuration,
    pub segments: Vec<Segment>,
}

impl SegmentPlan {
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    /// Length the last segment will actually have once clamped by the source end
    pub fn effective_duration(&self, segment: &Segment) -> f64 {
        (self.total_duration - segment.start).clamp(0.0, segment.duration)
    }
}

/// Everything a reel run needs, collected from the user
#[derive(Debug, Clone, PartialEq)]
pub struct ReelRequest {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub title: String,
    pub segment_duration: SegmentDuration,
}

impl ReelRequest {
    /// Create new reel request with validation
    pub fn new(
        input: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        title: impl Into<String>,
        segment_duration: &str,
    ) -> Result<Self, DomainError> {
        let segment_duration = SegmentDuration::parse(segment_duration)?;
        Self::with_duration(input, output_dir, title, segment_duration)
    }

    /// Create a request from an already validated duration
    pub fn with_duration(
        input: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        title: impl Into<String>,
        segment_duration: SegmentDuration,
    ) -> Result<Self, DomainError> {
        let input = input.into();
        let output_dir = output_dir.into();
        let title = title.into();

        if input.as_os_str().is_empty()
            || output_dir.as_os_str().is_empty()
            || title.is_empty()
        {
            return Err(DomainError::InvalidConfig(
                "Input file, output directory and title are all required".to_string(),
            ));
        }

        Ok(Self {
            input,
            output_dir,
            title,
            segment_duration,
        })
    }
}

/// Text and geometry burned onto one segment
#[derive(Debug, Clone, PartialEq)]
pub struct OverlaySpec {
    pub top_text: String,
    pub bottom_text: String,
    pub frame: TargetFrame,
    pub font_path: PathBuf,
    pub font_size: f32,
}

/// Result of one segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SegmentStatus {
    Succeeded { output: PathBuf },
    Failed { kind: ErrorKind, message: String },
}

/// Per-segment entry of a run report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentOutcome {
    pub index: u32,
    pub start: f64,
    pub duration: f64,
    #[serde(flatten)]
    pub status: SegmentStatus,
}

impl SegmentOutcome {
    pub fn succeeded(segment: &Segment, output: &Path) -> Self {
        Self {
            index: segment.index,
            start: segment.start,
            duration: segment.duration,
            status: SegmentStatus::Succeeded {
                output: output.to_path_buf(),
            },
        }
    }

    pub fn failed(segment: &Segment, error: &DomainError) -> Self {
        Self {
            index: segment.index,
            start: segment.start,
            duration: segment.duration,
            status: SegmentStatus::Failed {
                kind: error.kind(),
                message: error.to_string(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.status, SegmentStatus::Succeeded { .. })
    }
}

/// Machine-readable summary of a whole run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub source: PathBuf,
    pub output_dir: PathBuf,
    pub total_duration: f64,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// True when every planned segment produced its final file
    pub success: bool,
    pub segments: Vec<SegmentOutcome>,
}

impl RunReport {
    /// Close a run now, deriving the aggregate flag from `segments`
    pub fn finish(
        source: PathBuf,
        output_dir: PathBuf,
        total_duration: f64,
        started_at: DateTime<Utc>,
        segments: Vec<SegmentOutcome>,
    ) -> Self {
        Self {
            source,
            output_dir,
            total_duration,
            started_at,
            finished_at: Utc::now(),
            success: segments.iter().all(SegmentOutcome::is_success),
            segments,
        }
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn succeeded_count(&self) -> usize {
        self.segments.iter().filter(|s| s.is_success()).count()
    }

    /// Outcomes of the segments that did not complete
    pub fn failures(&self) -> Vec<&SegmentOutcome> {
        self.segments.iter().filter(|s| !s.is_success()).collect()
    }
}
