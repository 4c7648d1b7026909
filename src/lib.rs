//! reelx library
//!
//! Cuts a movie into fixed-length vertical reels: probe the duration, plan
//! the segments, then per segment transcode to 720x1280, burn the captions
//! in frame by frame and re-attach the audio.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod engine;
pub mod planner;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use domain::errors::{DomainError, ErrorKind};
pub use domain::model::{ReelRequest, RunReport, Segment, SegmentDuration, SegmentPlan};
