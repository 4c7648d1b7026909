//! CLI module for reelx
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::utils::logging::{LogFormat, LogLevel, LoggingConfig};

pub mod args;
pub mod commands;

/// reelx - cut a movie into captioned vertical reels
///
/// Every reel is scaled and padded to 720x1280, gets the title burned in at
/// the top and "Part N" at the bottom, and keeps the source audio.
#[derive(Parser, Debug)]
#[command(name = "reelx")]
#[command(about = "Cut a movie into captioned 9:16 reels")]
#[command(version)]
pub struct Cli {
    /// Logging level (overridden by RUST_LOG)
    #[arg(long, value_enum, default_value_t = LogLevel::Info, global = true)]
    pub log_level: LogLevel,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty, global = true)]
    pub log_format: LogFormat,

    /// Configuration file (TOML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// ffmpeg binary to run
    #[arg(long, global = true)]
    pub ffmpeg: Option<String>,

    /// ffprobe binary to run
    #[arg(long, global = true)]
    pub ffprobe: Option<String>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn logging(&self) -> LoggingConfig {
        LoggingConfig::new(self.log_level, self.log_format)
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Split a video into captioned reels
    Split(args::SplitArgs),
    /// Show how a video would be split without encoding anything
    Plan(args::PlanArgs),
    /// Print the duration of a video in seconds
    Probe(args::ProbeArgs),
}
