//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;

use crate::domain::model::DEFAULT_SEGMENT_SECONDS;

/// Arguments for the split command
#[derive(Args, Debug)]
pub struct SplitArgs {
    /// Source video file
    #[arg(short, long)]
    pub input: PathBuf,

    /// Directory that receives reel_part_N.mp4 files
    #[arg(short, long)]
    pub output_dir: PathBuf,

    /// Caption burned at the top of every reel
    #[arg(short, long)]
    pub title: String,

    /// Length of each reel in whole seconds
    #[arg(short = 'd', long, default_value_t = DEFAULT_SEGMENT_SECONDS.to_string())]
    pub segment_duration: String,

    /// TrueType/OpenType font for the captions
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// x264 preset
    #[arg(long)]
    pub preset: Option<String>,

    /// Constant Rate Factor (0-51)
    #[arg(long)]
    pub crf: Option<u8>,

    /// Print the run report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the plan command
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Source video file
    #[arg(short, long)]
    pub input: PathBuf,

    /// Length of each reel in whole seconds
    #[arg(short = 'd', long, default_value_t = DEFAULT_SEGMENT_SECONDS.to_string())]
    pub segment_duration: String,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the probe command
#[derive(Args, Debug)]
pub struct ProbeArgs {
    /// Source video file
    #[arg(short, long)]
    pub input: PathBuf,
}
