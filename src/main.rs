//! reelx - movie to vertical reels
//!
//! Splits a long video into fixed-length 9:16 reels with the title burned in
//! at the top and a "Part N" label at the bottom.
//!
//! # Usage
//!
//! ```bash
//! reelx split --input movie.mp4 --output-dir reels --title "My Movie"
//! reelx plan --input movie.mp4 --segment-duration 60
//! reelx probe --input movie.mp4
//! ```

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use reelx_cli::cli::{commands, Cli, Commands};
use reelx_cli::config_initialization::load_configuration;

/// Main entry point for the reelx CLI application
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    cli.logging()
        .initialize()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    info!("Starting reelx v{}", env!("CARGO_PKG_VERSION"));
    let config = load_configuration(&cli)?;

    match cli.command {
        Commands::Split(args) => commands::split(args, &config).await,
        Commands::Plan(args) => commands::plan(args, &config).await,
        Commands::Probe(args) => commands::probe(args, &config).await,
    }
}
