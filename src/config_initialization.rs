//! Configuration initialization and hierarchy management

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::adapters::toml_config::{AppConfig, TomlConfigAdapter};
use crate::cli::{Cli, Commands};

/// Build the effective configuration following precedence: CLI > Env > File > Defaults
pub fn load_configuration(cli: &Cli) -> Result<AppConfig> {
    let mut config = load_config_file(cli)?;

    let env_overrides = config
        .apply_env(|key| std::env::var(key).ok())
        .context("Invalid environment override")?;
    if env_overrides > 0 {
        info!("Applied {} environment variable overrides", env_overrides);
    }

    let cli_overrides = apply_cli_overrides(&mut config, cli);
    if cli_overrides > 0 {
        info!("Applied {} CLI configuration overrides", cli_overrides);
    }

    config.validate().context("Invalid configuration")?;
    debug!("Effective configuration: {:?}", config);
    Ok(config)
}

/// Explicit `--config` must load; otherwise the first default location present wins
fn load_config_file(cli: &Cli) -> Result<AppConfig> {
    if let Some(path) = &cli.config {
        return TomlConfigAdapter::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()));
    }

    for path in TomlConfigAdapter::default_config_paths() {
        if path.is_file() {
            return TomlConfigAdapter::load(&path)
                .with_context(|| format!("Failed to load config {}", path.display()));
        }
    }

    debug!("No configuration file found, using defaults");
    Ok(AppConfig::default())
}

/// Apply CLI argument overrides to configuration
fn apply_cli_overrides(config: &mut AppConfig, cli: &Cli) -> usize {
    let mut overrides = 0;

    if let Some(ffmpeg) = &cli.ffmpeg {
        config.tools.ffmpeg = ffmpeg.clone();
        overrides += 1;
    }
    if let Some(ffprobe) = &cli.ffprobe {
        config.tools.ffprobe = ffprobe.clone();
        overrides += 1;
    }

    if let Commands::Split(args) = &cli.command {
        if let Some(font) = &args.font {
            config.overlay.font_path = font.clone();
            overrides += 1;
        }
        if let Some(preset) = &args.preset {
            config.encoding.preset = preset.clone();
            overrides += 1;
        }
        if let Some(crf) = args.crf {
            config.encoding.crf = crf;
            overrides += 1;
        }
    }

    overrides
}
