// TOML config adapter - Configuration management using TOML files

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::errors::*;

/// Font used for captions when nothing else is configured
pub const DEFAULT_FONT_PATH: &str = "arial.ttf";

/// Caption size in pixels; tied to the 720x1280 reel frame
pub const FONT_SIZE: f32 = 50.0;

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub tools: ToolsConfig,
    pub overlay: OverlayConfig,
    pub encoding: EncodingConfig,
}

/// External binaries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub ffmpeg: String,
    pub ffprobe: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            ffmpeg: "ffmpeg".to_string(),
            ffprobe: "ffprobe".to_string(),
        }
    }
}

/// Caption font
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub font_path: PathBuf,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            font_path: PathBuf::from(DEFAULT_FONT_PATH),
        }
    }
}

/// Encoder parameters shared by every ffmpeg invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodingConfig {
    pub preset: String,
    pub crf: u8,
    pub audio_bitrate: String,
}

impl Default for EncodingConfig {
    fn default() -> Self {
        Self {
            preset: "medium".to_string(),
            crf: 23,
            audio_bitrate: "192k".to_string(),
        }
    }
}

/// TOML configuration adapter
pub struct TomlConfigAdapter;

impl TomlConfigAdapter {
    /// Parse configuration from a TOML string
    pub fn parse(toml_content: &str) -> Result<AppConfig, DomainError> {
        toml::from_str(toml_content)
            .map_err(|e| DomainError::InvalidConfig(format!("Failed to parse TOML config: {}", e)))
    }

    /// Load configuration from file
    pub fn load(file_path: &Path) -> Result<AppConfig, DomainError> {
        let content = std::fs::read_to_string(file_path).map_err(|e| {
            DomainError::InvalidConfig(format!(
                "Failed to read config file {}: {}",
                file_path.display(),
                e
            ))
        })?;

        let config = Self::parse(&content)?;
        info!("Loaded configuration from {}", file_path.display());
        Ok(config)
    }

    /// Locations searched when no config file is given explicitly
    pub fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("reelx.toml")];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("reelx").join("config.toml"));
        }
        paths
    }
}

impl AppConfig {
    /// Override values from environment variables, looked up through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<usize, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut overrides = 0;

        if let Some(value) = lookup("REELX_FFMPEG") {
            self.tools.ffmpeg = value;
            overrides += 1;
        }
        if let Some(value) = lookup("REELX_FFPROBE") {
            self.tools.ffprobe = value;
            overrides += 1;
        }
        if let Some(value) = lookup("REELX_FONT") {
            self.overlay.font_path = PathBuf::from(value);
            overrides += 1;
        }
        if let Some(value) = lookup("REELX_PRESET") {
            self.encoding.preset = value;
            overrides += 1;
        }
        if let Some(value) = lookup("REELX_CRF") {
            self.encoding.crf = value
                .trim()
                .parse()
                .map_err(|e| DomainError::InvalidConfig(format!("Invalid REELX_CRF value: {}", e)))?;
            overrides += 1;
        }

        Ok(overrides)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.tools.ffmpeg.trim().is_empty() || self.tools.ffprobe.trim().is_empty() {
            return Err(DomainError::InvalidConfig(
                "Tool paths cannot be empty".to_string(),
            ));
        }
        if self.encoding.preset.trim().is_empty() {
            return Err(DomainError::InvalidConfig(
                "Encoding preset cannot be empty".to_string(),
            ));
        }
        if self.encoding.crf > 51 {
            return Err(DomainError::InvalidConfig(
                "CRF value cannot exceed 51".to_string(),
            ));
        }
        if self.encoding.audio_bitrate.trim().is_empty() {
            return Err(DomainError::InvalidConfig(
                "Audio bitrate cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.tools.ffmpeg, "ffmpeg");
        assert_eq!(config.tools.ffprobe, "ffprobe");
        assert_eq!(config.overlay.font_path, PathBuf::from("arial.ttf"));
        assert_eq!(config.encoding.crf, 23);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = TomlConfigAdapter::parse(
            r#"
            [tools]
            ffmpeg = "/opt/ffmpeg/bin/ffmpeg"

            [encoding]
            crf = 18
            "#,
        )
        .unwrap();

        assert_eq!(config.tools.ffmpeg, "/opt/ffmpeg/bin/ffmpeg");
        assert_eq!(config.tools.ffprobe, "ffprobe");
        assert_eq!(config.encoding.crf, 18);
        assert_eq!(config.encoding.preset, "medium");
    }

    #[test]
    fn test_invalid_toml() {
        let err = TomlConfigAdapter::parse("[tools\nffmpeg=").unwrap_err();
        assert!(matches!(err, DomainError::InvalidConfig(_)));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("REELX_FFMPEG", "/usr/local/bin/ffmpeg"),
            ("REELX_FONT", "/fonts/DejaVuSans.ttf"),
            ("REELX_CRF", "20"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        let applied = config
            .apply_env(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(applied, 3);
        assert_eq!(config.tools.ffmpeg, "/usr/local/bin/ffmpeg");
        assert_eq!(config.overlay.font_path, PathBuf::from("/fonts/DejaVuSans.ttf"));
        assert_eq!(config.encoding.crf, 20);
    }

    #[test]
    fn test_env_bad_crf() {
        let mut config = AppConfig::default();
        let result = config.apply_env(|key| (key == "REELX_CRF").then(|| "high".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_crf_over_51() {
        let mut config = AppConfig::default();
        config.encoding.crf = 52;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let result = TomlConfigAdapter::load(Path::new("/definitely/missing/reelx.toml"));
        assert!(result.is_err());
    }
}
