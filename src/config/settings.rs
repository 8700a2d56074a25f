//! Application configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use progress_arc_core::ANIMATION_FRAME_MS;

/// Current config format version
pub const CONFIG_VERSION: u32 = 1;

/// What the CLI emits once the animation settles
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Final markup fragment
    #[default]
    Html,
    /// Final render state (config + geometry + display) as JSON
    Json,
    /// One JSON line per animation frame patch
    Frames,
    /// Rasterised ring (requires the `cairo` feature)
    Png,
}

/// Application-wide configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Version of the config format
    #[serde(default = "default_version")]
    pub version: u32,
    /// Attributes applied before any given on the command line
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    /// Simulated frame interval in milliseconds
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,
    /// Output used when none is given on the command line
    #[serde(default)]
    pub output_format: OutputFormat,
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

fn default_frame_interval_ms() -> u64 {
    ANIMATION_FRAME_MS
}

impl AppConfig {
    /// Load configuration from disk
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            log::debug!("No config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from_path(&config_path)
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        self.save_to_path(&config_path)
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("com", "progress-arc", "progress-arc")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.json"))
    }

    /// Load configuration from a specific file path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        if config.version > CONFIG_VERSION {
            log::warn!(
                "Config {} has version {}, newer than supported {}",
                path.display(),
                config.version,
                CONFIG_VERSION
            );
        }
        Ok(config)
    }

    /// Save configuration to a specific file path
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config {}", path.display()))?;
        Ok(())
    }

    /// Frame interval as a duration; zero is raised to one millisecond
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms.max(1))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            attributes: BTreeMap::new(),
            frame_interval_ms: default_frame_interval_ms(),
            output_format: OutputFormat::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: AppConfig =
            serde_json::from_str(r##"{"attributes": {"color": "#ff0000"}}"##).unwrap();
        assert_eq!(config.version, CONFIG_VERSION);
        assert_eq!(config.frame_interval_ms, 16);
        assert_eq!(config.output_format, OutputFormat::Html);
        assert_eq!(config.attributes.get("color").map(String::as_str), Some("#ff0000"));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = std::env::temp_dir().join(format!("progress-arc-test-{}", std::process::id()));
        let path = dir.join("nested").join("config.json");

        let mut config = AppConfig::default();
        config.attributes.insert("percentage".to_string(), "42".to_string());
        config.output_format = OutputFormat::Frames;
        config.save_to_path(&path).unwrap();

        let loaded = AppConfig::load_from_path(&path).unwrap();
        assert_eq!(loaded, config);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let path = std::env::temp_dir().join("progress-arc-does-not-exist.json");
        let err = AppConfig::load_from_path(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to read config"));
    }

    #[test]
    fn test_zero_frame_interval() {
        let config = AppConfig {
            frame_interval_ms: 0,
            ..AppConfig::default()
        };
        assert_eq!(config.frame_interval(), Duration::from_millis(1));
    }
}
