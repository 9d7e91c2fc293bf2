//! # Configuration Management
//!
//! This module loads the renderer configuration from `tide-card.toml`: where
//! the assets live, how tide times are printed, and where the compact layout
//! puts its weather icon.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration file name, looked up in the working directory
pub const CONFIG_FILE: &str = "tide-card.toml";

/// Renderer configuration loaded from `tide-card.toml`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    pub assets: AssetConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
}

/// Static asset location
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AssetConfig {
    /// Root holding `templates/`, `icons/` and `fonts/`
    pub dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RenderConfig {
    /// `chrono` format string for the vertical tide-time labels
    pub clock_format: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            clock_format: "%H:%M".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct LayoutConfig {
    /// Top-left corner of the weather icon on compact cards.
    /// Absent means compact cards carry no icon.
    pub compact_icon: Option<(i32, i32)>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            assets: AssetConfig {
                dir: PathBuf::from("assets"),
            },
            render: RenderConfig::default(),
            layout: LayoutConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from `tide-card.toml`
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load() -> Self {
        Self::load_from_path(CONFIG_FILE)
    }

    /// Load configuration from specified path
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<Config>(&contents) {
                Ok(config) => {
                    tracing::info!(
                        path = %path.display(),
                        assets = %config.assets.dir.display(),
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Invalid config file format, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                tracing::info!(path = %path.display(), "No config file found, using defaults");
                Self::default()
            }
        }
    }

    /// Save configuration as pretty-printed TOML
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path.as_ref(), contents)?;
        tracing::info!(path = %path.as_ref().display(), "Configuration saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.assets.dir, PathBuf::from("assets"));
        assert_eq!(config.render.clock_format, "%H:%M");
        assert_eq!(config.layout.compact_icon, None);
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.layout.compact_icon = Some((700, 20));

        let file = NamedTempFile::new().unwrap();
        config.save_to_path(file.path()).unwrap();
        let loaded = Config::load_from_path(file.path());

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_section_defaults() {
        let file = NamedTempFile::new().unwrap();
        fs::write(file.path(), "[assets]\ndir = \"/srv/tide-card\"\n").unwrap();

        let config = Config::load_from_path(file.path());
        assert_eq!(config.assets.dir, PathBuf::from("/srv/tide-card"));
        assert_eq!(config.render, RenderConfig::default());
        assert_eq!(config.layout.compact_icon, None);
    }

    #[test]
    fn test_invalid_file_falls_back() {
        let file = NamedTempFile::new().unwrap();
        fs::write(file.path(), "assets = 3").unwrap();
        assert_eq!(Config::load_from_path(file.path()), Config::default());
    }

    #[test]
    fn test_load_nonexistent_file() {
        let config = Config::load_from_path("/nonexistent/path");
        assert_eq!(config, Config::default());
    }
}
