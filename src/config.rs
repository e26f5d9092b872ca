//! Configuration file handling with TOML support.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Application configuration loaded from TOML file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Backend API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Display settings
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Backend API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the dashboard backend that hosts /reminders/parse
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    crate::api::DEFAULT_BASE_URL.to_string()
}

/// Display settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Show non-active (triggered/expired/cancelled) reminders in listings
    #[serde(default = "default_true")]
    pub show_past: bool,

    /// Show the stats footer (active / triggered / unread counts)
    #[serde(default = "default_true")]
    pub show_stats: bool,

    /// Print absolute timestamps instead of "2h ago" style ages
    #[serde(default)]
    pub absolute_times: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_past: true,
            show_stats: true,
            absolute_times: false,
        }
    }
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from file.
    pub fn load(path: &PathBuf) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load configuration from default location or create default.
    pub fn load_or_default() -> Self {
        if let Some(path) = Self::default_config_path() {
            if path.exists() {
                match Self::load(&path) {
                    Ok(config) => return config,
                    Err(e) => {
                        eprintln!("Warning: Failed to load config: {}", e);
                    }
                }
            }
        }
        Config::default()
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("remindtop").join("config.toml"))
    }

    /// Write the commented sample configuration to the given path.
    pub fn write_sample(path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        fs::write(path, sample_config())
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }
}

/// Generate a sample configuration file content.
pub fn sample_config() -> &'static str {
    r##"# Remindtop Configuration File
# A terminal client for natural-language stock reminders

[api]
# Base URL of the dashboard backend (hosts POST /reminders/parse).
# When unreachable, reminders are parsed locally with the regex grammar.
base_url = "http://127.0.0.1:8000"

[display]
# Show triggered/expired/cancelled reminders in listings
show_past = true
# Show the stats footer (active / triggered / unread counts)
show_stats = true
# Print absolute timestamps instead of relative ages
absolute_times = false
"##
}
