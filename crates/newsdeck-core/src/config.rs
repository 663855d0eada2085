//! Configuration for provider credentials and dashboard defaults.
//!
//! Stored as TOML in the platform config directory. Environment variables
//! win over the file: `NEWSDECK_NEWS_API_KEY` and
//! `NEWSDECK_WEATHER_API_KEY` override the keys, `NEWSDECK_CONFIG_DIR`
//! relocates the file entirely (tests use this).
//!
//! ## Example configuration file
//!
//! ```toml
//! [keys]
//! news = "your-gnews-key"
//! weather = "your-openweather-key"
//!
//! [defaults]
//! category = "general"
//! location = "Bangalore"
//! units = "metric"
//! ```

use crate::compose::Units;
use crate::error::{Error, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Provider API keys.
    #[serde(default)]
    pub keys: KeysConfig,
    /// Dashboard defaults applied when the user has not chosen otherwise.
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Provider API keys.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeysConfig {
    /// News provider key, embedded in composed URLs as `apikey`.
    #[serde(default)]
    pub news: String,
    /// Weather provider key, embedded in composed URLs as `appid`.
    #[serde(default)]
    pub weather: String,
}

/// Dashboard defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Category shown when no search is active.
    #[serde(default = "default_category")]
    pub category: String,
    /// Location observed by the weather widget.
    #[serde(default = "default_location")]
    pub location: String,
    /// Temperature units.
    #[serde(default)]
    pub units: Units,
}

fn default_category() -> String {
    "general".to_string()
}

fn default_location() -> String {
    "Bangalore".to_string()
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            category: default_category(),
            location: default_location(),
            units: Units::Metric,
        }
    }
}

impl Config {
    /// Load configuration from the default location or create with defaults,
    /// then apply environment overrides.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let mut config = if path.exists() {
            let content = fs::read_to_string(&path)
                .map_err(|e| Error::Config(format!("failed to read config: {e}")))?;
            toml::from_str(&content)
                .map_err(|e| Error::Config(format!("failed to parse config: {e}")))?
        } else {
            Self::default()
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Save the configuration to the default location, creating parent
    /// directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::Config(format!("failed to create config directory: {e}")))?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)
            .map_err(|e| Error::Config(format!("failed to write config: {e}")))
    }

    /// Resolve the configuration file path, honoring `NEWSDECK_CONFIG_DIR`.
    pub fn config_path() -> Result<PathBuf> {
        if let Ok(dir) = std::env::var("NEWSDECK_CONFIG_DIR") {
            let trimmed = dir.trim();
            if !trimmed.is_empty() {
                return Ok(PathBuf::from(trimmed).join("config.toml"));
            }
        }

        let dirs = ProjectDirs::from("", "", "newsdeck")
            .ok_or_else(|| Error::Config("failed to determine config directory".into()))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("NEWSDECK_NEWS_API_KEY") {
            if !key.is_empty() {
                self.keys.news = key;
            }
        }
        if let Ok(key) = std::env::var("NEWSDECK_WEATHER_API_KEY") {
            if !key.is_empty() {
                self.keys.weather = key;
            }
        }
    }
}
