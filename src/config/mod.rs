//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/geosuggest/config.toml

pub mod defaults;

use crate::error::{Error, Result};
use crate::geo::{BoundingBox, Point};
use defaults::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Geocoder widget settings
    #[serde(default)]
    pub geocoder: GeocoderConfig,

    /// CLI output settings
    #[serde(default)]
    pub output: OutputConfig,
}

/// Geocoder widget settings
///
/// Supplied by the owner of a widget and never mutated by it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocoderConfig {
    /// API base URL; endpoint paths are appended to it
    #[serde(default = "default_url")]
    pub url: String,

    /// Source filter sent with search and autocomplete
    #[serde(default = "default_sources")]
    pub sources: String,

    /// API key. Sent even when empty.
    #[serde(default)]
    pub api_key: String,

    /// Autocomplete debounce delay in milliseconds
    #[serde(default = "default_fetch_delay_ms")]
    pub fetch_delay_ms: u64,

    /// Focus point for autocomplete and fallback point for reverse geocoding
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<Point>,

    /// Restricts autocomplete and reverse results
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<BoundingBox>,
}

/// CLI output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format
    #[serde(default = "default_format")]
    pub format: String,
}

// Default value functions for serde
fn default_url() -> String {
    DEFAULT_URL.to_string()
}
fn default_sources() -> String {
    DEFAULT_SOURCES.to_string()
}
fn default_fetch_delay_ms() -> u64 {
    DEFAULT_FETCH_DELAY_MS
}
fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            sources: default_sources(),
            api_key: String::new(),
            fetch_delay_ms: default_fetch_delay_ms(),
            center: None,
            bounds: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

impl GeocoderConfig {
    /// Debounce delay as a `Duration`
    pub fn fetch_delay(&self) -> Duration {
        Duration::from_millis(self.fetch_delay_ms)
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path
    ///
    /// Creates default config if file doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from a specific path, creating it if missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)
                .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

            toml::from_str(&content)
                .map_err(|e| Error::Config(format!("Failed to parse config file: {}", e)))
        } else {
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, content)
            .map_err(|e| Error::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key". Unset optional values read as "".
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["geocoder", "url"] => Some(self.geocoder.url.clone()),
            ["geocoder", "sources"] => Some(self.geocoder.sources.clone()),
            ["geocoder", "api_key"] => Some(self.geocoder.api_key.clone()),
            ["geocoder", "fetch_delay_ms"] => Some(self.geocoder.fetch_delay_ms.to_string()),
            ["geocoder", "center"] => Some(
                self.geocoder
                    .center
                    .map(|c| c.to_string())
                    .unwrap_or_default(),
            ),
            ["geocoder", "bounds"] => Some(
                self.geocoder
                    .bounds
                    .map(|b| b.to_string())
                    .unwrap_or_default(),
            ),

            ["output", "format"] => Some(self.output.format.clone()),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// An empty value unsets `geocoder.center` and `geocoder.bounds`.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["geocoder", "url"] => {
                self.geocoder.url = value.to_string();
            }
            ["geocoder", "sources"] => {
                self.geocoder.sources = value.to_string();
            }
            ["geocoder", "api_key"] => {
                self.geocoder.api_key = value.to_string();
            }
            ["geocoder", "fetch_delay_ms"] => {
                self.geocoder.fetch_delay_ms = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid delay value: {}", value))
                })?;
            }
            ["geocoder", "center"] => {
                self.geocoder.center = if value.is_empty() {
                    None
                } else {
                    Some(value.parse()?)
                };
            }
            ["geocoder", "bounds"] => {
                self.geocoder.bounds = if value.is_empty() {
                    None
                } else {
                    Some(value.parse()?)
                };
            }

            ["output", "format"] => {
                self.output.format = value.to_string();
            }

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "geocoder.url",
            "geocoder.sources",
            "geocoder.api_key",
            "geocoder.fetch_delay_ms",
            "geocoder.center",
            "geocoder.bounds",
            "output.format",
        ]
    }
}
