//! Configuration management for apptracker.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::application::RenderOptions;
use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "apptracker";

/// Default data file name.
const DATA_FILE_NAME: &str = "transfer_apps.json";

/// Upper bound for fixed cost precision.
const MAX_COST_DECIMALS: usize = 10;

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `APPTRACKER_`, nested keys split on `__`)
/// 2. TOML config file at `~/.config/apptracker/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Display configuration.
    pub display: DisplayConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the data file.
    /// Defaults to `~/.local/share/apptracker/transfer_apps.json`
    pub data_file: Option<PathBuf>,
}

/// How application blocks are rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Fixed number of decimal places for costs.
    /// Unset means shortest form with at least one fractional digit.
    pub cost_decimals: Option<usize>,
    /// Text shown for dates that were never entered.
    pub empty_date: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            cost_decimals: None,
            empty_date: "null".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// `config_path` replaces the default config file location when given.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file).nested())
            .merge(Env::prefixed("APPTRACKER_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if let Some(decimals) = self.display.cost_decimals {
            if decimals > MAX_COST_DECIMALS {
                return Err(Error::ConfigValidation {
                    message: format!(
                        "cost_decimals ({decimals}) cannot be greater than {MAX_COST_DECIMALS}"
                    ),
                });
            }
        }

        if self.display.empty_date.is_empty() {
            return Err(Error::ConfigValidation {
                message: "empty_date must not be an empty string".to_string(),
            });
        }

        Ok(())
    }

    /// Get the data file path, resolving defaults if not set.
    #[must_use]
    pub fn data_file(&self) -> PathBuf {
        self.storage
            .data_file
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATA_FILE_NAME))
    }

    /// Rendering options derived from the display section.
    #[must_use]
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            cost_decimals: self.display.cost_decimals,
            empty_date: self.display.empty_date.clone(),
        }
    }
}
