//! Configuration management for airvalue.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default configuration directory name.
const CONFIG_DIR_NAME: &str = "airvalue";

/// Public WAQI station search endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.waqi.info/search/";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `AIRVALUE_`, `__` between levels)
/// 2. TOML config file at `~/.config/airvalue/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Station directory configuration.
    pub lookup: LookupConfig,
    /// Cost estimate configuration.
    pub estimate: EstimateConfig,
}

/// Station directory configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    /// Search endpoint of the station directory.
    pub endpoint: String,
    /// API token sent as the `token` query parameter.
    /// Never shipped with the binary; supply it at runtime.
    pub token: Option<String>,
    /// Queries with this many characters or fewer never reach the network.
    pub min_query_chars: usize,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

/// Cost estimate configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimateConfig {
    /// Age assigned to every member when the household size changes.
    pub default_age: u32,
    /// Cost per daily outdoor hour per month.
    pub hourly_rate: f64,
    /// Months counted per year.
    pub months_per_year: u32,
    /// Symbol prefixed to formatted amounts.
    pub currency_symbol: String,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            token: None,
            min_query_chars: 2,
            timeout_secs: 10,
        }
    }
}

impl Default for EstimateConfig {
    fn default() -> Self {
        Self {
            default_age: crate::estimate::DEFAULT_AGE,
            hourly_rate: crate::estimate::HOURLY_RATE,
            months_per_year: crate::estimate::MONTHS_PER_YEAR,
            currency_symbol: "₹".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("AIRVALUE_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        let endpoint = &self.lookup.endpoint;
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(Error::ConfigValidation {
                message: format!("endpoint must be an http(s) URL, got '{endpoint}'"),
            });
        }

        if self.lookup.timeout_secs == 0 {
            return Err(Error::ConfigValidation {
                message: "timeout_secs must be greater than 0".to_string(),
            });
        }

        if self.estimate.default_age == 0 {
            return Err(Error::ConfigValidation {
                message: "default_age must be greater than 0".to_string(),
            });
        }

        if !self.estimate.hourly_rate.is_finite() || self.estimate.hourly_rate <= 0.0 {
            return Err(Error::ConfigValidation {
                message: format!(
                    "hourly_rate must be a positive number, got {}",
                    self.estimate.hourly_rate
                ),
            });
        }

        if self.estimate.months_per_year == 0 {
            return Err(Error::ConfigValidation {
                message: "months_per_year must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    /// Get the request timeout as a Duration.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.lookup.timeout_secs)
    }

    /// Whether a non-empty token is configured.
    #[must_use]
    pub fn has_token(&self) -> bool {
        self.lookup
            .token
            .as_deref()
            .is_some_and(|token| !token.trim().is_empty())
    }
}
