//! Configuration for threadscrape
//!
//! Defaults cover the common case; a TOML file can override any field.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use threadscrape::config::load_config;
//!
//! let config = load_config(Path::new("threadscrape.toml")).unwrap();
//! println!("Request timeout: {}s", config.timeout);
//! ```

use crate::{ConfigError, ConfigResult};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Scraper behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Request timeout in seconds
    pub timeout: u64,

    /// Maximum number of retries for transient failures
    #[serde(rename = "max-retries")]
    pub max_retries: u32,

    /// Base delay between retries in seconds (doubled on each attempt)
    #[serde(rename = "retry-delay")]
    pub retry_delay: f64,

    /// Minimum delay between requests in seconds (rate limiting)
    #[serde(rename = "request-delay")]
    pub request_delay: f64,

    /// User agent string sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Directory where exported results are written
    #[serde(rename = "data-dir")]
    pub data_dir: String,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            timeout: 10,
            max_retries: 3,
            retry_delay: 2.0,
            request_delay: 1.0,
            user_agent: concat!(
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 ",
                "(KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36"
            )
            .to_string(),
            data_dir: "./data".to_string(),
        }
    }
}

impl ScraperConfig {
    /// Returns the request timeout as a [`Duration`]
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Returns the base retry delay as a [`Duration`]
    pub fn retry_delay_duration(&self) -> Duration {
        Duration::from_secs_f64(self.retry_delay)
    }

    /// Returns the minimum inter-request delay as a [`Duration`]
    pub fn request_delay_duration(&self) -> Duration {
        Duration::from_secs_f64(self.request_delay)
    }
}

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(ScraperConfig)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
pub fn load_config(path: &Path) -> ConfigResult<ScraperConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: ScraperConfig = toml::from_str(&content)?;
    validate(&config)?;
    Ok(config)
}

/// Validates a configuration
///
/// Timeouts must be positive, delays non-negative, and identifying
/// fields non-empty.
pub fn validate(config: &ScraperConfig) -> ConfigResult<()> {
    if config.timeout == 0 {
        return Err(ConfigError::Validation(
            "timeout must be greater than zero".to_string(),
        ));
    }

    if config.retry_delay < 0.0 {
        return Err(ConfigError::Validation(
            "retry-delay must not be negative".to_string(),
        ));
    }

    if config.request_delay < 0.0 {
        return Err(ConfigError::Validation(
            "request-delay must not be negative".to_string(),
        ));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent must not be empty".to_string(),
        ));
    }

    if config.data_dir.trim().is_empty() {
        return Err(ConfigError::Validation(
            "data-dir must not be empty".to_string(),
        ));
    }

    Ok(())
}
