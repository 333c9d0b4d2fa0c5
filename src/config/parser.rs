//! Loading and validation of TOML configuration files

use crate::config::Config;
use crate::{ConfigError, ConfigResult};
use std::fs;
use std::path::Path;

/// Loads and validates a configuration file
///
/// Missing sections and keys fall back to their defaults, so an empty
/// file (or no file at all, via [`Config::default`]) is valid.
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Parsed and validated configuration
/// * `Err(ConfigError)` - Failed to read, parse, or validate
pub fn load_config(path: &Path) -> ConfigResult<Config> {
    let contents = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates configuration values
pub fn validate_config(config: &Config) -> ConfigResult<()> {
    if config.crawler.crawl_concurrency == 0 {
        return Err(ConfigError::Validation(
            "crawl-concurrency must be at least 1".to_string(),
        ));
    }

    if config.crawler.fetch_concurrency == 0 {
        return Err(ConfigError::Validation(
            "fetch-concurrency must be at least 1".to_string(),
        ));
    }

    if config.crawler.fetch_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "fetch-timeout-secs must be at least 1".to_string(),
        ));
    }

    if config.crawler.max_pages == 0 {
        return Err(ConfigError::Validation(
            "max-pages must be at least 1".to_string(),
        ));
    }

    if config.output.directory.trim().is_empty() {
        return Err(ConfigError::Validation(
            "output directory must not be empty".to_string(),
        ));
    }

    Ok(())
}
