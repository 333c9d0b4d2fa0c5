//! Sitemark: an incremental site-to-markdown mirror
//!
//! This crate crawls every in-domain page reachable from a seed URL,
//! converts each page body to markdown, and writes the result to disk
//! only when its content changed since the last run.

pub mod config;
pub mod convert;
pub mod crawler;
pub mod pipeline;
pub mod store;
pub mod url;

use thiserror::Error;

/// Main error type for Sitemark operations
#[derive(Debug, Error)]
pub enum SitemarkError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Store error: {0}")]
    Store(#[from] store::StoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for Sitemark operations
pub type Result<T> = std::result::Result<T, SitemarkError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use pipeline::{CrawlReport, Pipeline};
pub use store::{MirrorStore, SaveOutcome};
pub use crate::url::{artifact_key, extract_host, parse_seed};
