//! Configuration module for Sitemark
//!
//! This module handles loading, parsing, and validating TOML
//! configuration files. All keys have defaults, so running without a
//! config file is supported.

mod parser;
mod types;

// Re-export types
pub use types::{Config, CrawlerConfig, OutputConfig};

// Re-export parser functions
pub use parser::{load_config, validate_config};
