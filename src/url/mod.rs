//! URL handling module for Sitemark
//!
//! This module provides seed parsing, the lossy identity-key
//! normalization used for deduplication and artifact naming, host
//! extraction, and crawl-scope filtering.

mod domain;
mod filter;
mod normalize;

pub use domain::extract_host;
pub use filter::{is_blocked_resource, is_crawlable, is_in_scope};
pub use normalize::{artifact_key, parse_seed};
