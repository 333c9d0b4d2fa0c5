//! Crawler module for link discovery
//!
//! This module contains the discovery half of the pipeline:
//! - HTTP fetching with explicit failure outcomes
//! - HTML link extraction
//! - The concurrent crawl graph walker

mod fetcher;
mod parser;
mod walker;

pub use fetcher::{build_http_client, fetch_page, FetchOutcome};
pub use parser::extract_links;
pub use walker::CrawlGraphWalker;
