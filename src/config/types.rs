use serde::Deserialize;

/// Main configuration structure for Sitemark
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum number of concurrent fetches during link discovery
    #[serde(rename = "crawl-concurrency", default = "default_crawl_concurrency")]
    pub crawl_concurrency: usize,

    /// Maximum number of concurrent fetches when downloading page bodies
    #[serde(rename = "fetch-concurrency", default = "default_fetch_concurrency")]
    pub fetch_concurrency: usize,

    /// Per-request timeout in seconds
    #[serde(rename = "fetch-timeout-secs", default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    /// Hard cap on the number of pages accepted into the crawl.
    /// Safety valve against pathological link graphs.
    #[serde(rename = "max-pages", default = "default_max_pages")]
    pub max_pages: usize,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory where markdown artifacts are written
    #[serde(default = "default_output_directory")]
    pub directory: String,
}

fn default_crawl_concurrency() -> usize {
    3
}

fn default_fetch_concurrency() -> usize {
    5
}

fn default_fetch_timeout_secs() -> u64 {
    10
}

fn default_max_pages() -> usize {
    10_000
}

fn default_output_directory() -> String {
    "./site-mirror".to_string()
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            crawl_concurrency: default_crawl_concurrency(),
            fetch_concurrency: default_fetch_concurrency(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            max_pages: default_max_pages(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
        }
    }
}
