//! Pipeline orchestration
//!
//! Runs the full mirror cycle: walk the link graph, stream page
//! bodies, convert each body to markdown, and hand the artifact to the
//! incremental store. Partial failures never abort the run; they are
//! counted so silent loss stays observable.

mod stream;

pub use stream::{stream_pages, FetchedPage};

use crate::config::Config;
use crate::convert::html_to_markdown;
use crate::crawler::{build_http_client, CrawlGraphWalker};
use crate::store::{MirrorStore, SaveOutcome};
use crate::url::{artifact_key, extract_host, parse_seed};
use crate::{SitemarkError, UrlError};
use std::time::Duration;
use tokio_stream::StreamExt;
use tokio_util::sync::CancellationToken;

/// Summary of a completed (or cancelled) pipeline run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CrawlReport {
    /// Pages accepted into the visited set during discovery
    pub discovered: usize,
    /// Pages whose body fetch succeeded
    pub fetched: usize,
    /// Pages dropped because their body fetch failed or timed out
    pub failed_fetches: usize,
    /// Artifacts written for the first time
    pub created: usize,
    /// Artifacts overwritten because their content changed
    pub updated: usize,
    /// Artifacts left untouched because their content matched
    pub unchanged: usize,
    /// Saves that failed with a storage error
    pub store_errors: usize,
}

/// End-to-end mirror pipeline
pub struct Pipeline {
    config: Config,
    store: MirrorStore,
    cancel: CancellationToken,
}

impl Pipeline {
    /// Creates a pipeline from a configuration
    ///
    /// The output directory comes from the config; it is created on
    /// first write, not here.
    pub fn new(config: Config, cancel: CancellationToken) -> Self {
        let store = MirrorStore::new(config.output.directory.clone());
        Self {
            config,
            store,
            cancel,
        }
    }

    /// Runs the full crawl-convert-save cycle for a seed URL
    ///
    /// The crawl scope is the seed's host. Fetch failures and store
    /// errors are counted in the report, not propagated; only setup
    /// problems (bad seed, HTTP client construction) are errors.
    pub async fn run(&self, seed_url: &str) -> Result<CrawlReport, SitemarkError> {
        let seed = parse_seed(seed_url)?;
        let scope_host = extract_host(&seed).ok_or(UrlError::MissingHost)?;
        let timeout = Duration::from_secs(self.config.crawler.fetch_timeout_secs);

        let user_agent = format!("sitemark/{}", env!("CARGO_PKG_VERSION"));
        let client = build_http_client(&user_agent, timeout)?;

        let walker = CrawlGraphWalker::new(
            client.clone(),
            scope_host,
            self.config.crawler.crawl_concurrency,
            timeout,
            self.config.crawler.max_pages,
            self.cancel.clone(),
        );
        let discovered = walker.walk(&seed).await;

        let mut report = CrawlReport {
            discovered: discovered.len(),
            ..CrawlReport::default()
        };

        let mut pages = stream_pages(
            &client,
            discovered,
            self.config.crawler.fetch_concurrency,
            timeout,
            &self.cancel,
        );

        while let Some(page) = pages.next().await {
            report.fetched += 1;

            let markdown = html_to_markdown(&page.body);
            let key = artifact_key(&page.url);

            match self.store.save(&key, &markdown) {
                Ok(SaveOutcome::Created) => report.created += 1,
                Ok(SaveOutcome::Updated) => report.updated += 1,
                Ok(SaveOutcome::Unchanged) => report.unchanged += 1,
                Err(e) => {
                    // Fatal for this save only; the rest of the
                    // pipeline keeps going.
                    tracing::error!("Failed to save artifact for {}: {}", page.url, e);
                    report.store_errors += 1;
                }
            }
        }

        report.failed_fetches = report.discovered.saturating_sub(report.fetched);

        tracing::info!(
            "Run complete: {} discovered, {} fetched ({} dropped), {} created, {} updated, {} unchanged, {} store errors",
            report.discovered,
            report.fetched,
            report.failed_fetches,
            report.created,
            report.updated,
            report.unchanged,
            report.store_errors
        );

        Ok(report)
    }

    /// Returns the store backing this pipeline
    pub fn store(&self) -> &MirrorStore {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_rejects_invalid_seed() {
        let pipeline = Pipeline::new(Config::default(), CancellationToken::new());
        let result = pipeline.run("not a url").await;
        assert!(matches!(result, Err(SitemarkError::UrlError(_))));
    }

    #[tokio::test]
    async fn test_run_rejects_non_http_seed() {
        let pipeline = Pipeline::new(Config::default(), CancellationToken::new());
        let result = pipeline.run("ftp://example.com/").await;
        assert!(matches!(result, Err(SitemarkError::UrlError(_))));
    }

    #[test]
    fn test_store_uses_configured_directory() {
        let mut config = Config::default();
        config.output.directory = "/tmp/sitemark-test-out".to_string();
        let pipeline = Pipeline::new(config, CancellationToken::new());
        assert_eq!(
            pipeline.store().root(),
            std::path::Path::new("/tmp/sitemark-test-out")
        );
    }
}
