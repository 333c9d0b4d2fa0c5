//! HTTP fetcher implementation
//!
//! This module builds the HTTP client and performs single-page GET
//! requests. Every transport or status failure is converted into an
//! explicit [`FetchOutcome::Failed`] variant rather than an error, so
//! callers decide whether to log, count, or drop the page.

use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Result of fetching a single page
#[derive(Debug)]
pub enum FetchOutcome {
    /// Page fetched with a 2xx status
    Success {
        /// Decoded page body
        body: String,
    },

    /// Fetch failed; the page is treated as a dead end
    Failed {
        /// Human-readable failure reason, for logs and counters
        reason: String,
    },
}

impl FetchOutcome {
    /// Returns true on the success variant
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Builds the HTTP client shared by all fetch stages
///
/// # Arguments
///
/// * `user_agent` - User agent string sent with every request
/// * `timeout` - Hard per-request timeout
pub fn build_http_client(user_agent: &str, timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.to_string())
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL, mapping every failure to [`FetchOutcome::Failed`]
///
/// A non-2xx status, a timeout, and a transport error are all treated
/// identically: no element, no retry. The timeout is enforced both by
/// the client configuration and by an outer `tokio::time::timeout` so
/// a stalled body read cannot exceed the bound.
pub async fn fetch_page(client: &Client, url: &Url, timeout: Duration) -> FetchOutcome {
    let request = client.get(url.clone()).send();

    let response = match tokio::time::timeout(timeout, request).await {
        Ok(Ok(response)) => response,
        Ok(Err(e)) => {
            return FetchOutcome::Failed {
                reason: classify_error(&e),
            }
        }
        Err(_) => {
            return FetchOutcome::Failed {
                reason: "request timeout".to_string(),
            }
        }
    };

    let status = response.status();
    if !status.is_success() {
        return FetchOutcome::Failed {
            reason: format!("HTTP {}", status.as_u16()),
        };
    }

    match tokio::time::timeout(timeout, response.text()).await {
        Ok(Ok(body)) => FetchOutcome::Success { body },
        Ok(Err(e)) => FetchOutcome::Failed {
            reason: format!("body read failed: {}", e),
        },
        Err(_) => FetchOutcome::Failed {
            reason: "body read timeout".to_string(),
        },
    }
}

/// Maps a reqwest error to a short reason string
fn classify_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        "request timeout".to_string()
    } else if e.is_connect() {
        "connection failed".to_string()
    } else {
        e.to_string()
    }
}
