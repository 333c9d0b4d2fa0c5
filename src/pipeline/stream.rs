//! Content fetch stream
//!
//! Given the discovered URL list, fetches every page body under its
//! own permit pool and yields `(url, body)` pairs in completion order.
//! A failed or timed-out fetch yields nothing for that URL. The
//! stream terminates once every launched task has settled: each task
//! owns a clone of the channel sender, so the channel closes exactly
//! when the last task finishes.

use crate::crawler::{fetch_page, FetchOutcome};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Semaphore};
use tokio_stream::wrappers::ReceiverStream;
use tokio_util::sync::CancellationToken;
use url::Url;

/// A successfully fetched page body
#[derive(Debug)]
pub struct FetchedPage {
    pub url: Url,
    pub body: String,
}

/// Streams page bodies for `urls`, in completion order
///
/// Launches one task per URL immediately; the permit pool bounds how
/// many are fetching at once. Not restartable, consumed once.
///
/// # Arguments
///
/// * `client` - HTTP client shared with the walker
/// * `urls` - The discovered URL list
/// * `concurrency` - Size of the fetch permit pool
/// * `timeout` - Per-request timeout
/// * `cancel` - Token that stops pending fetches when set
pub fn stream_pages(
    client: &Client,
    urls: Vec<Url>,
    concurrency: usize,
    timeout: Duration,
    cancel: &CancellationToken,
) -> ReceiverStream<FetchedPage> {
    let (tx, rx) = mpsc::channel(concurrency.max(1));
    let semaphore = Arc::new(Semaphore::new(concurrency));

    for url in urls {
        let tx = tx.clone();
        let semaphore = Arc::clone(&semaphore);
        let client = client.clone();
        let cancel = cancel.clone();

        tokio::spawn(async move {
            let permit = tokio::select! {
                _ = cancel.cancelled() => return,
                permit = semaphore.acquire_owned() => match permit {
                    Ok(permit) => permit,
                    Err(_) => return,
                },
            };

            let outcome = tokio::select! {
                _ = cancel.cancelled() => return,
                outcome = fetch_page(&client, &url, timeout) => outcome,
            };
            drop(permit);

            match outcome {
                FetchOutcome::Success { body } => {
                    tracing::info!("Fetched {}", url);
                    // The receiver may have been dropped mid-stream
                    let _ = tx.send(FetchedPage { url, body }).await;
                }
                FetchOutcome::Failed { reason } => {
                    tracing::warn!("Dropping {}: {}", url, reason);
                }
            }
        });
    }

    // The tasks hold the remaining senders; the stream ends when all
    // of them have finished.
    drop(tx);

    ReceiverStream::new(rx)
}
