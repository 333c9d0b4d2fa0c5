//! Sitemark main entry point
//!
//! Command-line interface for the incremental site-to-markdown mirror.

use anyhow::Context;
use clap::Parser;
use sitemark::config::{load_config, Config};
use sitemark::Pipeline;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// Sitemark: an incremental site-to-markdown mirror
///
/// Crawls every in-domain page reachable from the seed URL, converts
/// each page to markdown, and writes artifacts that changed since the
/// last run.
#[derive(Parser, Debug)]
#[command(name = "sitemark")]
#[command(version)]
#[command(about = "Incremental site-to-markdown mirror", long_about = None)]
struct Cli {
    /// Seed URL to crawl; its host defines the crawl scope
    #[arg(value_name = "SEED_URL")]
    seed: String,

    /// Path to TOML configuration file (defaults apply without one)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output directory, overriding the configured one
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::default(),
    };

    if let Some(output) = &cli.output {
        config.output.directory = output.display().to_string();
    }

    tracing::info!(
        "Mirroring {} into {} (crawl concurrency {}, fetch concurrency {})",
        cli.seed,
        config.output.directory,
        config.crawler.crawl_concurrency,
        config.crawler.fetch_concurrency
    );

    // Ctrl-C unwinds in-flight fetches and pending joins
    let cancel = CancellationToken::new();
    let ctrl_c_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, cancelling crawl");
            ctrl_c_cancel.cancel();
        }
    });

    let pipeline = Pipeline::new(config, cancel);
    let report = pipeline.run(&cli.seed).await?;

    println!("Discovered pages:  {}", report.discovered);
    println!("Fetched bodies:    {}", report.fetched);
    println!("Dropped fetches:   {}", report.failed_fetches);
    println!("Artifacts created: {}", report.created);
    println!("Artifacts updated: {}", report.updated);
    println!("Unchanged:         {}", report.unchanged);
    if report.store_errors > 0 {
        println!("Store errors:      {}", report.store_errors);
    }

    Ok(())
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitemark=info,warn"),
            1 => EnvFilter::new("sitemark=debug,info"),
            2 => EnvFilter::new("sitemark=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
