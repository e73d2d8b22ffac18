//! Crawler module: pull-based dispatch of article links to workers
//!
//! This module contains the crawl machinery, including:
//! - HTTP fetching of seed and article pages
//! - The coordinator that hands out one link per idle worker
//! - The worker loop that fetches, extracts and writes artifacts
//! - The message protocol between the two roles

mod coordinator;
mod fetcher;
pub mod protocol;
mod worker;

pub use coordinator::Coordinator;
pub use fetcher::{build_http_client, fetch_url, is_allowed_status, FetchResult, HttpFetcher, PageFetcher};
pub use protocol::{IdleAnnouncement, WorkAssignment, WorkerId};
pub use worker::Worker;

use crate::config::Config;
use crate::output::{ArtifactSink, CrawlSummary, FileArtifactSink};
use crate::site::Site;
use crate::CrawlError;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Runs a complete crawl as described by the configuration
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Resolve the site and seed URLs
/// 2. Build the HTTP client
/// 3. Fetch the seed page
/// 4. Spawn the workers and dispatch `articles` links to them
/// 5. Wait for every worker to finish
///
/// Artifacts are written under the configured output directory.
///
/// # Example
///
/// ```no_run
/// use wiki_relay::config::Config;
/// use wiki_relay::crawler::run_crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let summary = run_crawl(&Config::default(), 10).await?;
/// println!("Wrote {} articles", summary.artifacts_written());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: &Config, articles: u32) -> Result<CrawlSummary, CrawlError> {
    let site = Site::from_config(&config.site)?;
    let fetcher = Arc::new(HttpFetcher::from_config(config)?);
    let sink = Arc::new(FileArtifactSink::new(&config.output.directory));

    crawl(site, articles, config.crawler.workers, fetcher, sink).await
}

/// Runs a crawl with explicit collaborators
///
/// The seed page is fetched before any worker starts; if it cannot be
/// retrieved the crawl fails without dispatching anything.
///
/// # Returns
///
/// * `Ok(CrawlSummary)` - Every requested link was issued and all workers finished
/// * `Err(CrawlError)` - Seed unavailable, seed exhausted, or the worker pool failed
pub async fn crawl(
    site: Site,
    articles: u32,
    workers: u32,
    fetcher: Arc<dyn PageFetcher>,
    sink: Arc<dyn ArtifactSink>,
) -> Result<CrawlSummary, CrawlError> {
    let started_at = chrono::Utc::now();

    let seed_url = site.seed_url().clone();
    tracing::info!("Fetching seed page {}", seed_url);
    let seed = fetcher.fetch(&seed_url).await;
    if let Some(reason) = seed.failure_reason() {
        return Err(CrawlError::SeedUnavailable {
            url: seed_url.to_string(),
            reason,
        });
    }
    let seed = seed.into_body();

    let site = Arc::new(site);
    let (request_tx, request_rx) = protocol::request_channel(workers);
    let mut senders = BTreeMap::new();
    let mut handles = Vec::new();

    for n in 1..=workers {
        let id = WorkerId(n);
        let (assign_tx, assign_rx) = protocol::assignment_channel();
        senders.insert(id, assign_tx);

        let worker = Worker::new(id, site.clone(), fetcher.clone(), sink.clone());
        handles.push(tokio::spawn(worker.run(request_tx.clone(), assign_rx)));
    }
    // Only workers hold announcement senders, so a closed channel means none is left.
    drop(request_tx);

    let coordinator = Coordinator::new(seed, articles, request_rx, senders);
    let outcome = coordinator.run().await;

    let mut reports = Vec::with_capacity(handles.len());
    for handle in handles {
        reports.push(handle.await?);
    }

    let issued = outcome?;
    Ok(CrawlSummary {
        requested: articles,
        issued,
        started_at,
        finished_at: chrono::Utc::now(),
        workers: reports,
    })
}
