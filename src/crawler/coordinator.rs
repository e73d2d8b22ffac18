//! Crawler coordinator - demand-driven link dispatch
//!
//! The coordinator owns the seed document, the discovery cursor on it and the
//! count of links issued so far. It answers every idle announcement with the
//! next article link found on the seed page, and once the quota is met it
//! sends the termination signal to each worker individually.

use crate::crawler::protocol::{IdleAnnouncement, WorkAssignment, WorkerId};
use crate::markup::{first_paragraph_cursor, next_link, LinkVerdict};
use crate::CrawlError;
use std::collections::BTreeMap;
use tokio::sync::mpsc;

/// Dispatch state for one crawl
pub struct Coordinator {
    /// Seed page markup; never modified
    seed: String,

    /// Discovery position on the seed page
    cursor: usize,

    /// Links handed to workers so far
    issued: u32,

    /// Links to hand out before terminating
    target: u32,

    /// Idle announcements from every worker
    requests: mpsc::Receiver<IdleAnnouncement>,

    /// Per-worker assignment channels
    workers: BTreeMap<WorkerId, mpsc::Sender<WorkAssignment>>,
}

impl Coordinator {
    /// Creates a coordinator over a fetched seed page
    ///
    /// Discovery starts at the first paragraph of the seed page.
    pub fn new(
        seed: String,
        target: u32,
        requests: mpsc::Receiver<IdleAnnouncement>,
        workers: BTreeMap<WorkerId, mpsc::Sender<WorkAssignment>>,
    ) -> Self {
        let cursor = first_paragraph_cursor(&seed);
        Self {
            seed,
            cursor,
            issued: 0,
            target,
            requests,
            workers,
        }
    }

    /// Finds the next article link on the seed page
    ///
    /// Rejected candidates only move the cursor. Returns `None` once the seed
    /// page has no further links.
    pub fn discover(&mut self) -> Option<String> {
        loop {
            let candidate = next_link(&self.seed, self.cursor)?;
            self.cursor = candidate.cursor_after;
            match candidate.verdict {
                LinkVerdict::Article(name) => return Some(name),
                verdict => tracing::trace!("Skipping link at {}: {:?}", self.cursor, verdict),
            }
        }
    }

    /// Serves idle workers until the quota is met, then terminates them all
    ///
    /// # Returns
    ///
    /// * `Ok(u32)` - Number of links issued, equal to the target
    /// * `Err(CrawlError::SeedExhausted)` - The seed page ran out of links first
    /// * `Err(CrawlError::WorkersGone)` - Every worker exited before the quota
    pub async fn run(mut self) -> Result<u32, CrawlError> {
        tracing::info!(
            "Coordinator dispatching {} links to {} workers",
            self.target,
            self.workers.len()
        );

        let outcome = self.dispatch().await;
        self.terminate_all().await;

        outcome.map(|()| self.issued)
    }

    async fn dispatch(&mut self) -> Result<(), CrawlError> {
        while self.issued < self.target {
            let Some(link) = self.discover() else {
                tracing::warn!(
                    "Seed page exhausted after {} of {} links",
                    self.issued,
                    self.target
                );
                return Err(CrawlError::SeedExhausted {
                    issued: self.issued,
                    requested: self.target,
                });
            };

            self.serve(link).await?;
            self.issued += 1;
        }

        tracing::info!("Quota of {} links issued", self.target);
        Ok(())
    }

    /// Hands `link` to the next worker that announces itself idle
    async fn serve(&mut self, link: String) -> Result<(), CrawlError> {
        loop {
            let request = self.requests.recv().await.ok_or(CrawlError::WorkersGone)?;

            let Some(sender) = self.workers.get(&request.worker) else {
                tracing::warn!("Idle announcement from unknown worker {}", request.worker);
                continue;
            };

            match sender.send(WorkAssignment::Link(link.clone())).await {
                Ok(()) => {
                    tracing::debug!("Assigned {} to worker {}", link, request.worker);
                    return Ok(());
                }
                Err(_) => {
                    tracing::warn!("Worker {} stopped listening, dropping it", request.worker);
                    self.workers.remove(&request.worker);
                }
            }
        }
    }

    async fn terminate_all(&mut self) {
        for (worker, sender) in &self.workers {
            if sender.send(WorkAssignment::Terminate).await.is_err() {
                tracing::debug!("Worker {} already gone at termination", worker);
            }
        }
        tracing::info!("Termination sent to {} workers", self.workers.len());
    }
}
