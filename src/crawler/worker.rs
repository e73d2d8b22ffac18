//! Worker loop
//!
//! A worker repeatedly announces that it is idle, waits for the coordinator's
//! answer and either crawls the assigned article or exits. Failures while
//! fetching or writing one article stay local to that article.

use crate::crawler::fetcher::PageFetcher;
use crate::crawler::protocol::{IdleAnnouncement, WorkAssignment, WorkerId};
use crate::markup::extract_text;
use crate::output::{ArtifactSink, WorkerReport};
use crate::site::Site;
use std::sync::Arc;
use tokio::sync::mpsc;

/// One crawl worker and the collaborators it uses per assignment
pub struct Worker {
    id: WorkerId,
    site: Arc<Site>,
    fetcher: Arc<dyn PageFetcher>,
    sink: Arc<dyn ArtifactSink>,
}

impl Worker {
    pub fn new(
        id: WorkerId,
        site: Arc<Site>,
        fetcher: Arc<dyn PageFetcher>,
        sink: Arc<dyn ArtifactSink>,
    ) -> Self {
        Self {
            id,
            site,
            fetcher,
            sink,
        }
    }

    /// Runs the worker until it is told to terminate
    ///
    /// The loop also ends if the coordinator goes away, since no further
    /// assignment can arrive.
    pub async fn run(
        self,
        requests: mpsc::Sender<IdleAnnouncement>,
        mut assignments: mpsc::Receiver<WorkAssignment>,
    ) -> WorkerReport {
        let mut report = WorkerReport::new(self.id);

        loop {
            let announcement = IdleAnnouncement { worker: self.id };
            if requests.send(announcement).await.is_err() {
                tracing::debug!("Worker {}: coordinator gone", self.id);
                break;
            }

            match assignments.recv().await {
                Some(WorkAssignment::Link(name)) => self.process(&name, &mut report).await,
                Some(WorkAssignment::Terminate) | None => break,
            }
        }

        tracing::info!("Worker {} finished", self.id);
        report
    }

    /// Fetches one article, extracts its text and writes the artifact
    async fn process(&self, name: &str, report: &mut WorkerReport) {
        report.assigned += 1;

        let body = match self.site.article_url(name) {
            Ok(url) => {
                let result = self.fetcher.fetch(&url).await;
                if let Some(reason) = result.failure_reason() {
                    tracing::warn!("Worker {}: fetching {} failed: {}", self.id, url, reason);
                    report.fetch_failures += 1;
                }
                result.into_body()
            }
            Err(e) => {
                tracing::warn!("Worker {}: bad article name {}: {}", self.id, name, e);
                report.fetch_failures += 1;
                String::new()
            }
        };

        let text = match tokio::task::spawn_blocking(move || extract_text(&body)).await {
            Ok(text) => text,
            Err(e) => {
                report.write_failures += 1;
                tracing::error!("Worker {}: extracting {} failed: {}", self.id, name, e);
                return;
            }
        };

        match self.sink.write_artifact(name, &text).await {
            Ok(location) => {
                report.artifacts_written += 1;
                tracing::info!("Worker {} wrote file: {}", self.id, location);
            }
            Err(e) => {
                report.write_failures += 1;
                tracing::error!("Worker {}: {}", self.id, e);
            }
        }
    }
}
