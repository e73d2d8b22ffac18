//! Crawl outcome statistics
//!
//! Workers count what happened to their own assignments; the crawl collects
//! the counts into one summary once every worker has exited.

use crate::crawler::WorkerId;
use chrono::{DateTime, Utc};

/// Outcome counts of one worker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerReport {
    pub worker: WorkerId,

    /// Links received from the coordinator
    pub assigned: u32,

    /// Artifacts written, including empty ones after a failed fetch
    pub artifacts_written: u32,

    /// Fetches that returned no content
    pub fetch_failures: u32,

    /// Artifacts that could not be written
    pub write_failures: u32,
}

impl WorkerReport {
    pub fn new(worker: WorkerId) -> Self {
        Self {
            worker,
            assigned: 0,
            artifacts_written: 0,
            fetch_failures: 0,
            write_failures: 0,
        }
    }
}

/// Summary of a finished crawl
#[derive(Debug, Clone)]
pub struct CrawlSummary {
    /// Links the operator asked for
    pub requested: u32,

    /// Links the coordinator handed out
    pub issued: u32,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,

    /// One report per worker, in worker order
    pub workers: Vec<WorkerReport>,
}

impl CrawlSummary {
    pub fn artifacts_written(&self) -> u32 {
        self.workers.iter().map(|w| w.artifacts_written).sum()
    }

    pub fn fetch_failures(&self) -> u32 {
        self.workers.iter().map(|w| w.fetch_failures).sum()
    }

    pub fn write_failures(&self) -> u32 {
        self.workers.iter().map(|w| w.write_failures).sum()
    }

    /// Wall-clock duration of the crawl in seconds
    pub fn duration_seconds(&self) -> f64 {
        (self.finished_at - self.started_at).num_milliseconds() as f64 / 1000.0
    }

    /// Share of issued links whose page was fetched, as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.issued == 0 {
            return 0.0;
        }
        let fetched = self.issued.saturating_sub(self.fetch_failures());
        (fetched as f64 / self.issued as f64) * 100.0
    }
}

/// Prints the crawl summary to stdout in a formatted manner
pub fn print_summary(summary: &CrawlSummary) {
    println!("=== Crawl Summary ===\n");

    println!("Overview:");
    println!("  Links requested: {}", summary.requested);
    println!("  Links issued: {}", summary.issued);
    println!("  Artifacts written: {}", summary.artifacts_written());
    println!("  Fetch failures: {}", summary.fetch_failures());
    println!("  Write failures: {}", summary.write_failures());
    println!(
        "  Started: {}",
        summary.started_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!("  Duration: {:.1}s", summary.duration_seconds());
    println!();

    println!("Workers:");
    for report in &summary.workers {
        println!(
            "  Worker {}: {} assigned, {} written, {} fetch failures",
            report.worker, report.assigned, report.artifacts_written, report.fetch_failures
        );
    }
    println!();

    println!(
        "Success Rate: {:.1}% ({} / {} pages fetched)",
        summary.success_rate(),
        summary.issued.saturating_sub(summary.fetch_failures()),
        summary.issued
    );
}
