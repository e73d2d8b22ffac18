//! Output module for crawl artifacts and summaries
//!
//! This module handles:
//! - Writing one `<article>.txt` artifact per crawled link
//! - Recording per-worker outcomes and printing the crawl summary

mod artifact;
pub mod stats;

pub use artifact::{ArtifactSink, FileArtifactSink, MemoryArtifactSink};
pub use stats::{print_summary, CrawlSummary, WorkerReport};
