//! Wiki-Relay: a pull-dispatched encyclopedia article harvester
//!
//! This crate crawls one encyclopedia site from a single seed article. A
//! coordinator task walks the seed page for same-site article links and hands
//! them out one at a time to idle worker tasks, which fetch each article,
//! extract its paragraph text and write it to a `.txt` artifact.

pub mod config;
pub mod crawler;
pub mod markup;
pub mod output;
pub mod site;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Wiki-Relay operations
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Failed to write artifact {}: {source}", path.display())]
    Artifact {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Seed page {url} could not be fetched: {reason}")]
    SeedUnavailable { url: String, reason: String },

    #[error("Seed page ran out of article links after {issued} of {requested}")]
    SeedExhausted { issued: u32, requested: u32 },

    #[error("All workers exited before the crawl quota was met")]
    WorkersGone,

    #[error("Worker task failed: {0}")]
    WorkerPanicked(#[from] tokio::task::JoinError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Wiki-Relay operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::run_crawl;
pub use markup::{extract_text, locate, next_link, LinkCandidate, LinkVerdict, TagSpan};
pub use output::CrawlSummary;
