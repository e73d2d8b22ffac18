//! Configuration module for Wiki-Relay
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files, and collecting the crawl size from the operator when it is not
//! configured.
//!
//! Every section is optional: an absent file or section falls back to the
//! defaults, which crawl the English encyclopedia from its own article.
//!
//! # Example
//!
//! ```no_run
//! use wiki_relay::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("wiki-relay.toml")).unwrap();
//! println!("Crawl will use {} workers", config.crawler.workers);
//! ```

mod parser;
mod prompt;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, FetchConfig, OutputConfig, SiteConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use prompt::{parse_crawl_size, read_crawl_size};
pub use validation::validate;
