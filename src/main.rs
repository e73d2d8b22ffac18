//! Wiki-Relay main entry point
//!
//! This is the command-line interface for the Wiki-Relay article harvester.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use wiki_relay::config::{load_config_with_hash, read_crawl_size, validate, Config};
use wiki_relay::crawler::run_crawl;
use wiki_relay::output::print_summary;
use wiki_relay::site::Site;

/// Wiki-Relay: a pull-dispatched encyclopedia article harvester
///
/// Wiki-Relay fetches one seed article, hands the article links it finds to a
/// pool of workers one at a time, and writes the paragraph text of every
/// crawled article to `<output-dir>/wiki/<Article>.txt`.
#[derive(Parser, Debug)]
#[command(name = "wiki-relay")]
#[command(version)]
#[command(about = "A pull-dispatched encyclopedia article harvester", long_about = None)]
struct Cli {
    /// Path to an optional TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Number of articles to crawl (prompted for when not given)
    #[arg(short = 'n', long)]
    articles: Option<u32>,

    /// Number of worker tasks
    #[arg(short = 'w', long)]
    workers: Option<u32>,

    /// Directory the article text files are written under
    #[arg(short = 'o', long, value_name = "DIR")]
    output_dir: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = load(&cli)?;

    if cli.dry_run {
        return handle_dry_run(&config);
    }

    let articles = match config.crawler.articles {
        Some(articles) => articles,
        None => {
            let stdin = std::io::stdin();
            let mut stdout = std::io::stdout();
            read_crawl_size(&mut stdin.lock(), &mut stdout)?
        }
    };

    handle_crawl(&config, articles).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("wiki_relay=info,warn"),
            1 => EnvFilter::new("wiki_relay=debug,info"),
            2 => EnvFilter::new("wiki_relay=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the configuration file, if any, and applies command-line overrides
fn load(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if let Some(articles) = cli.articles {
        config.crawler.articles = Some(articles);
    }
    if let Some(workers) = cli.workers {
        config.crawler.workers = workers;
    }
    if let Some(dir) = &cli.output_dir {
        config.output.directory = dir.clone();
    }

    validate(&config).context("Invalid configuration")?;
    Ok(config)
}

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(config: &Config) -> anyhow::Result<()> {
    let site = Site::from_config(&config.site)?;

    println!("=== Wiki-Relay Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Workers: {}", config.crawler.workers);
    match config.crawler.articles {
        Some(articles) => println!("  Articles: {}", articles),
        None => println!("  Articles: (asked at startup)"),
    }

    println!("\nSite:");
    println!("  Base URL: {}", site.base_url());
    println!("  Seed URL: {}", site.seed_url());

    println!("\nFetch:");
    println!("  Timeout: {}s", config.fetch.timeout_secs);
    println!("  Connect timeout: {}s", config.fetch.connect_timeout_secs);

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.crawler_name);
    println!("  Version: {}", config.user_agent.crawler_version);
    println!("  Contact URL: {}", config.user_agent.contact_url);
    println!("  Contact Email: {}", config.user_agent.contact_email);

    println!("\nOutput:");
    println!("  Directory: {}", config.output.directory);

    println!("\n✓ Configuration is valid");

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config, articles: u32) -> anyhow::Result<()> {
    tracing::info!(
        "Crawling {} articles with {} workers into {}",
        articles,
        config.crawler.workers,
        config.output.directory
    );

    match run_crawl(config, articles).await {
        Ok(summary) => {
            tracing::info!("Crawl completed successfully");
            print_summary(&summary);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
