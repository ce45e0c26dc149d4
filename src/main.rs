//! Frontier Crawler main entry point
//!
//! This is the command-line interface for the frontier crawler.

use anyhow::{Context, Result};
use clap::Parser;
use frontier_crawler::config::{load_config_with_hash, parse_bool_flag, validate, Config};
use frontier_crawler::crawler::crawl;
use frontier_crawler::output::{print_summary, write_crawled_list};
use frontier_crawler::storage::{open_storage, CrawlStore};
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// Frontier Crawler: a polite, bounded web crawler
///
/// Starting from a seed URL, crawls at most a fixed number of pages while
/// respecting robots.txt, then writes the crawled URLs one per line for the
/// indexing stages. Values given on the command line override the config file.
#[derive(Parser, Debug)]
#[command(name = "frontier-crawler")]
#[command(version)]
#[command(about = "A polite, bounded web crawler", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// URL the crawl starts from
    #[arg(short, long)]
    seed: Option<String>,

    /// Maximum number of URLs to crawl
    #[arg(long)]
    max_crawled_url: Option<usize>,

    /// Seconds to wait before each page or sitemap fetch
    #[arg(long)]
    politeness_criterion: Option<f64>,

    /// Maximum links admitted from a single page
    #[arg(long)]
    max_url_by_pages: Option<usize>,

    /// Admit URLs listed in the sitemaps declared by robots.txt (true/false)
    #[arg(long, value_name = "BOOL", value_parser = parse_bool_arg)]
    explore_sitemaps: Option<bool>,

    /// Maximum links admitted per sitemap pass
    #[arg(long)]
    max_url_by_sitemaps: Option<usize>,

    /// Per-fetch timeout in seconds
    #[arg(long)]
    fetch_timeout: Option<u64>,

    /// Path of the SQLite crawl-record database
    #[arg(long, value_name = "PATH")]
    database: Option<String>,

    /// Path of the crawled URL list to write
    #[arg(short, long, value_name = "PATH")]
    output: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate the configuration and show what would be crawled
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Show the number of crawl records in the database and exit
    #[arg(long, conflicts_with = "dry_run")]
    stats: bool,
}

fn parse_bool_arg(raw: &str) -> Result<bool, String> {
    parse_bool_flag(raw).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = build_config(&cli)?;

    if cli.dry_run {
        handle_dry_run(&config);
        Ok(())
    } else if cli.stats {
        handle_stats(&config)
    } else {
        handle_crawl(&config).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("frontier_crawler=info,warn"),
            1 => EnvFilter::new("frontier_crawler=debug,info"),
            2 => EnvFilter::new("frontier_crawler=trace,debug"),
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

/// Loads the config file (if any), applies command-line overrides, validates
fn build_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    let crawler = &mut config.crawler;
    if let Some(seed) = &cli.seed {
        crawler.seed = seed.clone();
    }
    if let Some(max) = cli.max_crawled_url {
        crawler.max_crawled_url = max;
    }
    if let Some(delay) = cli.politeness_criterion {
        crawler.politeness_criterion = delay;
    }
    if let Some(max) = cli.max_url_by_pages {
        crawler.max_url_by_pages = max;
    }
    if let Some(explore) = cli.explore_sitemaps {
        crawler.explore_sitemaps = explore;
    }
    if let Some(max) = cli.max_url_by_sitemaps {
        crawler.max_url_by_sitemaps = max;
    }
    if let Some(timeout) = cli.fetch_timeout {
        crawler.fetch_timeout = timeout;
    }
    if let Some(database) = &cli.database {
        config.output.database_path = database.clone();
    }
    if let Some(output) = &cli.output {
        config.output.crawled_path = output.clone();
    }

    validate(&config).context("Invalid configuration")?;
    Ok(config)
}

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &Config) {
    let crawler = &config.crawler;

    println!("=== Frontier Crawler Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Seed: {}", crawler.seed);
    println!("  Max crawled URLs: {}", crawler.max_crawled_url);
    println!("  Politeness delay: {}s", crawler.politeness_criterion);
    println!("  Max URLs per page: {}", crawler.max_url_by_pages);
    println!("  Explore sitemaps: {}", crawler.explore_sitemaps);
    println!("  Max URLs per sitemap pass: {}", crawler.max_url_by_sitemaps);
    println!("  Fetch timeout: {}s", crawler.fetch_timeout);
    println!("  Cancel grace: {}s", crawler.cancel_grace);
    println!("  Resolve relative links: {}", crawler.resolve_relative_links);
    println!("  User agent: {}", crawler.user_agent);

    println!("\nOutput:");
    println!("  Database: {}", config.output.database_path);
    println!("  Crawled list: {}", config.output.crawled_path);

    println!("\n✓ Configuration is valid");
}

/// Handles the --stats mode: shows the crawl-record count
fn handle_stats(config: &Config) -> Result<()> {
    println!("Database: {}\n", config.output.database_path);

    let storage = open_storage(Path::new(&config.output.database_path))
        .context("Failed to open crawl-record database")?;
    let count = storage.count_records()?;

    println!("Crawl records: {}", count);
    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config) -> Result<()> {
    let cancel = CancellationToken::new();

    let trigger = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, stopping crawl");
            trigger.cancel();
        }
    });

    let report = crawl(config, cancel).await.context("Crawl failed")?;

    let output_path = Path::new(&config.output.crawled_path);
    write_crawled_list(output_path, &report.crawled)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;
    tracing::info!(
        "Wrote {} URLs to {}",
        report.crawled.len(),
        output_path.display()
    );

    print_summary(&report);

    if report.termination.is_failure() {
        anyhow::bail!("Crawl stopped early: {}", report.termination);
    }

    Ok(())
}
