//! Configuration module for the crawler
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files, plus the explicit boolean parser used for command-line flags.
//!
//! # Example
//!
//! ```no_run
//! use frontier_crawler::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("crawler.toml")).unwrap();
//! println!("Crawl bound: {}", config.crawler.max_crawled_url);
//! ```

mod flags;
mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, OutputConfig};

pub use flags::parse_bool_flag;
pub use parser::{compute_config_hash, load_config, load_config_with_hash, read_config};
pub use validation::validate;
