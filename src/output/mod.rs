//! Output module for the crawl artifact and run summary
//!
//! This module handles:
//! - Writing the crawled set as a newline-delimited file
//! - Printing the end-of-run summary

mod list;
mod summary;

pub use list::{read_crawled_list, write_crawled_list};
pub use summary::{format_summary, print_summary};
