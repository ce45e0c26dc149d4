//! Newline-delimited crawled URL list
//!
//! This is the artifact handed to the tokenizer and indexer stages: one URL
//! per line, each line newline-terminated.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes `urls` to `output_path`, one per line, sorted
///
/// # Arguments
///
/// * `output_path` - Path of the file to create or truncate
/// * `urls` - The crawled URLs, in any order
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the list
/// * `Err(std::io::Error)` - Failed to create or write the file
pub fn write_crawled_list(output_path: &Path, urls: &[String]) -> std::io::Result<()> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);

    let mut sorted: Vec<&String> = urls.iter().collect();
    sorted.sort();

    for url in sorted {
        writeln!(writer, "{}", url)?;
    }

    writer.flush()
}

/// Reads back a list written by `write_crawled_list`, skipping blank lines
pub fn read_crawled_list(input_path: &Path) -> std::io::Result<Vec<String>> {
    let content = std::fs::read_to_string(input_path)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}
