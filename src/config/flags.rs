//! Explicit boolean flag parsing
//!
//! Boolean options arrive as free-form strings on the command line. Only a
//! fixed set of tokens is recognized; everything else is rejected.

use crate::ConfigError;

/// Parses a boolean flag value
///
/// Accepted tokens (case-insensitive, surrounding whitespace ignored):
/// `true`/`false`, `yes`/`no`, `on`/`off`, `1`/`0`.
///
/// # Examples
///
/// ```
/// use frontier_crawler::config::parse_bool_flag;
///
/// assert!(parse_bool_flag("True").unwrap());
/// assert!(!parse_bool_flag("0").unwrap());
/// assert!(parse_bool_flag("__import__('os')").is_err());
/// ```
pub fn parse_bool_flag(raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(ConfigError::InvalidFlag(raw.to_string())),
    }
}
