//! URL helpers for the crawler
//!
//! URLs are treated as opaque string keys everywhere else in the crate; this
//! module only answers the few structural questions the crawler needs:
//! is it an absolute HTTP(S) URL, and where does its site's robots.txt live.

mod domain;

use crate::{UrlError, UrlResult};
use url::Url;

pub use domain::extract_site;

/// Parses an absolute HTTP(S) URL with a host
///
/// # Errors
///
/// * `UrlError::Parse` - the string is not an absolute URL
/// * `UrlError::InvalidScheme` - the scheme is not `http` or `https`
/// * `UrlError::MissingHost` - the URL has no host
pub fn parse_http_url(raw: &str) -> UrlResult<Url> {
    let url = Url::parse(raw.trim()).map_err(|e| UrlError::Parse(format!("{}: {}", raw, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingHost(raw.to_string()));
    }

    Ok(url)
}

/// Returns true if `raw` is an absolute HTTP(S) URL
pub fn is_http_url(raw: &str) -> bool {
    parse_http_url(raw).is_ok()
}

/// Derives the robots.txt location for the site serving `raw`
///
/// # Examples
///
/// ```
/// use frontier_crawler::url::robots_location;
///
/// assert_eq!(
///     robots_location("https://example.com/a/b?c=d").unwrap(),
///     "https://example.com/robots.txt"
/// );
/// ```
pub fn robots_location(raw: &str) -> UrlResult<String> {
    let url = parse_http_url(raw)?;
    let site = extract_site(&url).ok_or_else(|| UrlError::MissingHost(raw.to_string()))?;
    Ok(format!("{}/robots.txt", site))
}
