//! Sitemap adapter
//!
//! Two lookups: the sitemaps a site declares in its robots.txt, and the page
//! URLs listed in one sitemap document (`<urlset><url><loc>`).

use crate::crawler::fetcher::{Fetch, FetchError};
use crate::robots::ParsedRobots;
use crate::url::is_http_url;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct UrlSet {
    #[serde(rename = "url", default)]
    urls: Vec<UrlEntry>,
}

#[derive(Debug, Deserialize)]
struct UrlEntry {
    loc: Option<String>,
}

/// Returns the sitemap URLs declared in the robots.txt at `robots_location`
///
/// Only http(s) values are returned, in declaration order.
pub async fn sitemap_urls_from_robots<F: Fetch>(
    fetcher: &F,
    robots_location: &str,
) -> Result<Vec<String>, FetchError> {
    let page = fetcher.get(robots_location).await?;

    if !page.is_success() {
        return Err(FetchError::Status {
            url: robots_location.to_string(),
            status: page.status,
        });
    }

    Ok(ParsedRobots::from_content(&page.body)
        .sitemaps()
        .into_iter()
        .filter(|sitemap| is_http_url(sitemap))
        .collect())
}

/// Fetches one sitemap and returns the page URLs it lists, in document order
pub async fn page_urls_from_sitemap<F: Fetch>(
    fetcher: &F,
    sitemap_url: &str,
) -> Result<Vec<String>, FetchError> {
    let page = fetcher.get(sitemap_url).await?;

    if !page.is_success() {
        return Err(FetchError::Status {
            url: sitemap_url.to_string(),
            status: page.status,
        });
    }

    parse_urlset(&page.body).map_err(|message| FetchError::Parse {
        url: sitemap_url.to_string(),
        message,
    })
}

/// Extracts trimmed, non-empty `<loc>` values from a `<urlset>` document
///
/// A sitemap index (`<sitemapindex>`) has no `<url>` children and yields an
/// empty list.
pub(crate) fn parse_urlset(xml: &str) -> Result<Vec<String>, String> {
    let set: UrlSet = quick_xml::de::from_str(xml).map_err(|e| e.to_string())?;

    Ok(set
        .urls
        .into_iter()
        .filter_map(|entry| entry.loc)
        .map(|loc| loc.trim().to_string())
        .filter(|loc| !loc.is_empty())
        .collect())
}
