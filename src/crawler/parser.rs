//! HTML anchor extraction
//!
//! Collects `<a href>` targets in document order. By default only hrefs that
//! are already absolute HTTP(S) URLs are kept; with a base URL, relative hrefs
//! are resolved against it instead of being discarded.

use crate::url::is_http_url;
use scraper::{Html, Selector};
use url::Url;

/// Extracts link targets from an HTML document
///
/// # Link Extraction Rules
///
/// **Always skipped:**
/// - `javascript:`, `mailto:`, `tel:` links
/// - Data URIs
/// - Fragment-only links (`#section`)
/// - Empty hrefs
///
/// **Without `base_url`:** any href that does not parse as an absolute
/// `http`/`https` URL is dropped.
///
/// **With `base_url`:** absolute HTTP(S) hrefs are kept as written, others
/// are joined onto the base and kept if the result is HTTP(S).
///
/// # Example
///
/// ```
/// use frontier_crawler::crawler::extract_links;
///
/// let html = r#"<a href="https://example.com/a">A</a><a href="/b">B</a>"#;
/// assert_eq!(extract_links(html, None), vec!["https://example.com/a".to_string()]);
/// ```
pub fn extract_links(html: &str, base_url: Option<&Url>) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            if let Some(href) = element.value().attr("href") {
                if let Some(link) = resolve_link(href, base_url) {
                    links.push(link);
                }
            }
        }
    }

    links
}

/// Turns one href into a crawlable link, or None if it should be excluded
fn resolve_link(href: &str, base_url: Option<&Url>) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lower = href.to_ascii_lowercase();
    if lower.starts_with("javascript:")
        || lower.starts_with("mailto:")
        || lower.starts_with("tel:")
        || lower.starts_with("data:")
    {
        return None;
    }

    if is_http_url(href) {
        return Some(href.to_string());
    }

    let base = base_url?;
    match base.join(href) {
        Ok(absolute_url) if matches!(absolute_url.scheme(), "http" | "https") => {
            Some(absolute_url.to_string())
        }
        _ => None,
    }
}
