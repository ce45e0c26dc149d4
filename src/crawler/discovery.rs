//! Link discovery adapter
//!
//! Fetches a page and returns the links found on it. Failures come back as a
//! typed `FetchError`; the frontier engine decides to treat them as "no links".

use crate::crawler::fetcher::{Fetch, FetchError};
use crate::crawler::parser::extract_links;
use url::Url;

/// Fetches `page_url` and extracts its anchor targets in document order
///
/// # Errors
///
/// * any transport error from the fetcher
/// * `FetchError::Status` for non-2xx responses
/// * `FetchError::ContentMismatch` when the response declares a non-HTML type
pub async fn discover_links<F: Fetch>(
    fetcher: &F,
    page_url: &str,
    resolve_relative: bool,
) -> Result<Vec<String>, FetchError> {
    let page = fetcher.get(page_url).await?;

    if !page.is_success() {
        return Err(FetchError::Status {
            url: page_url.to_string(),
            status: page.status,
        });
    }

    if !page.is_html() {
        return Err(FetchError::ContentMismatch {
            url: page_url.to_string(),
            content_type: page.content_type.unwrap_or_default(),
        });
    }

    let base = if resolve_relative {
        Url::parse(&page.final_url)
            .or_else(|_| Url::parse(page_url))
            .ok()
    } else {
        None
    };

    Ok(extract_links(&page.body, base.as_ref()))
}
