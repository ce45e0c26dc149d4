use url::Url;

/// Extracts the site origin (`scheme://host[:port]`) from a URL
///
/// The port is kept only when it is not the scheme's default, matching what
/// appears in the URL's authority. Hosts are lowercased by the URL parser.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use frontier_crawler::url::extract_site;
///
/// let url = Url::parse("https://Example.com/path?q=1").unwrap();
/// assert_eq!(extract_site(&url), Some("https://example.com".to_string()));
///
/// let url = Url::parse("http://127.0.0.1:8080/page").unwrap();
/// assert_eq!(extract_site(&url), Some("http://127.0.0.1:8080".to_string()));
/// ```
pub fn extract_site(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    match url.port() {
        Some(port) => Some(format!("{}://{}:{}", url.scheme(), host, port)),
        None => Some(format!("{}://{}", url.scheme(), host)),
    }
}
