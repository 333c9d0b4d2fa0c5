use crate::{UrlError, UrlResult};
use url::Url;

/// Parses a seed URL string and validates its scheme
///
/// Only HTTP and HTTPS URLs can be crawled; anything else is rejected
/// up front rather than failing mid-crawl.
///
/// # Arguments
///
/// * `url_str` - The URL string to parse
///
/// # Returns
///
/// * `Ok(Url)` - Parsed absolute URL with a host
/// * `Err(UrlError)` - Malformed URL, unsupported scheme, or no host
pub fn parse_seed(url_str: &str) -> UrlResult<Url> {
    let url = Url::parse(url_str).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    Ok(url)
}

/// Derives the stable identity key for a URL
///
/// The key is used both for visited-set deduplication and as the
/// artifact file name:
///
/// 1. Strip the `http://` or `https://` scheme prefix
/// 2. Remove a trailing slash
/// 3. Fold `.` and `/` into `_`
///
/// The folding is lossy: two syntactically different URLs can map to
/// the same key (a path segment containing a dot vs. a directory
/// separator). This is an accepted approximation, so the same page
/// reached through either spelling is treated as one node.
///
/// # Examples
///
/// ```
/// use sitemark::url::artifact_key;
/// use url::Url;
///
/// let url = Url::parse("https://example.com/docs/intro/").unwrap();
/// assert_eq!(artifact_key(&url), "example_com_docs_intro");
/// ```
pub fn artifact_key(url: &Url) -> String {
    let mut s = url.as_str();

    s = s
        .strip_prefix("https://")
        .or_else(|| s.strip_prefix("http://"))
        .unwrap_or(s);

    let s = s.strip_suffix('/').unwrap_or(s);

    s.replace(['.', '/'], "_")
}
