//! HTML link extraction
//!
//! Best-effort extraction of hyperlink targets from a fetched page.
//! Malformed markup never fails: `scraper` parses what it can and the
//! rest is ignored.

use scraper::{Html, Selector};
use url::Url;

/// Extracts all followable links from an HTML document
///
/// # Link Extraction Rules
///
/// **Include:** `<a href="...">` tags, resolved against `base_url`.
///
/// **Exclude:**
/// - `javascript:`, `mailto:`, `tel:` links and data URIs
/// - Fragment-only links (same-page anchors)
/// - `<a href="..." download>` links
/// - Anything that does not resolve to an HTTP(S) URL
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `base_url` - The URL the page was fetched from, for resolving
///   relative hrefs
///
/// # Returns
///
/// The absolute URLs found in the document, in document order,
/// duplicates included (deduplication happens at the visited set).
pub fn extract_links(html: &str, base_url: &Url) -> Vec<Url> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();

    let Ok(selector) = Selector::parse("a[href]") else {
        return links;
    };

    for element in document.select(&selector) {
        if element.value().attr("download").is_some() {
            continue;
        }

        if let Some(href) = element.value().attr("href") {
            if let Some(url) = resolve_link(href, base_url) {
                links.push(url);
            }
        }
    }

    links
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded.
fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    // Same-page anchors
    if href.starts_with('#') {
        return None;
    }

    match base_url.join(href) {
        Ok(mut url) => {
            if url.scheme() != "http" && url.scheme() != "https" {
                return None;
            }
            // The fragment never changes the fetched resource
            url.set_fragment(None);
            Some(url)
        }
        Err(_) => None,
    }
}
