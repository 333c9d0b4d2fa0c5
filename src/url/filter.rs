//! Crawl-scope filtering for discovered links
//!
//! Dropping a link here is a filtering decision, not an error: links
//! pointing outside the seed's host or at binary documents are
//! silently excluded from the frontier.

use crate::url::extract_host;
use url::Url;

/// File extensions that are never fetched, even when in-domain
const BLOCKED_EXTENSIONS: &[&str] = &[".docx", ".pdf", ".doc", ".zip", ".rar", ".7z"];

/// Returns true if the URL's host matches the crawl scope
///
/// # Arguments
///
/// * `url` - The candidate link
/// * `scope_host` - The lowercased host (with port, if any) of the seed
pub fn is_in_scope(url: &Url, scope_host: &str) -> bool {
    match extract_host(url) {
        Some(host) => host == scope_host,
        None => false,
    }
}

/// Returns true if the URL points at a non-crawlable file
///
/// The check is on the path only, so query strings do not hide an
/// extension, and it is case-insensitive.
pub fn is_blocked_resource(url: &Url) -> bool {
    let path = url.path().to_lowercase();
    BLOCKED_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

/// Returns true if a link should enter the frontier
pub fn is_crawlable(url: &Url, scope_host: &str) -> bool {
    is_in_scope(url, scope_host) && !is_blocked_resource(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_same_host_in_scope() {
        assert!(is_in_scope(&url("https://example.com/page"), "example.com"));
    }

    #[test]
    fn test_other_host_out_of_scope() {
        assert!(!is_in_scope(&url("https://other.com/page"), "example.com"));
    }

    #[test]
    fn test_subdomain_out_of_scope() {
        assert!(!is_in_scope(
            &url("https://blog.example.com/page"),
            "example.com"
        ));
    }

    #[test]
    fn test_host_comparison_case_insensitive() {
        assert!(is_in_scope(&url("https://EXAMPLE.com/page"), "example.com"));
    }

    #[test]
    fn test_port_mismatch_out_of_scope() {
        assert!(!is_in_scope(
            &url("http://example.com:8080/page"),
            "example.com"
        ));
    }

    #[test]
    fn test_blocked_extensions() {
        for ext in BLOCKED_EXTENSIONS {
            let u = url(&format!("https://example.com/file{}", ext));
            assert!(is_blocked_resource(&u), "expected {} to be blocked", ext);
        }
    }

    #[test]
    fn test_blocked_extension_uppercase() {
        assert!(is_blocked_resource(&url("https://example.com/REPORT.PDF")));
    }

    #[test]
    fn test_html_page_not_blocked() {
        assert!(!is_blocked_resource(&url("https://example.com/page.html")));
    }

    #[test]
    fn test_extension_in_query_not_blocked() {
        assert!(!is_blocked_resource(&url(
            "https://example.com/download?file=x.pdf"
        )));
    }

    #[test]
    fn test_crawlable_combines_both_filters() {
        assert!(is_crawlable(&url("https://example.com/a"), "example.com"));
        assert!(!is_crawlable(&url("https://other.com/a"), "example.com"));
        assert!(!is_crawlable(&url("https://example.com/a.zip"), "example.com"));
    }
}
