//! HTML to markdown conversion
//!
//! Thin wrapper around `htmd`. Conversion is deterministic (the same
//! input always yields the same output), which is what makes the
//! store's fingerprint comparison meaningful.

/// Converts a fetched page body into a markdown artifact
///
/// Conversion failures degrade to an empty artifact rather than an
/// error; the page still gets a file, and a later successful
/// conversion shows up as an update.
pub fn html_to_markdown(html: &str) -> String {
    htmd::convert(html).unwrap_or_default()
}
