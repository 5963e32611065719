//! Link sanitization for rendered markdown.

/// URL schemes that can run code when a link is followed.
const DANGEROUS_SCHEMES: &[&str] = &["javascript:", "vbscript:", "file:", "data:"];

/// Inline image formats allowed through `data:` URLs.
const SAFE_DATA_IMAGES: &[&str] = &[
    "data:image/png",
    "data:image/gif",
    "data:image/jpeg",
    "data:image/webp",
];

/// Returns the link target if it is safe to emit, None otherwise.
///
/// Handles different link types:
/// - Absolute URLs (http://, https://, mailto:) pass through
/// - Anchor and relative links pass through
/// - Script capable schemes (javascript:, vbscript:) are dropped
/// - `file:` and `data:` are dropped, except inline raster images
///
/// Scheme matching ignores ASCII case and leading whitespace, the way
/// browsers do.
///
/// # Arguments
///
/// * `url`: Link target from markdown
///
/// # Returns
///
/// Target to write into the href or src attribute
pub fn sanitize_url(url: &str) -> Option<&str> {
    let lowered = url.trim_start().to_ascii_lowercase();

    if SAFE_DATA_IMAGES.iter().any(|prefix| lowered.starts_with(prefix)) {
        return Some(url);
    }

    if DANGEROUS_SCHEMES
        .iter()
        .any(|scheme| lowered.starts_with(scheme))
    {
        return None;
    }

    Some(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_urls_unchanged() {
        assert_eq!(
            sanitize_url("https://example.com/a?b=c"),
            Some("https://example.com/a?b=c")
        );
        assert_eq!(sanitize_url("http://example.com"), Some("http://example.com"));
        assert_eq!(
            sanitize_url("mailto:someone@example.com"),
            Some("mailto:someone@example.com")
        );
    }

    #[test]
    fn test_anchor_and_relative_links_unchanged() {
        assert_eq!(sanitize_url("#section"), Some("#section"));
        assert_eq!(sanitize_url("./docs/guide.md"), Some("./docs/guide.md"));
        assert_eq!(sanitize_url("../up"), Some("../up"));
    }

    #[test]
    fn test_script_schemes_dropped() {
        assert_eq!(sanitize_url("javascript:alert(1)"), None);
        assert_eq!(sanitize_url("  JavaScript:alert(1)"), None);
        assert_eq!(sanitize_url("vbscript:msgbox"), None);
    }

    #[test]
    fn test_data_urls_only_for_images() {
        assert_eq!(
            sanitize_url("data:image/png;base64,AAAA"),
            Some("data:image/png;base64,AAAA")
        );
        assert_eq!(sanitize_url("data:text/html;base64,AAAA"), None);
        assert_eq!(sanitize_url("file:///etc/passwd"), None);
    }
}
