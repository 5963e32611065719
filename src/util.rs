//! Utility functions for glosa

/// Escapes HTML special characters.
///
/// # Arguments
///
/// * `text`: Plain text to escape
///
/// # Returns
///
/// HTML safe string usable in text and attribute positions
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Shortens text to at most `max_chars` characters, appending "..." when cut.
///
/// Counts characters rather than bytes so multibyte text is never split.
///
/// # Arguments
///
/// * `text`: Text to shorten
/// * `max_chars`: Maximum number of characters kept before the ellipsis
///
/// # Returns
///
/// Original text if short enough, otherwise the truncated prefix with "..."
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Expands the two-character escape `\n` typed on a single input line.
pub fn expand_newlines(text: &str) -> String {
    text.replace("\\n", "\n")
}

/// Byte offsets of every occurrence of `needle`, overlapping ones included.
pub fn match_starts<'a>(
    haystack: &'a str,
    needle: &'a str,
) -> impl Iterator<Item = usize> + 'a {
    haystack
        .char_indices()
        .map(|(i, _)| i)
        .filter(move |&i| !needle.is_empty() && haystack[i..].starts_with(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html_special_characters() {
        assert_eq!(
            escape_html("<a href=\"x\">Tom & Jerry's</a>"),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_truncate_text_short_unchanged() {
        assert_eq!(truncate_text("short", 100), "short");
        assert_eq!(truncate_text("", 10), "");
    }

    #[test]
    fn test_truncate_text_exact_length_unchanged() {
        let text = "a".repeat(100);
        assert_eq!(truncate_text(&text, 100), text);
    }

    #[test]
    fn test_truncate_text_long_gets_ellipsis() {
        let text = "b".repeat(101);
        let truncated = truncate_text(&text, 100);
        assert_eq!(truncated, format!("{}...", "b".repeat(100)));
    }

    #[test]
    fn test_truncate_text_multibyte() {
        assert_eq!(truncate_text("ñandú feliz", 5), "ñandú...");
    }

    #[test]
    fn test_expand_newlines() {
        assert_eq!(expand_newlines("line one\\nline two"), "line one\nline two");
        assert_eq!(expand_newlines("no escapes"), "no escapes");
    }

    #[test]
    fn test_match_starts_counts_overlaps() {
        let starts: Vec<usize> = match_starts("aaaa", "aa").collect();

        assert_eq!(starts, vec![0, 1, 2]);
    }

    #[test]
    fn test_match_starts_multibyte_and_empty() {
        assert_eq!(match_starts("año año", "año").collect::<Vec<_>>(), vec![0, 5]);
        assert_eq!(match_starts("abc", "").count(), 0);
    }
}
