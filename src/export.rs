//! Plain-text export of all comments.

use crate::store::Comment;

/// Width of the separator line between exported comments.
const SEPARATOR_WIDTH: usize = 40;

/// Formats comments into the plain-text review report.
///
/// Each comment produces a numbered block with the quoted text, the comment
/// body and a separator line. An empty slice yields an empty string, so
/// callers should refuse to export when there are no comments.
///
/// # Arguments
///
/// * `comments`: Comments in display order
///
/// # Returns
///
/// Report text ready for the clipboard
pub fn format_report(comments: &[Comment]) -> String {
    let separator = "─".repeat(SEPARATOR_WIDTH);
    let mut output = String::new();

    for (index, comment) in comments.iter().enumerate() {
        output.push_str(&format!("[{}] TEXTO COMENTADO:\n", index + 1));
        output.push_str(&format!("    \"{}\"\n\n", comment.selected_text()));
        output.push_str("    COMENTARIO:\n");
        output.push_str(&format!("    {}\n", comment.body()));
        output.push_str(&format!("\n{}\n\n", separator));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::AnnotationStore;

    #[test]
    fn test_format_report_empty() {
        assert_eq!(format_report(&[]), "");
    }

    #[test]
    fn test_format_report_two_comments_in_order() {
        // Arrange
        let mut store = AnnotationStore::new();
        store.add("Hello", "Good").expect("Should add");
        store.add("World", "Bad").expect("Should add");
        let separator = "─".repeat(40);

        // Act
        let report = format_report(store.list());

        // Assert
        let expected = format!(
            "[1] TEXTO COMENTADO:\n    \"Hello\"\n\n    COMENTARIO:\n    Good\n\n{sep}\n\n\
             [2] TEXTO COMENTADO:\n    \"World\"\n\n    COMENTARIO:\n    Bad\n\n{sep}\n\n",
            sep = separator
        );
        assert_eq!(report, expected);
        assert_eq!(report.matches("TEXTO COMENTADO:").count(), 2);
    }

    #[test]
    fn test_separator_is_forty_characters() {
        let mut store = AnnotationStore::new();
        store.add("x", "y").expect("Should add");

        let report = format_report(store.list());
        let separator_line = report
            .lines()
            .find(|line| line.starts_with('─'))
            .expect("Should contain separator");

        assert_eq!(separator_line.chars().count(), 40);
        assert!(separator_line.chars().all(|c| c == '─'));
    }

    #[test]
    fn test_multiline_body_kept_verbatim() {
        let mut store = AnnotationStore::new();
        store.add("quote", "line one\nline two").expect("Should add");

        let report = format_report(store.list());

        assert!(report.contains("    COMENTARIO:\n    line one\nline two\n"));
    }
}
