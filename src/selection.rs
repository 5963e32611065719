//! Selection capture and highlight anchoring.
//!
//! A raw selection is a pair of text boundaries in the rendered document.
//! Capturing it produces a [`SelectionAnchor`]: the trimmed quoted text,
//! the range, where it sits visually, and the document revision it belongs
//! to. Anchoring wraps that range in a highlight marker. Anchoring is best
//! effort and callers proceed without a highlight when it fails.

use crate::document::{Document, Marker, TextSelection};
use crate::error::AnchorError;
use crate::store::{Comment, CommentId};
use crate::util::match_starts;

/// Visual position of a selection in the visible text, 1-based.
///
/// Hosts use it to place the "add comment" affordance next to the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionBounds {
    pub line: usize,
    pub column: usize,
}

/// Transient capture of the user's current selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionAnchor {
    text: String,
    range: TextSelection,
    revision: u64,
    occurrence: usize,
    bounds: SelectionBounds,
}

impl SelectionAnchor {
    /// Selected text, trimmed.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Document revision the selection was captured against.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Which occurrence (1-based) of the text the selection starts at.
    pub fn occurrence(&self) -> usize {
        self.occurrence
    }

    pub fn bounds(&self) -> SelectionBounds {
        self.bounds
    }
}

/// Captures a raw selection.
///
/// Returns None when the selected text is empty after trimming or when the
/// boundaries do not resolve against the document.
pub fn capture(document: &Document, selection: &TextSelection) -> Option<SelectionAnchor> {
    let (visible, range) = document.resolve_selection(selection)?;
    let raw = &visible[range.clone()];
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }

    let start = range.start + (raw.len() - raw.trim_start().len());
    let prefix = &visible[..start];
    let line = prefix.matches('\n').count() + 1;
    let line_start = prefix.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let column = prefix[line_start..].chars().count() + 1;
    let occurrence = match_starts(&visible, text)
        .take_while(|&i| i <= start)
        .count()
        .max(1);

    Some(SelectionAnchor {
        text: text.to_string(),
        range: *selection,
        revision: document.revision(),
        occurrence,
        bounds: SelectionBounds { line, column },
    })
}

/// Wraps the anchor's range in a highlight marker tagged with `comment_id`.
///
/// # Errors
///
/// Returns `AnchorError::Stale` if the document changed since the capture,
/// or any wrapping failure from [`Document::wrap_range`].
pub fn anchor_as_highlight(
    document: &mut Document,
    anchor: &SelectionAnchor,
    comment_id: CommentId,
) -> Result<(), AnchorError> {
    if anchor.revision != document.revision() {
        return Err(AnchorError::Stale {
            captured: anchor.revision,
            current: document.revision(),
        });
    }
    wrap(document, anchor.range, comment_id)
}

/// Re-anchors an existing comment on a freshly rendered document.
///
/// Locates the recorded occurrence of the quoted text and wraps it.
///
/// # Errors
///
/// Returns `AnchorError::QuoteNotFound` if the text no longer occurs, or
/// any wrapping failure.
pub fn reanchor(document: &mut Document, comment: &Comment) -> Result<(), AnchorError> {
    let selection = document
        .find_text(comment.selected_text(), comment.occurrence())
        .ok_or(AnchorError::QuoteNotFound)?;
    wrap(document, selection, comment.id())
}

fn wrap(
    document: &mut Document,
    selection: TextSelection,
    comment_id: CommentId,
) -> Result<(), AnchorError> {
    document
        .wrap_range(
            selection.start,
            selection.end,
            Marker {
                comment_id,
                index: None,
            },
        )
        .map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Boundary, Element};
    use crate::store::AnnotationStore;

    /// Builds `<h1>Title</h1><p>one <strong>two</strong> one</p>`.
    fn sample() -> Document {
        let mut doc = Document::new();
        let root = doc.root();
        let h1 = doc.append_element(root, Element::new("h1"));
        doc.append_text(h1, "Title");
        let p = doc.append_element(root, Element::new("p"));
        doc.append_text(p, "one ");
        let strong = doc.append_element(p, Element::new("strong"));
        doc.append_text(strong, "two");
        doc.append_text(p, " one");
        doc
    }

    #[test]
    fn test_capture_trims_and_locates() {
        // Arrange
        let doc = sample();
        let selection = doc.find_text(" one", 1).expect("Should find text");

        // Act
        let anchor = capture(&doc, &selection).expect("Should capture");

        // Assert
        assert_eq!(anchor.text(), "one");
        assert_eq!(anchor.occurrence(), 2);
        assert_eq!(anchor.bounds(), SelectionBounds { line: 2, column: 9 });
        assert_eq!(anchor.revision(), doc.revision());
    }

    #[test]
    fn test_capture_whitespace_only_is_none() {
        let doc = sample();
        let selection = doc.find_text(" ", 1).expect("Should find space");

        assert!(capture(&doc, &selection).is_none());
    }

    #[test]
    fn test_capture_inside_multibyte_char_is_none() {
        // Arrange
        let mut doc = Document::new();
        let root = doc.root();
        let p = doc.append_element(root, Element::new("p"));
        let text = doc.append_text(p, "año bueno");
        let selection = TextSelection {
            start: Boundary { node: text, offset: 0 },
            end: Boundary { node: text, offset: 2 },
        };

        // Act
        let anchor = capture(&doc, &selection);

        // Assert
        assert!(anchor.is_none());
    }

    #[test]
    fn test_overlapping_occurrence_reanchors_same_span() {
        // Arrange: select the second "aa" in "aaa", which overlaps the first
        let mut doc = Document::new();
        let root = doc.root();
        let p = doc.append_element(root, Element::new("p"));
        let text = doc.append_text(p, "aaa");
        let selection = TextSelection {
            start: Boundary { node: text, offset: 1 },
            end: Boundary { node: text, offset: 3 },
        };

        // Act
        let anchor = capture(&doc, &selection).expect("Should capture");
        let found = doc
            .find_text(anchor.text(), anchor.occurrence())
            .expect("Should find occurrence");

        // Assert
        assert_eq!(anchor.occurrence(), 2);
        assert_eq!(found, selection);
    }

    #[test]
    fn test_capture_first_line_bounds() {
        let doc = sample();
        let selection = doc.find_text("itle", 1).expect("Should find text");

        let anchor = capture(&doc, &selection).expect("Should capture");

        assert_eq!(anchor.bounds(), SelectionBounds { line: 1, column: 2 });
        assert_eq!(anchor.occurrence(), 1);
    }

    #[test]
    fn test_anchor_as_highlight_wraps_selection() {
        // Arrange
        let mut doc = sample();
        let selection = doc.find_text("Title", 1).expect("Should find text");
        let anchor = capture(&doc, &selection).expect("Should capture");

        // Act
        let result = anchor_as_highlight(&mut doc, &anchor, CommentId::from_raw(1));

        // Assert
        assert!(result.is_ok());
        assert!(doc.find_marker(CommentId::from_raw(1)).is_some());
    }

    #[test]
    fn test_anchor_as_highlight_crossing_fails() {
        let mut doc = sample();
        let selection = doc.find_text("one tw", 1).expect("Should find text");
        let anchor = capture(&doc, &selection).expect("Should capture");

        let result = anchor_as_highlight(&mut doc, &anchor, CommentId::from_raw(2));

        assert_eq!(result, Err(AnchorError::CrossesElementBoundary));
        assert!(doc.markers().is_empty());
    }

    #[test]
    fn test_anchor_as_highlight_stale_selection_fails() {
        // Arrange: capture, then mutate the document with another highlight
        let mut doc = sample();
        let first = doc.find_text("Title", 1).expect("Should find text");
        let first = capture(&doc, &first).expect("Should capture");
        let second = doc.find_text("two", 1).expect("Should find text");
        let second = capture(&doc, &second).expect("Should capture");
        anchor_as_highlight(&mut doc, &first, CommentId::from_raw(1)).expect("Should wrap");

        // Act
        let result = anchor_as_highlight(&mut doc, &second, CommentId::from_raw(2));

        // Assert
        assert!(matches!(result, Err(AnchorError::Stale { .. })));
    }

    #[test]
    fn test_reanchor_uses_recorded_occurrence() {
        // Arrange
        let mut store = AnnotationStore::new();
        let comment = store.add_at("one", "second one", 2).expect("Should add");
        let mut doc = sample();

        // Act
        reanchor(&mut doc, &comment).expect("Should reanchor");

        // Assert
        let marker = doc.find_marker(comment.id()).expect("Should have marker");
        let parent = doc.parent(marker).expect("Marker should be attached");
        let children = doc.children(parent);
        assert_eq!(children.last(), Some(&marker), "Should wrap the trailing occurrence");
    }

    #[test]
    fn test_reanchor_missing_quote() {
        let mut store = AnnotationStore::new();
        let comment = store.add("absent", "body").expect("Should add");
        let mut doc = sample();

        let result = reanchor(&mut doc, &comment);

        assert_eq!(result, Err(AnchorError::QuoteNotFound));
    }
}
