//! Keeps highlight markers in step with the comment list.

use crate::document::Document;
use crate::store::{Comment, CommentId};

/// Sets every marker's display number to its comment's 1-based position.
///
/// Comments whose selection could not be anchored have no marker and are
/// skipped; they still appear in the comment list.
///
/// # Returns
///
/// Number of markers updated
pub fn refresh_indexes(document: &mut Document, comments: &[Comment]) -> usize {
    let mut updated = 0;
    for (position, comment) in comments.iter().enumerate() {
        if let Some(marker) = document.find_marker(comment.id())
            && document.set_marker_index(marker, position + 1)
        {
            updated += 1;
        }
    }
    updated
}

/// Removes a comment's marker while keeping the wrapped content in place.
///
/// # Returns
///
/// True if a marker was found and removed, false otherwise
pub fn unwrap(document: &mut Document, comment_id: CommentId) -> bool {
    match document.find_marker(comment_id) {
        Some(marker) => document.unwrap_marker(marker),
        None => false,
    }
}

/// Locates the comment card a highlight click should scroll to.
///
/// # Returns
///
/// 1-based position of the card in the list panel, or None if the comment
/// no longer exists
pub fn focus(comments: &[Comment], comment_id: CommentId) -> Option<usize> {
    comments
        .iter()
        .position(|c| c.id() == comment_id)
        .map(|i| i + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Element, NodeKind};
    use crate::selection::{anchor_as_highlight, capture};
    use crate::store::AnnotationStore;

    fn paragraph(text: &str) -> Document {
        let mut doc = Document::new();
        let root = doc.root();
        let p = doc.append_element(root, Element::new("p"));
        doc.append_text(p, text);
        doc
    }

    fn annotate(doc: &mut Document, store: &mut AnnotationStore, text: &str) -> CommentId {
        let selection = doc.find_text(text, 1).expect("Should find text");
        let anchor = capture(doc, &selection).expect("Should capture");
        let comment = store.add(anchor.text(), "note").expect("Should add");
        anchor_as_highlight(doc, &anchor, comment.id()).expect("Should wrap");
        comment.id()
    }

    fn displayed_index(doc: &Document, id: CommentId) -> Option<usize> {
        let marker = doc.find_marker(id)?;
        match doc.kind(marker) {
            NodeKind::Marker(m) => m.index,
            _ => None,
        }
    }

    #[test]
    fn test_refresh_after_delete_renumbers() {
        // Arrange
        let mut doc = paragraph("alpha beta gamma");
        let mut store = AnnotationStore::new();
        let a = annotate(&mut doc, &mut store, "alpha");
        let b = annotate(&mut doc, &mut store, "beta");
        let c = annotate(&mut doc, &mut store, "gamma");
        refresh_indexes(&mut doc, store.list());
        assert_eq!(displayed_index(&doc, c), Some(3));

        // Act
        store.remove(b);
        unwrap(&mut doc, b);
        let updated = refresh_indexes(&mut doc, store.list());

        // Assert
        assert_eq!(updated, 2);
        assert_eq!(displayed_index(&doc, a), Some(1));
        assert_eq!(displayed_index(&doc, c), Some(2));
        assert!(doc.find_marker(b).is_none());
    }

    #[test]
    fn test_refresh_skips_unanchored_comments() {
        let mut doc = paragraph("alpha beta");
        let mut store = AnnotationStore::new();
        store.add("missing", "no marker").expect("Should add");
        let anchored = annotate(&mut doc, &mut store, "beta");

        let updated = refresh_indexes(&mut doc, store.list());

        assert_eq!(updated, 1);
        assert_eq!(displayed_index(&doc, anchored), Some(2));
    }

    #[test]
    fn test_unwrap_preserves_visible_text() {
        // Arrange
        let mut doc = paragraph("keep every word");
        let mut store = AnnotationStore::new();
        let before = doc.visible_text();
        let id = annotate(&mut doc, &mut store, "every");

        // Act
        let removed = unwrap(&mut doc, id);
        store.remove(id);

        // Assert
        assert!(removed);
        assert_eq!(doc.visible_text(), before);
        assert!(doc.markers().is_empty());
    }

    #[test]
    fn test_unwrap_missing_marker_is_noop() {
        let mut doc = paragraph("text");
        let before = doc.to_html();

        assert!(!unwrap(&mut doc, CommentId::from_raw(99)));
        assert_eq!(doc.to_html(), before);
    }

    #[test]
    fn test_focus_returns_card_position() {
        let mut store = AnnotationStore::new();
        store.add("a", "1").expect("Should add");
        let second = store.add("b", "2").expect("Should add");

        assert_eq!(focus(store.list(), second.id()), Some(2));
        assert_eq!(focus(store.list(), CommentId::from_raw(1)), None);
    }
}
