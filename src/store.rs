//! Ordered comment collection.

use chrono::{DateTime, Utc};
use std::fmt;

use crate::error::{AnnotationError, CommentRef};

/// Stable comment identifier.
///
/// Derived from the creation time in milliseconds and strictly increasing
/// within one store, so two comments created in the same millisecond still
/// get distinct ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommentId(u64);

impl CommentId {
    /// Wraps a raw identifier value.
    pub fn from_raw(value: u64) -> Self {
        Self(value)
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single annotation: quoted text plus free-form body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    id: CommentId,
    selected_text: String,
    body: String,
    created_at: DateTime<Utc>,
    occurrence: usize,
}

impl Comment {
    pub fn id(&self) -> CommentId {
        self.id
    }

    /// Text the comment refers to, as captured from the selection.
    pub fn selected_text(&self) -> &str {
        &self.selected_text
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Which occurrence (1-based) of the selected text in the visible
    /// document text the selection started at.
    pub fn occurrence(&self) -> usize {
        self.occurrence
    }
}

/// Ordered comment collection, the single source of truth for numbering.
///
/// Insertion order is display order. Display numbers are never stored:
/// a comment's number is always its 1-based position in [`list`](Self::list).
#[derive(Debug, Default, Clone)]
pub struct AnnotationStore {
    comments: Vec<Comment>,
    last_id: u64,
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a comment on the first occurrence of `selected_text`.
    ///
    /// # Errors
    ///
    /// Returns `AnnotationError::Validation` if the body or the selected
    /// text is empty after trimming. The store is untouched in that case.
    pub fn add(&mut self, selected_text: &str, body: &str) -> Result<Comment, AnnotationError> {
        self.add_at(selected_text, body, 1)
    }

    /// Appends a comment that records which occurrence of the selected text
    /// it was made on.
    ///
    /// # Errors
    ///
    /// Same validation as [`add`](Self::add).
    pub fn add_at(
        &mut self,
        selected_text: &str,
        body: &str,
        occurrence: usize,
    ) -> Result<Comment, AnnotationError> {
        let body = validate_body(body)?;
        let selected_text = selected_text.trim();
        if selected_text.is_empty() {
            return Err(AnnotationError::validation(
                "Error: No hay texto seleccionado",
            ));
        }

        let comment = Comment {
            id: self.next_id(),
            selected_text: selected_text.to_string(),
            body: body.to_string(),
            created_at: Utc::now(),
            occurrence: occurrence.max(1),
        };
        log::debug!("Adding comment {} on {:?}", comment.id, comment.selected_text);
        self.comments.push(comment.clone());
        Ok(comment)
    }

    /// Replaces the body of an existing comment.
    ///
    /// Selected text and creation time are left untouched.
    ///
    /// # Errors
    ///
    /// Returns `AnnotationError::NotFound` for an unknown id and
    /// `AnnotationError::Validation` for an empty body.
    pub fn update(&mut self, id: CommentId, new_body: &str) -> Result<Comment, AnnotationError> {
        let comment = self
            .comments
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(AnnotationError::NotFound(CommentRef::Id(id)))?;
        let body = validate_body(new_body)?;
        comment.body = body.to_string();
        Ok(comment.clone())
    }

    /// Removes a comment, closing the gap in the numbering.
    ///
    /// Unknown ids are ignored, so removing twice is the same as removing once.
    pub fn remove(&mut self, id: CommentId) -> Option<Comment> {
        let index = self.comments.iter().position(|c| c.id == id)?;
        Some(self.comments.remove(index))
    }

    /// Comments in display order.
    pub fn list(&self) -> &[Comment] {
        &self.comments
    }

    pub fn count(&self) -> usize {
        self.comments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    pub fn get(&self, id: CommentId) -> Option<&Comment> {
        self.comments.iter().find(|c| c.id == id)
    }

    /// 1-based display position of a comment.
    pub fn position(&self, id: CommentId) -> Option<usize> {
        self.comments.iter().position(|c| c.id == id).map(|i| i + 1)
    }

    /// Resolves a 1-based display number.
    pub fn by_number(&self, number: usize) -> Option<&Comment> {
        number.checked_sub(1).and_then(|i| self.comments.get(i))
    }

    /// Drops every comment. Ids keep increasing afterwards.
    pub fn clear(&mut self) {
        self.comments.clear();
    }

    fn next_id(&mut self) -> CommentId {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        self.last_id = now.max(self.last_id + 1);
        CommentId(self.last_id)
    }
}

fn validate_body(body: &str) -> Result<&str, AnnotationError> {
    let body = body.trim();
    if body.is_empty() {
        return Err(AnnotationError::validation(
            "Por favor, escribe un comentario",
        ));
    }
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_preserves_insertion_order() {
        // Arrange
        let mut store = AnnotationStore::new();

        // Act
        store.add("alpha", "first").expect("Should add first");
        store.add("beta", "second").expect("Should add second");
        store.add("gamma", "third").expect("Should add third");

        // Assert
        let texts: Vec<&str> = store.list().iter().map(|c| c.selected_text()).collect();
        assert_eq!(texts, vec!["alpha", "beta", "gamma"]);
        assert_eq!(store.count(), 3);
    }

    #[test]
    fn test_add_trims_body_and_text() {
        let mut store = AnnotationStore::new();

        let comment = store.add("  quoted  ", "\n body \t").expect("Should add");

        assert_eq!(comment.selected_text(), "quoted");
        assert_eq!(comment.body(), "body");
        assert_eq!(comment.occurrence(), 1);
    }

    #[test]
    fn test_add_whitespace_body_rejected_without_mutation() {
        // Arrange
        let mut store = AnnotationStore::new();
        store.add("kept", "body").expect("Should add");

        // Act
        let empty = store.add("text", "");
        let blank = store.add("text", "   \n\t ");

        // Assert
        assert!(matches!(empty, Err(AnnotationError::Validation(_))));
        assert!(matches!(blank, Err(AnnotationError::Validation(_))));
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn test_add_empty_selection_rejected() {
        let mut store = AnnotationStore::new();

        let result = store.add("  ", "body");

        assert!(matches!(result, Err(AnnotationError::Validation(_))));
        assert!(store.is_empty());
    }

    #[test]
    fn test_ids_are_unique_and_increasing() {
        let mut store = AnnotationStore::new();

        let ids: Vec<CommentId> = (0..50)
            .map(|i| store.add("text", &format!("body {}", i)).expect("Should add").id())
            .collect();

        for pair in ids.windows(2) {
            assert!(pair[0] < pair[1], "Ids should strictly increase: {:?}", pair);
        }
    }

    #[test]
    fn test_update_changes_only_body() {
        // Arrange
        let mut store = AnnotationStore::new();
        let original = store.add("foo", "nice").expect("Should add");

        // Act
        let updated = store.update(original.id(), "great").expect("Should update");

        // Assert
        assert_eq!(updated.body(), "great");
        assert_eq!(updated.selected_text(), original.selected_text());
        assert_eq!(updated.created_at(), original.created_at());
        assert_eq!(updated.id(), original.id());
        assert_eq!(store.list(), &[updated]);
    }

    #[test]
    fn test_update_unknown_id_not_found() {
        let mut store = AnnotationStore::new();

        let result = store.update(CommentId::from_raw(7), "body");

        assert_eq!(
            result,
            Err(AnnotationError::NotFound(CommentRef::Id(CommentId::from_raw(7))))
        );
    }

    #[test]
    fn test_update_empty_body_keeps_previous() {
        let mut store = AnnotationStore::new();
        let comment = store.add("foo", "nice").expect("Should add");

        let result = store.update(comment.id(), "  ");

        assert!(matches!(result, Err(AnnotationError::Validation(_))));
        assert_eq!(store.get(comment.id()).map(|c| c.body()), Some("nice"));
    }

    #[test]
    fn test_remove_is_idempotent() {
        // Arrange
        let mut store = AnnotationStore::new();
        let a = store.add("a", "1").expect("Should add");
        let b = store.add("b", "2").expect("Should add");

        // Act
        let first = store.remove(a.id());
        let snapshot = store.list().to_vec();
        let second = store.remove(a.id());

        // Assert
        assert!(first.is_some());
        assert!(second.is_none());
        assert_eq!(store.list(), snapshot.as_slice());
        assert_eq!(store.position(b.id()), Some(1));
    }

    #[test]
    fn test_by_number_is_one_based() {
        let mut store = AnnotationStore::new();
        store.add("a", "1").expect("Should add");
        store.add("b", "2").expect("Should add");

        assert!(store.by_number(0).is_none());
        assert_eq!(store.by_number(1).map(|c| c.selected_text()), Some("a"));
        assert_eq!(store.by_number(2).map(|c| c.selected_text()), Some("b"));
        assert!(store.by_number(3).is_none());
    }

    #[test]
    fn test_clear_keeps_ids_increasing() {
        let mut store = AnnotationStore::new();
        let before = store.add("a", "1").expect("Should add");

        store.clear();
        let after = store.add("b", "2").expect("Should add");

        assert_eq!(store.count(), 1);
        assert!(after.id() > before.id());
    }
}
