//! Error types for the annotation session.

use std::fmt;
use thiserror::Error;

use crate::store::CommentId;

/// Reference to a comment as the user named it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentRef {
    /// Stable comment identifier
    Id(CommentId),
    /// 1-based display number in the comment list
    Number(usize),
}

impl fmt::Display for CommentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "id {}", id),
            Self::Number(n) => write!(f, "#{}", n),
        }
    }
}

/// Recoverable failures of store and session operations.
///
/// None of these are fatal. The session turns each one into a user
/// notification and aborts the triggering action without side effects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnnotationError {
    /// Empty comment body, empty selection or empty compose text
    #[error("{0}")]
    Validation(String),

    /// Comment vanished before the operation reached it
    #[error("Comment not found: {0}")]
    NotFound(CommentRef),

    /// Comment editor is already open
    #[error("Comment editor is already open")]
    EditorBusy,

    /// No comment editor is open
    #[error("No comment editor is open")]
    EditorClosed,

    /// Selection attempted before any content was processed
    #[error("No rendered document")]
    NoDocument,
}

impl AnnotationError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

/// Failure to wrap a selection in a highlight marker.
///
/// Anchoring is best effort: callers log these and carry on without a
/// visual highlight.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnchorError {
    /// Range partially contains an element
    #[error("Selection crosses element boundaries")]
    CrossesElementBoundary,

    /// Range contains no content
    #[error("Selection is collapsed")]
    Collapsed,

    /// Document changed after the selection was captured
    #[error("Selection is stale (captured at revision {captured}, document at {current})")]
    Stale { captured: u64, current: u64 },

    /// Boundary is not inside an attached text node or splits a character
    #[error("Invalid selection boundary")]
    InvalidBoundary,

    /// Quoted text no longer occurs in the document
    #[error("Quoted text not found in document")]
    QuoteNotFound,
}

/// Failure to place text on the clipboard.
#[derive(Debug, Error)]
pub enum ClipboardError {
    /// No clipboard mechanism accepted the text
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),

    /// IO error while handing text to the clipboard
    #[error("Clipboard IO error: {0}")]
    Io(#[from] std::io::Error),
}
