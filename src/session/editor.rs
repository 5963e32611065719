//! Comment editor state shared by the create and edit flows.

use crate::selection::SelectionAnchor;
use crate::store::CommentId;

/// Comment editor overlay state.
///
/// Both flows show the quoted text as a read-only preview above a free
/// text body. Only one editor can be open at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditorState {
    #[default]
    Closed,
    /// Creating a comment for a captured selection
    OpenForCreate {
        anchor: SelectionAnchor,
        draft: String,
    },
    /// Editing the body of an existing comment
    OpenForEdit {
        id: CommentId,
        preview: String,
        draft: String,
    },
}

impl EditorState {
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    /// Quoted text shown above the body input.
    pub fn preview(&self) -> Option<&str> {
        match self {
            Self::Closed => None,
            Self::OpenForCreate { anchor, .. } => Some(anchor.text()),
            Self::OpenForEdit { preview, .. } => Some(preview),
        }
    }

    /// Current contents of the body input.
    pub fn draft(&self) -> Option<&str> {
        match self {
            Self::Closed => None,
            Self::OpenForCreate { draft, .. } | Self::OpenForEdit { draft, .. } => Some(draft),
        }
    }

    /// Label of the confirm button.
    pub fn save_label(&self) -> &'static str {
        match self {
            Self::OpenForEdit { .. } => "Actualizar Comentario",
            _ => "Guardar Comentario",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_editor_has_no_preview() {
        let editor = EditorState::default();

        assert!(!editor.is_open());
        assert!(editor.preview().is_none());
        assert!(editor.draft().is_none());
        assert_eq!(editor.save_label(), "Guardar Comentario");
    }

    #[test]
    fn test_edit_editor_preview_and_draft() {
        // Arrange
        let editor = EditorState::OpenForEdit {
            id: CommentId::from_raw(1),
            preview: "quoted".to_string(),
            draft: "old body".to_string(),
        };

        // Act
        let label = editor.save_label();

        // Assert
        assert!(editor.is_open());
        assert_eq!(editor.preview(), Some("quoted"));
        assert_eq!(editor.draft(), Some("old body"));
        assert_eq!(label, "Actualizar Comentario");
    }
}
