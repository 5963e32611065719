//! Annotation session: one user, one document, one comment list.
//!
//! The session owns every piece of mutable state (compose text, rendered
//! document, comment store, pending selection, editor) and drives the
//! comment lifecycle. Store mutations always happen before the document
//! is refreshed from them.

mod editor;

pub use editor::EditorState;

use crate::clipboard::Clipboard;
use crate::document::{Document, TextSelection};
use crate::error::{AnnotationError, CommentRef};
use crate::export::format_report;
use crate::highlight;
use crate::markdown::MarkdownRenderer;
use crate::notify::{Notifier, Severity};
use crate::selection::{self, SelectionAnchor};
use crate::store::{AnnotationStore, Comment, CommentId};

/// Top-level view shown to the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum View {
    /// Raw markdown input
    #[default]
    Compose,
    /// Rendered content with highlights and the comment panel
    Review,
}

/// Which path delivered the exported report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Clipboard,
    Fallback,
    Failed,
}

/// Single ephemeral editing session.
pub struct Session<N: Notifier> {
    renderer: MarkdownRenderer<'static>,
    notifier: N,
    source: String,
    view: View,
    document: Option<Document>,
    store: AnnotationStore,
    pending: Option<SelectionAnchor>,
    editor: EditorState,
    focused: Option<CommentId>,
}

impl<N: Notifier> Session<N> {
    pub fn new(notifier: N) -> Self {
        Self {
            renderer: MarkdownRenderer::new(),
            notifier,
            source: String::new(),
            view: View::Compose,
            document: None,
            store: AnnotationStore::new(),
            pending: None,
            editor: EditorState::Closed,
            focused: None,
        }
    }

    /// Replaces the compose text. The rendered document is untouched until
    /// the next [`process`](Self::process).
    pub fn set_source(&mut self, text: impl Into<String>) {
        self.source = text.into();
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    pub fn comments(&self) -> &[Comment] {
        self.store.list()
    }

    pub fn store(&self) -> &AnnotationStore {
        &self.store
    }

    /// Selection waiting for the "add comment" affordance.
    pub fn pending(&self) -> Option<&SelectionAnchor> {
        self.pending.as_ref()
    }

    pub fn editor(&self) -> &EditorState {
        &self.editor
    }

    /// Comment whose card was last brought into view.
    pub fn focused(&self) -> Option<CommentId> {
        self.focused
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    /// Renders the compose text and switches to the review view.
    ///
    /// Existing comments are re-anchored on the new document by their
    /// quoted text; comments whose text no longer occurs stay in the list
    /// without a highlight.
    ///
    /// # Errors
    ///
    /// Returns `AnnotationError::Validation` when the compose text is blank
    /// and `AnnotationError::EditorBusy` while the editor is open.
    pub fn process(&mut self) -> Result<(), AnnotationError> {
        if self.editor.is_open() {
            return Err(self.reject(AnnotationError::EditorBusy, Severity::Warning));
        }
        let text = self.source.trim().to_string();
        if text.is_empty() {
            return Err(self.reject(
                AnnotationError::validation("Por favor, ingresa una respuesta para procesar"),
                Severity::Warning,
            ));
        }

        let mut document = self.renderer.parse(&text);
        for comment in self.store.list() {
            if let Err(e) = selection::reanchor(&mut document, comment) {
                log::debug!("Could not re-anchor comment {}: {}", comment.id(), e);
            }
        }
        let anchored = highlight::refresh_indexes(&mut document, self.store.list());
        log::info!(
            "Rendered {} bytes of markdown, {} of {} comments highlighted",
            text.len(),
            anchored,
            self.store.count()
        );

        self.source = text;
        self.document = Some(document);
        self.pending = None;
        self.focused = None;
        self.view = View::Review;
        self.notifier.notify(
            "Contenido procesado. Selecciona texto para comentar.",
            Severity::Success,
        );
        Ok(())
    }

    /// Returns to the compose view and hides the "add comment" affordance.
    ///
    /// # Errors
    ///
    /// Returns `AnnotationError::EditorBusy` while the editor is open.
    pub fn back_to_edit(&mut self) -> Result<(), AnnotationError> {
        if self.editor.is_open() {
            return Err(self.reject(AnnotationError::EditorBusy, Severity::Warning));
        }
        self.view = View::Compose;
        self.pending = None;
        Ok(())
    }

    /// Drops the compose text, the rendered document and every comment.
    pub fn clear(&mut self) {
        self.source.clear();
        self.store.clear();
        self.document = None;
        self.pending = None;
        self.editor = EditorState::Closed;
        self.focused = None;
        self.view = View::Compose;
        self.notifier.notify("Contenido limpiado", Severity::Info);
    }

    /// Captures a raw selection in the rendered document.
    ///
    /// Selections made while the editor is open are ignored. An empty
    /// selection clears the pending one.
    ///
    /// # Errors
    ///
    /// Returns `AnnotationError::NoDocument` outside the review view.
    pub fn select(
        &mut self,
        selection: &TextSelection,
    ) -> Result<Option<&SelectionAnchor>, AnnotationError> {
        if self.editor.is_open() {
            log::debug!("Ignoring selection while the comment editor is open");
            return Ok(None);
        }
        let Some(document) = self.review_document() else {
            return Err(self.reject(AnnotationError::NoDocument, Severity::Warning));
        };

        self.pending = selection::capture(document, selection);
        if let Some(anchor) = &self.pending {
            log::debug!(
                "Captured selection {:?} at line {}, column {}",
                anchor.text(),
                anchor.bounds().line,
                anchor.bounds().column
            );
        }
        Ok(self.pending.as_ref())
    }

    /// Selects the `occurrence`-th occurrence of `query` in the rendered
    /// text, as if the user had dragged over it.
    ///
    /// # Errors
    ///
    /// Returns `AnnotationError::NoDocument` outside the review view and
    /// `AnnotationError::Validation` when the text does not occur.
    pub fn select_text(
        &mut self,
        query: &str,
        occurrence: usize,
    ) -> Result<Option<&SelectionAnchor>, AnnotationError> {
        if self.editor.is_open() {
            log::debug!("Ignoring selection while the comment editor is open");
            return Ok(None);
        }
        let Some(document) = self.review_document() else {
            return Err(self.reject(AnnotationError::NoDocument, Severity::Warning));
        };

        match document.find_text(query.trim(), occurrence) {
            Some(found) => self.select(&found),
            None => {
                self.pending = None;
                Err(self.reject(
                    AnnotationError::validation("Texto no encontrado en el contenido"),
                    Severity::Warning,
                ))
            }
        }
    }

    /// Opens the editor for the pending selection.
    ///
    /// The selection moves into the editor and cannot be reused.
    ///
    /// # Errors
    ///
    /// Returns `AnnotationError::EditorBusy` if the editor is open and
    /// `AnnotationError::Validation` when nothing is selected.
    pub fn open_create(&mut self) -> Result<(), AnnotationError> {
        if self.editor.is_open() {
            return Err(self.reject(AnnotationError::EditorBusy, Severity::Warning));
        }
        let Some(anchor) = self.pending.take() else {
            return Err(self.reject(
                AnnotationError::validation("Error: No hay texto seleccionado"),
                Severity::Error,
            ));
        };

        log::debug!("Opening editor to comment on {:?}", anchor.text());
        self.editor = EditorState::OpenForCreate {
            anchor,
            draft: String::new(),
        };
        Ok(())
    }

    /// Opens the editor on an existing comment, prefilled with its body.
    ///
    /// # Errors
    ///
    /// Returns `AnnotationError::EditorBusy` if the editor is open and
    /// `AnnotationError::NotFound` for an unknown id.
    pub fn open_edit(&mut self, id: CommentId) -> Result<(), AnnotationError> {
        if self.editor.is_open() {
            return Err(self.reject(AnnotationError::EditorBusy, Severity::Warning));
        }
        let Some(comment) = self.store.get(id) else {
            return Err(self.reject(
                AnnotationError::NotFound(CommentRef::Id(id)),
                Severity::Warning,
            ));
        };

        log::debug!("Opening editor on comment {}", id);
        self.editor = EditorState::OpenForEdit {
            id,
            preview: comment.selected_text().to_string(),
            draft: comment.body().to_string(),
        };
        self.pending = None;
        Ok(())
    }

    /// Confirms the open editor with `body`.
    ///
    /// Creating adds the comment and then tries to highlight its selection;
    /// a failed highlight is logged and otherwise ignored. Editing replaces
    /// the body. An invalid body keeps the editor open with the draft.
    ///
    /// # Errors
    ///
    /// Returns `AnnotationError::EditorClosed` when nothing is open,
    /// `AnnotationError::Validation` for a blank body, and
    /// `AnnotationError::NotFound` if the edited comment vanished.
    pub fn commit(&mut self, body: &str) -> Result<Comment, AnnotationError> {
        match std::mem::take(&mut self.editor) {
            EditorState::Closed => {
                Err(self.reject(AnnotationError::EditorClosed, Severity::Warning))
            }
            EditorState::OpenForCreate { anchor, .. } => {
                let comment = match self.store.add_at(anchor.text(), body, anchor.occurrence()) {
                    Ok(comment) => comment,
                    Err(e) => {
                        self.editor = EditorState::OpenForCreate {
                            anchor,
                            draft: body.to_string(),
                        };
                        return Err(self.reject(e, Severity::Warning));
                    }
                };

                if let Some(document) = self.document.as_mut()
                    && let Err(e) = selection::anchor_as_highlight(document, &anchor, comment.id())
                {
                    log::debug!("Could not highlight text for comment {}: {}", comment.id(), e);
                }
                self.refresh();
                self.notifier.notify("Comentario agregado", Severity::Success);
                Ok(comment)
            }
            EditorState::OpenForEdit { id, preview, .. } => match self.store.update(id, body) {
                Ok(comment) => {
                    self.refresh();
                    self.notifier
                        .notify("Comentario actualizado", Severity::Success);
                    Ok(comment)
                }
                Err(e @ AnnotationError::Validation(_)) => {
                    self.editor = EditorState::OpenForEdit {
                        id,
                        preview,
                        draft: body.to_string(),
                    };
                    Err(self.reject(e, Severity::Warning))
                }
                Err(e) => Err(self.reject(e, Severity::Warning)),
            },
        }
    }

    /// Closes the editor without touching the store.
    ///
    /// Cancelling a create discards its selection.
    ///
    /// # Errors
    ///
    /// Returns `AnnotationError::EditorClosed` when nothing is open.
    pub fn cancel(&mut self) -> Result<(), AnnotationError> {
        match std::mem::take(&mut self.editor) {
            EditorState::Closed => {
                Err(self.reject(AnnotationError::EditorClosed, Severity::Warning))
            }
            EditorState::OpenForCreate { anchor, .. } => {
                log::debug!("Discarding selection {:?}", anchor.text());
                Ok(())
            }
            EditorState::OpenForEdit { id, .. } => {
                log::debug!("Discarding edit of comment {}", id);
                Ok(())
            }
        }
    }

    /// Deletes a comment and unwraps its highlight.
    ///
    /// Unknown ids are a no-op.
    ///
    /// # Errors
    ///
    /// Returns `AnnotationError::EditorBusy` while the editor is open.
    pub fn delete(&mut self, id: CommentId) -> Result<Option<Comment>, AnnotationError> {
        if self.editor.is_open() {
            return Err(self.reject(AnnotationError::EditorBusy, Severity::Warning));
        }

        let removed = self.store.remove(id);
        if let Some(document) = self.document.as_mut() {
            highlight::unwrap(document, id);
        }
        self.refresh();
        self.pending = None;
        if self.focused == Some(id) {
            self.focused = None;
        }

        match &removed {
            Some(_) => self.notifier.notify("Comentario eliminado", Severity::Info),
            None => log::debug!("Ignoring delete of unknown comment {}", id),
        }
        Ok(removed)
    }

    /// Brings a comment's card into view.
    ///
    /// # Returns
    ///
    /// 1-based card position, or None if the comment does not exist
    pub fn focus(&mut self, id: CommentId) -> Option<usize> {
        let position = highlight::focus(self.store.list(), id);
        self.focused = position.map(|_| id);
        position
    }

    /// Resolves a 1-based display number to a comment id.
    ///
    /// # Errors
    ///
    /// Returns `AnnotationError::NotFound` for a number outside the list.
    pub fn comment_id(&mut self, number: usize) -> Result<CommentId, AnnotationError> {
        match self.store.by_number(number) {
            Some(comment) => Ok(comment.id()),
            None => Err(self.reject(
                AnnotationError::NotFound(CommentRef::Number(number)),
                Severity::Warning,
            )),
        }
    }

    /// Formats every comment as the plain-text report.
    ///
    /// # Errors
    ///
    /// Returns `AnnotationError::Validation` when there are no comments.
    pub fn export(&mut self) -> Result<String, AnnotationError> {
        if self.store.is_empty() {
            return Err(self.reject(
                AnnotationError::validation("No hay comentarios para exportar"),
                Severity::Warning,
            ));
        }
        Ok(format_report(self.store.list()))
    }

    /// Copies the report, falling back to the secondary path on failure.
    ///
    /// # Errors
    ///
    /// Returns `AnnotationError::Validation` when there are no comments.
    pub fn copy_report(
        &mut self,
        primary: &mut dyn Clipboard,
        fallback: &mut dyn Clipboard,
    ) -> Result<CopyOutcome, AnnotationError> {
        let report = self.export()?;

        let outcome = match primary.write_text(&report) {
            Ok(()) => CopyOutcome::Clipboard,
            Err(e) => {
                log::warn!("Clipboard copy failed, using fallback: {}", e);
                match fallback.write_text(&report) {
                    Ok(()) => CopyOutcome::Fallback,
                    Err(e) => {
                        log::warn!("Fallback copy failed: {}", e);
                        CopyOutcome::Failed
                    }
                }
            }
        };

        match outcome {
            CopyOutcome::Failed => self
                .notifier
                .notify("No se pudo copiar el informe", Severity::Error),
            _ => self
                .notifier
                .notify("¡Copiado al portapapeles!", Severity::Success),
        }
        Ok(outcome)
    }

    fn review_document(&self) -> Option<&Document> {
        match self.view {
            View::Review => self.document.as_ref(),
            View::Compose => None,
        }
    }

    fn refresh(&mut self) {
        if let Some(document) = self.document.as_mut() {
            highlight::refresh_indexes(document, self.store.list());
        }
    }

    /// Surfaces an error as a notification and hands it back.
    fn reject(&mut self, error: AnnotationError, severity: Severity) -> AnnotationError {
        let message = match &error {
            AnnotationError::Validation(message) => message.clone(),
            AnnotationError::NotFound(_) => "El comentario ya no existe".to_string(),
            AnnotationError::EditorBusy => "Cierra el editor de comentarios primero".to_string(),
            AnnotationError::EditorClosed => "No hay ningún comentario en edición".to_string(),
            AnnotationError::NoDocument => {
                "Procesa el contenido antes de seleccionar texto".to_string()
            }
        };
        log::debug!("Rejected: {}", error);
        self.notifier.notify(&message, severity);
        error
    }
}
