//! Comment editor overlay

use maud::{Markup, html};

use crate::session::EditorState;

/// Renders the open comment editor as a modal overlay
///
/// Returns empty markup while the editor is closed.
pub fn editor_overlay(editor: &EditorState) -> Markup {
    let Some(preview) = editor.preview() else {
        return html! {};
    };

    html! {
        div class="modal-overlay" {
            div class="modal" {
                h3 { "Texto seleccionado" }
                blockquote class="selected-text-preview" { (preview) }
                textarea class="comment-input" readonly placeholder="Escribe tu comentario..." {
                    (editor.draft().unwrap_or_default())
                }
                div class="modal-actions" {
                    span class="button" { "Cancelar" }
                    span class="button primary" { (editor.save_label()) }
                }
            }
        }
    }
}
