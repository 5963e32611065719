//! Comment panel components

use maud::{Markup, html};

use crate::command::QUOTE_PREVIEW_CHARS;
use crate::store::{Comment, CommentId};
use crate::util::truncate_text;

/// Renders one comment card
///
/// The card id matches the `data-comment-id` of its highlight so a click on
/// the highlight can scroll to it. The focused card carries the `pulse`
/// class.
///
/// # Arguments
///
/// * `number`: 1-based display number
/// * `comment`: Comment to render
/// * `focused`: Whether the card was last brought into view
///
/// # Returns
///
/// Comment card markup
pub fn comment_card(number: usize, comment: &Comment, focused: bool) -> Markup {
    let id = comment.id();
    html! {
        div class=(if focused { "comment-card pulse" } else { "comment-card" })
            id=(format!("comment-{}", id))
            data-card-id=(id.as_u64())
        {
            div class="comment-header" {
                span class="comment-number" { "#" (number) }
                time datetime=(comment.created_at().to_rfc3339()) {
                    (comment.created_at().format("%Y-%m-%d %H:%M").to_string())
                }
            }
            blockquote class="comment-quote" {
                "\"" (truncate_text(comment.selected_text(), QUOTE_PREVIEW_CHARS)) "\""
            }
            div class="comment-text" { (comment.body()) }
        }
    }
}

/// Renders the comment panel with count and cards
///
/// Shows an empty state until the first comment exists.
pub fn comment_panel(comments: &[Comment], focused: Option<CommentId>) -> Markup {
    html! {
        aside class="comments-panel" {
            div class="comments-header" {
                h2 { "Comentarios" }
                span class="comment-count" { (comments.len()) }
            }
            @if comments.is_empty() {
                p class="empty-state" { "Aún no hay comentarios" }
            } @else {
                div class="comments-list" {
                    @for (i, comment) in comments.iter().enumerate() {
                        (comment_card(i + 1, comment, focused == Some(comment.id())))
                    }
                }
            }
        }
    }
}
