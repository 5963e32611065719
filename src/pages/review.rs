//! Review page generation

use anyhow::{Context, Result};
use maud::{Markup, PreEscaped, html};
use std::fs;
use std::path::{Path, PathBuf};

use crate::assets::write_assets;

use crate::components::comment_list::comment_panel;
use crate::components::editor::editor_overlay;
use crate::components::export::export_panel;
use crate::components::layout::page_wrapper;
use crate::export::format_report;
use crate::notify::Notifier;
use crate::session::{EditorState, Session, View};
use crate::store::{Comment, CommentId};

/// Data container for review page generation
pub struct ReviewPageData<'a> {
    pub title: &'a str,
    pub view: View,
    pub source: &'a str,
    pub document_html: Option<String>,
    pub comments: &'a [Comment],
    pub focused: Option<CommentId>,
    pub editor: &'a EditorState,
}

impl<'a> ReviewPageData<'a> {
    /// Snapshots the parts of a session the page shows.
    pub fn from_session<N: Notifier>(title: &'a str, session: &'a Session<N>) -> Self {
        Self {
            title,
            view: session.view(),
            source: session.source(),
            document_html: session.document().map(|d| d.to_html()),
            comments: session.comments(),
            focused: session.focused(),
            editor: session.editor(),
        }
    }
}

/// Generates the review page HTML
///
/// The compose view shows the raw text. The review view shows the rendered
/// content with its highlights beside the comment panel. The export panel
/// appears once there is at least one comment, and an open editor is shown
/// as an overlay.
///
/// # Arguments
///
/// * `data`: Review page data container
///
/// # Returns
///
/// Complete HTML markup for the review page
pub fn generate(data: ReviewPageData<'_>) -> Markup {
    page_wrapper(
        data.title,
        &["assets/review.css"],
        &["assets/review.js"],
        html! {
            header class="page-header" {
                h1 class="page-title" { (data.title) }
                span class="view-badge" {
                    @match data.view {
                        View::Compose => { "Edición" }
                        View::Review => { "Revisión" }
                    }
                }
            }

            @match (data.view, &data.document_html) {
                (View::Review, Some(document_html)) => {
                    main class="review-layout" {
                        article class="rendered-content" {
                            (PreEscaped(document_html))
                        }
                        (comment_panel(data.comments, data.focused))
                    }
                }
                _ => {
                    section class="input-section" {
                        textarea class="response-input" readonly rows="16" { (data.source) }
                    }
                }
            }

            @if !data.comments.is_empty() {
                (export_panel(&format_report(data.comments)))
            }

            (editor_overlay(data.editor))
        },
    )
}

/// Writes `index.html` and its assets to the output directory
///
/// # Errors
///
/// Returns error if the directory or any file cannot be written.
pub fn write_page(output_dir: &Path, data: ReviewPageData<'_>) -> Result<PathBuf> {
    fs::create_dir_all(output_dir).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            output_dir.display()
        )
    })?;
    write_assets(&output_dir.join("assets"))?;

    let path = output_dir.join("index.html");
    let comment_count = data.comments.len();
    fs::write(&path, generate(data).into_string())
        .with_context(|| format!("Failed to write review page: {}", path.display()))?;
    log::info!(
        "Wrote review page with {} comments to {}",
        comment_count,
        path.display()
    );
    Ok(path)
}
