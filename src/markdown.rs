//! Markdown rendering with GitHub Flavored Markdown support.
//!
//! This module renders markdown using comrak with GFM extensions (tables,
//! strikethrough, autolinks, task lists) into a document tree that can be
//! selected, highlighted and serialized back to sanitized HTML.

mod links;
mod renderer;

pub use links::sanitize_url;
pub use renderer::MarkdownRenderer;
