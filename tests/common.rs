//! Shared test utilities for integration tests.
//!
//! Provides helpers for building reviewed sessions, commenting on text and
//! inspecting the highlight markers of the rendered document.

#![allow(dead_code)]

use anyhow::{Context, Result};
use glosa::{Comment, CommentId, MemoryNotifier, Session};
use std::fs;
use std::path::{Path, PathBuf};

/// Creates a session with `markdown` already processed for review.
///
/// # Errors
///
/// Returns error if the markdown is blank
pub fn reviewed_session(markdown: &str) -> Result<Session<MemoryNotifier>> {
    let mut session = Session::new(MemoryNotifier::new());
    session.set_source(markdown);
    session.process()?;
    Ok(session)
}

/// Selects the `nth` occurrence of `text` and saves a comment on it.
///
/// # Errors
///
/// Returns error if the text is not found or the comment is rejected
pub fn comment_on(
    session: &mut Session<MemoryNotifier>,
    text: &str,
    nth: usize,
    body: &str,
) -> Result<Comment> {
    session
        .select_text(text, nth)?
        .with_context(|| format!("Selection of {:?} was empty", text))?;
    session.open_create()?;
    Ok(session.commit(body)?)
}

/// Lists `(comment id, display index)` for every marker in document order.
pub fn marker_indexes(session: &Session<MemoryNotifier>) -> Vec<(CommentId, Option<usize>)> {
    session
        .document()
        .map(|document| {
            document
                .markers()
                .into_iter()
                .map(|(_, marker)| (marker.comment_id, marker.index))
                .collect()
        })
        .unwrap_or_default()
}

/// Writes a fixture file and returns its path.
///
/// # Errors
///
/// Returns error if the file cannot be written
pub fn write_fixture(dir: &Path, name: &str, content: &str) -> Result<PathBuf> {
    let path = dir.join(name);
    fs::write(&path, content)?;
    Ok(path)
}
