//! Clipboard access for the exported report.
//!
//! The primary path hands text to a system clipboard helper. When no
//! helper accepts it, the fallback path writes the report somewhere the
//! user can see and copy it by hand.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::ClipboardError;

/// Destination for copied text.
pub trait Clipboard {
    /// Places `text` on the clipboard.
    ///
    /// # Errors
    ///
    /// Returns `ClipboardError` if the text could not be delivered.
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// System clipboard helpers tried in order.
const HELPERS: &[(&str, &[&str])] = &[
    ("pbcopy", &[]),
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
    ("clip", &[]),
];

/// Pipes text into the first clipboard helper that accepts it.
#[derive(Debug, Clone)]
pub struct CommandClipboard {
    helpers: Vec<(String, Vec<String>)>,
}

impl Default for CommandClipboard {
    fn default() -> Self {
        Self {
            helpers: HELPERS
                .iter()
                .map(|(program, args)| {
                    (
                        program.to_string(),
                        args.iter().map(|a| a.to_string()).collect(),
                    )
                })
                .collect(),
        }
    }
}

impl CommandClipboard {
    /// Uses a single helper program instead of the built-in list.
    pub fn with_helper(program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            helpers: vec![(
                program.into(),
                args.iter().map(|a| a.to_string()).collect(),
            )],
        }
    }

    fn pipe(program: &str, args: &[String], text: &str) -> Result<(), ClipboardError> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take()
            && let Err(e) = stdin.write_all(text.as_bytes())
        {
            // Close the pipe so the helper can exit, then reap it
            drop(stdin);
            if let Err(wait_error) = child.wait() {
                log::debug!("Failed to reap {}: {}", program, wait_error);
            }
            return Err(e.into());
        }

        let status = child.wait()?;
        if status.success() {
            Ok(())
        } else {
            Err(ClipboardError::Unavailable(format!(
                "{} exited with {}",
                program, status
            )))
        }
    }
}

impl Clipboard for CommandClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut failures = Vec::new();
        for (program, args) in &self.helpers {
            match Self::pipe(program, args, text) {
                Ok(()) => {
                    log::debug!("Copied {} bytes with {}", text.len(), program);
                    return Ok(());
                }
                Err(e) => failures.push(format!("{}: {}", program, e)),
            }
        }
        Err(ClipboardError::Unavailable(failures.join("; ")))
    }
}

/// Fallback copy path: writes text to a visible file.
#[derive(Debug, Clone)]
pub struct FileClipboard {
    path: PathBuf,
}

impl FileClipboard {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Clipboard for FileClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        fs::write(&self.path, text)?;
        log::info!("Wrote report to {}", self.path.display());
        Ok(())
    }
}
