//! Annotate rendered markdown with comments and export them as a report.

mod assets;
pub mod clipboard;
pub mod command;
pub mod components;
mod config;
pub mod document;
mod error;
mod export;
pub mod highlight;
mod markdown;
pub mod notify;
pub mod pages;
pub mod selection;
pub mod session;
mod store;
mod util;

pub use clipboard::{Clipboard, CommandClipboard, FileClipboard};
pub use command::{Command, Reply};
pub use config::Config;
pub use document::{Boundary, Document, NodeId, NodeKind, TextSelection};
pub use error::{AnchorError, AnnotationError, ClipboardError, CommentRef};
pub use export::format_report;
pub use markdown::{MarkdownRenderer, sanitize_url};
pub use notify::{MemoryNotifier, Notification, Notifier, Severity, TerminalNotifier};
pub use pages::review::{ReviewPageData, write_page};
pub use selection::{SelectionAnchor, SelectionBounds};
pub use session::{CopyOutcome, EditorState, Session, View};
pub use store::{AnnotationStore, Comment, CommentId};
