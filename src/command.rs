//! Interactive session commands.
//!
//! Each input line is parsed as a multicall command: the first word names
//! the command. Free text arguments are rejoined with single spaces and the
//! two-character escape `\n` becomes a newline.

use clap::Parser;

use crate::error::AnnotationError;
use crate::notify::Notifier;
use crate::selection::SelectionAnchor;
use crate::session::{EditorState, Session};
use crate::store::Comment;
use crate::util::{expand_newlines, truncate_text};

/// Longest quote shown on a comment card before it is cut.
pub const QUOTE_PREVIEW_CHARS: usize = 100;

/// One line of session input.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(multicall = true)]
pub enum Command {
    /// Replace the compose text
    Compose {
        #[arg(num_args = 1.., required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },

    /// Render the compose text for review
    Process,

    /// Return to the compose view
    Back,

    /// Drop the compose text and every comment
    Clear,

    /// Select text in the rendered content
    Select {
        /// Which occurrence of the text to select
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
        nth: u64,

        #[arg(num_args = 1.., required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },

    /// Open the comment editor for the current selection
    Open,

    /// Confirm the open editor with a comment body
    Save {
        #[arg(num_args = 0.., trailing_var_arg = true, allow_hyphen_values = true)]
        body: Vec<String>,
    },

    /// Close the editor without saving
    Cancel,

    /// Edit comment number N
    Edit { number: usize },

    /// Delete comment number N
    Delete { number: usize },

    /// Show comment number N
    Focus { number: usize },

    /// List every comment
    List,

    /// Print the plain-text report
    Export,

    /// Copy the plain-text report
    Copy,

    /// Write the review page
    Write,

    /// End the session
    #[command(alias = "exit")]
    Quit,
}

impl Command {
    /// Parses one input line.
    ///
    /// # Errors
    ///
    /// Returns the clap error for unknown commands or bad arguments; its
    /// rendering includes usage help.
    pub fn parse_line(line: &str) -> Result<Self, clap::Error> {
        Self::try_parse_from(line.split_whitespace())
    }
}

/// What the caller should do after a command ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Done,
    /// Text to print
    Output(String),
    /// Copy the report through the host's clipboards
    Copy,
    /// Write the review page
    Write,
    Quit,
}

impl<N: Notifier> Session<N> {
    /// Runs one command against the session.
    ///
    /// # Errors
    ///
    /// Returns the session error; it has already been surfaced through the
    /// notifier.
    pub fn apply(&mut self, command: Command) -> Result<Reply, AnnotationError> {
        match command {
            Command::Compose { text } => {
                self.set_source(expand_newlines(&text.join(" ")));
                Ok(Reply::Done)
            }
            Command::Process => self.process().map(|_| Reply::Done),
            Command::Back => self.back_to_edit().map(|_| Reply::Done),
            Command::Clear => {
                self.clear();
                Ok(Reply::Done)
            }
            Command::Select { nth, text } => {
                let nth = usize::try_from(nth).unwrap_or(usize::MAX);
                let anchor = self.select_text(&text.join(" "), nth)?;
                Ok(anchor.map_or(Reply::Done, |a| Reply::Output(describe_selection(a))))
            }
            Command::Open => {
                self.open_create()?;
                Ok(Reply::Output(editor_prompt(self.editor())))
            }
            Command::Save { body } => {
                self.commit(&expand_newlines(&body.join(" ")))?;
                Ok(Reply::Done)
            }
            Command::Cancel => self.cancel().map(|_| Reply::Done),
            Command::Edit { number } => {
                let id = self.comment_id(number)?;
                self.open_edit(id)?;
                Ok(Reply::Output(editor_prompt(self.editor())))
            }
            Command::Delete { number } => {
                let id = self.comment_id(number)?;
                self.delete(id)?;
                Ok(Reply::Done)
            }
            Command::Focus { number } => {
                let id = self.comment_id(number)?;
                let output = self
                    .focus(id)
                    .zip(self.store().get(id))
                    .map(|(position, comment)| comment_card(position, comment));
                Ok(output.map_or(Reply::Done, Reply::Output))
            }
            Command::List => Ok(Reply::Output(listing(self.comments()))),
            Command::Export => self.export().map(Reply::Output),
            Command::Copy => Ok(Reply::Copy),
            Command::Write => Ok(Reply::Write),
            Command::Quit => Ok(Reply::Quit),
        }
    }
}

/// Text shown for the "add comment" affordance.
pub fn describe_selection(anchor: &SelectionAnchor) -> String {
    format!(
        "[+] Añadir comentario: \"{}\" (línea {}, columna {})",
        truncate_text(anchor.text(), QUOTE_PREVIEW_CHARS),
        anchor.bounds().line,
        anchor.bounds().column
    )
}

/// Text shown while the comment editor is open.
pub fn editor_prompt(editor: &EditorState) -> String {
    let Some(preview) = editor.preview() else {
        return String::new();
    };

    let mut prompt = format!("Texto seleccionado: \"{}\"\n", preview);
    if let Some(draft) = editor.draft().filter(|d| !d.is_empty()) {
        prompt.push_str(&format!("Comentario actual: {}\n", draft));
    }
    prompt.push_str(&format!(
        "save <comentario> para {}, cancel para cerrar",
        editor.save_label()
    ));
    prompt
}

/// Terminal rendering of one comment card.
pub fn comment_card(number: usize, comment: &Comment) -> String {
    let mut card = format!(
        "#{} \"{}\"",
        number,
        truncate_text(comment.selected_text(), QUOTE_PREVIEW_CHARS)
    );
    for line in comment.body().lines() {
        card.push_str("\n    ");
        card.push_str(line);
    }
    card
}

/// Terminal rendering of the comment panel.
pub fn listing(comments: &[Comment]) -> String {
    if comments.is_empty() {
        return "Aún no hay comentarios".to_string();
    }

    let cards: Vec<String> = comments
        .iter()
        .enumerate()
        .map(|(i, comment)| comment_card(i + 1, comment))
        .collect();
    format!("Comentarios ({})\n{}", comments.len(), cards.join("\n"))
}
