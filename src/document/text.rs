//! Mapping between visible text offsets and text node boundaries.

use super::{Document, NodeId, NodeKind};

/// Position inside a text node, as a byte offset into its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Boundary {
    pub node: NodeId,
    pub offset: usize,
}

/// Raw text selection: a pair of boundaries in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextSelection {
    pub start: Boundary,
    pub end: Boundary,
}

#[derive(Debug)]
struct Segment {
    node: NodeId,
    start: usize,
    len: usize,
}

impl Segment {
    fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Visible text of a document plus the text node each byte came from.
///
/// Newlines inserted at line breaks and block edges belong to no segment.
#[derive(Debug)]
pub(super) struct TextMap {
    text: String,
    segments: Vec<Segment>,
}

impl TextMap {
    pub(super) fn build(doc: &Document) -> Self {
        let mut map = Self {
            text: String::new(),
            segments: Vec::new(),
        };
        map.walk(doc, doc.root());
        map
    }

    fn walk(&mut self, doc: &Document, id: NodeId) {
        match doc.kind(id) {
            NodeKind::Text(text) => {
                self.segments.push(Segment {
                    node: id,
                    start: self.text.len(),
                    len: text.len(),
                });
                self.text.push_str(text);
            }
            NodeKind::Element(element) if element.tag == "br" => self.line_break(),
            NodeKind::Element(element) if element.is_block() => {
                self.line_break();
                self.walk_children(doc, id);
                self.line_break();
            }
            _ => self.walk_children(doc, id),
        }
    }

    fn walk_children(&mut self, doc: &Document, id: NodeId) {
        for &child in doc.children(id) {
            self.walk(doc, child);
        }
    }

    fn line_break(&mut self) {
        if !self.text.is_empty() && !self.text.ends_with('\n') {
            self.text.push('\n');
        }
    }

    pub(super) fn text(&self) -> &str {
        &self.text
    }

    pub(super) fn into_text(self) -> String {
        self.text
    }

    /// Visible text offset of a boundary.
    ///
    /// Returns None for a boundary outside its node or inside a multibyte
    /// character.
    pub(super) fn offset_of(&self, boundary: Boundary) -> Option<usize> {
        self.segments
            .iter()
            .find(|s| s.node == boundary.node && boundary.offset <= s.len)
            .map(|s| s.start + boundary.offset)
            .filter(|&offset| self.text.is_char_boundary(offset))
    }

    /// Boundaries covering visible text `start..end`.
    ///
    /// A start that falls on an inserted newline moves forward to the next
    /// text node; an end on a newline moves back to the previous one.
    pub(super) fn selection(&self, start: usize, end: usize) -> Option<TextSelection> {
        let start = self
            .segments
            .iter()
            .find(|s| s.start <= start && start < s.end())
            .or_else(|| self.segments.iter().find(|s| s.start >= start && s.len > 0))
            .map(|s| Boundary {
                node: s.node,
                offset: start.saturating_sub(s.start),
            })?;
        let end = self
            .segments
            .iter()
            .find(|s| s.start < end && end <= s.end())
            .or_else(|| {
                self.segments
                    .iter()
                    .rev()
                    .find(|s| s.end() <= end && s.len > 0)
            })
            .map(|s| Boundary {
                node: s.node,
                offset: end.min(s.end()) - s.start,
            })?;
        Some(TextSelection { start, end })
    }
}
