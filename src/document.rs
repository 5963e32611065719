//! Rendered document tree.
//!
//! Holds rendered markdown as a tree of element, text and highlight marker
//! nodes. Text selections are expressed as boundaries inside text nodes,
//! and wrapping or unwrapping a selection follows the same rules a browser
//! applies to a live DOM range.

mod text;

pub use text::{Boundary, TextSelection};

use crate::error::AnchorError;
use crate::store::CommentId;
use crate::util::{escape_html, match_starts};
use text::TextMap;

/// Index of a node inside a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// HTML element with a fixed tag name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: &'static str,
    pub attrs: Vec<(&'static str, String)>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
        }
    }

    pub fn with_attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    /// Whether the element starts a new line in the visible text.
    pub fn is_block(&self) -> bool {
        matches!(
            self.tag,
            "p" | "h1"
                | "h2"
                | "h3"
                | "h4"
                | "h5"
                | "h6"
                | "blockquote"
                | "ul"
                | "ol"
                | "li"
                | "pre"
                | "table"
                | "tr"
                | "th"
                | "td"
                | "hr"
                | "div"
        )
    }

    fn is_void(&self) -> bool {
        matches!(self.tag, "br" | "hr" | "img" | "input")
    }
}

/// Highlight wrapper tying document content to a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    pub comment_id: CommentId,
    /// Cached display number, refreshed after every store mutation
    pub index: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Root,
    Element(Element),
    Text(String),
    Marker(Marker),
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Arena backed document tree.
///
/// Detached nodes stay in the arena but are unreachable from the root.
/// Every structural mutation bumps the revision, which lets selections
/// captured against an older shape be recognized as stale.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    revision: u64,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                kind: NodeKind::Root,
                parent: None,
                children: Vec::new(),
            }],
            revision: 0,
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.0].kind
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Appends an element as the last child of `parent`.
    pub fn append_element(&mut self, parent: NodeId, element: Element) -> NodeId {
        self.append(parent, NodeKind::Element(element))
    }

    /// Appends a text node as the last child of `parent`.
    pub fn append_text(&mut self, parent: NodeId, text: impl Into<String>) -> NodeId {
        self.append(parent, NodeKind::Text(text.into()))
    }

    fn append(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = self.alloc(kind, Some(parent));
        self.nodes[parent.0].children.push(id);
        self.revision += 1;
        id
    }

    fn alloc(&mut self, kind: NodeKind, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent,
            children: Vec::new(),
        });
        id
    }

    /// Whether the node is reachable from the root.
    pub fn is_attached(&self, id: NodeId) -> bool {
        let mut current = id;
        loop {
            if current == self.root() {
                return true;
            }
            match self.parent(current) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    /// Concatenated text of all text nodes below `id`.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        if let NodeKind::Text(text) = self.kind(id) {
            out.push_str(text);
        }
        for &child in self.children(id) {
            self.collect_text(child, out);
        }
    }

    /// Document text as a reader sees it.
    ///
    /// Text nodes are concatenated with a newline at line breaks and
    /// between block elements.
    pub fn visible_text(&self) -> String {
        TextMap::build(self).into_text()
    }

    /// Locates the `occurrence`-th (1-based) occurrence of `query` in the
    /// visible text. Overlapping occurrences are counted.
    ///
    /// Returns the boundaries a user dragging over that text would produce.
    pub fn find_text(&self, query: &str, occurrence: usize) -> Option<TextSelection> {
        if query.is_empty() || occurrence == 0 {
            return None;
        }
        let map = TextMap::build(self);
        let start = match_starts(map.text(), query).nth(occurrence - 1)?;
        map.selection(start, start + query.len())
    }

    /// Resolves a selection against the visible text.
    ///
    /// Returns the visible text with the byte range the selection covers.
    pub(crate) fn resolve_selection(
        &self,
        selection: &TextSelection,
    ) -> Option<(String, std::ops::Range<usize>)> {
        let map = TextMap::build(self);
        let start = map.offset_of(selection.start)?;
        let end = map.offset_of(selection.end)?;
        if start > end {
            return None;
        }
        Some((map.into_text(), start..end))
    }

    /// Highlight markers reachable from the root, in document order.
    pub fn markers(&self) -> Vec<(NodeId, &Marker)> {
        let mut out = Vec::new();
        self.collect_markers(self.root(), &mut out);
        out
    }

    fn collect_markers<'a>(&'a self, id: NodeId, out: &mut Vec<(NodeId, &'a Marker)>) {
        if let NodeKind::Marker(marker) = self.kind(id) {
            out.push((id, marker));
        }
        for &child in self.children(id) {
            self.collect_markers(child, out);
        }
    }

    /// Finds the attached marker of a comment.
    pub fn find_marker(&self, comment_id: CommentId) -> Option<NodeId> {
        self.markers()
            .into_iter()
            .find(|(_, marker)| marker.comment_id == comment_id)
            .map(|(id, _)| id)
    }

    /// Updates the cached display number of a marker node.
    ///
    /// Returns false if `id` is not a marker.
    pub fn set_marker_index(&mut self, id: NodeId, index: usize) -> bool {
        match &mut self.nodes[id.0].kind {
            NodeKind::Marker(marker) => {
                marker.index = Some(index);
                true
            }
            _ => false,
        }
    }

    /// Wraps the content between two text boundaries in a marker node.
    ///
    /// Both boundaries must sit in attached text nodes with the same
    /// parent, otherwise the range would partially contain an element and
    /// cannot be wrapped. The document is left untouched on failure.
    ///
    /// # Errors
    ///
    /// Returns `AnchorError::CrossesElementBoundary` when the boundaries
    /// have different parents, `AnchorError::Collapsed` for an empty or
    /// reversed range, and `AnchorError::InvalidBoundary` when a boundary
    /// is not a valid position inside an attached text node.
    pub fn wrap_range(
        &mut self,
        start: Boundary,
        end: Boundary,
        marker: Marker,
    ) -> Result<NodeId, AnchorError> {
        self.check_boundary(start)?;
        self.check_boundary(end)?;

        let parent = self.parent(start.node).ok_or(AnchorError::InvalidBoundary)?;
        if self.parent(end.node) != Some(parent) {
            return Err(AnchorError::CrossesElementBoundary);
        }

        let first_index = self.index_in_parent(parent, start.node)?;
        let last_index = self.index_in_parent(parent, end.node)?;
        let collapsed = if first_index == last_index {
            start.offset >= end.offset
        } else {
            first_index > last_index
                || (last_index == first_index + 1
                    && start.offset == self.text_len(start.node)
                    && end.offset == 0)
        };
        if collapsed {
            return Err(AnchorError::Collapsed);
        }

        // Split the end first so offsets into the start node stay valid
        // when both boundaries share a node.
        self.split_text(end.node, end.offset);
        let mut last = if end.offset == 0 {
            self.sibling(parent, end.node, -1)
                .ok_or(AnchorError::Collapsed)?
        } else {
            end.node
        };

        let first = if start.offset == 0 {
            start.node
        } else if let Some(right) = self.split_text(start.node, start.offset) {
            if last == start.node {
                last = right;
            }
            right
        } else {
            self.sibling(parent, start.node, 1)
                .ok_or(AnchorError::Collapsed)?
        };

        let first_index = self.index_in_parent(parent, first)?;
        let last_index = self.index_in_parent(parent, last)?;
        if first_index > last_index {
            return Err(AnchorError::Collapsed);
        }
        let wrapped: Vec<NodeId> = self.nodes[parent.0]
            .children
            .drain(first_index..=last_index)
            .collect();

        let marker_id = self.alloc(NodeKind::Marker(marker), Some(parent));
        for &child in &wrapped {
            self.nodes[child.0].parent = Some(marker_id);
        }
        self.nodes[marker_id.0].children = wrapped;
        self.nodes[parent.0].children.insert(first_index, marker_id);
        self.revision += 1;

        Ok(marker_id)
    }

    /// Replaces a marker with its children in place.
    ///
    /// Returns false if `id` is not an attached marker.
    pub fn unwrap_marker(&mut self, id: NodeId) -> bool {
        if !matches!(self.kind(id), NodeKind::Marker(_)) {
            return false;
        }
        let Some(parent) = self.parent(id) else {
            return false;
        };
        let Ok(index) = self.index_in_parent(parent, id) else {
            return false;
        };

        let children = std::mem::take(&mut self.nodes[id.0].children);
        for &child in &children {
            self.nodes[child.0].parent = Some(parent);
        }
        self.nodes[parent.0]
            .children
            .splice(index..=index, children);
        self.nodes[id.0].parent = None;
        self.revision += 1;
        true
    }

    /// Serializes the tree to HTML.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(self.root(), &mut out);
        out
    }

    fn write_html(&self, id: NodeId, out: &mut String) {
        match self.kind(id) {
            NodeKind::Root => self.write_children(id, out),
            NodeKind::Text(text) => out.push_str(&escape_html(text)),
            NodeKind::Element(element) => {
                out.push('<');
                out.push_str(element.tag);
                for (name, value) in &element.attrs {
                    out.push_str(&format!(" {}=\"{}\"", name, escape_html(value)));
                }
                if element.is_void() {
                    out.push_str(" />");
                } else {
                    out.push('>');
                    self.write_children(id, out);
                    out.push_str("</");
                    out.push_str(element.tag);
                    out.push('>');
                }
                if element.is_block() || element.tag == "br" {
                    out.push('\n');
                }
            }
            NodeKind::Marker(marker) => {
                out.push_str(&format!(
                    "<span class=\"highlighted-text\" data-comment-id=\"{}\"",
                    marker.comment_id
                ));
                if let Some(index) = marker.index {
                    out.push_str(&format!(" data-index=\"{}\"", index));
                }
                out.push_str(" title=\"Click para ver el comentario\">");
                self.write_children(id, out);
                out.push_str("</span>");
            }
        }
    }

    fn write_children(&self, id: NodeId, out: &mut String) {
        for &child in self.children(id) {
            self.write_html(child, out);
        }
    }

    fn check_boundary(&self, boundary: Boundary) -> Result<(), AnchorError> {
        if boundary.node.0 >= self.nodes.len() || !self.is_attached(boundary.node) {
            return Err(AnchorError::InvalidBoundary);
        }
        match self.kind(boundary.node) {
            NodeKind::Text(text) if text.is_char_boundary(boundary.offset) => Ok(()),
            _ => Err(AnchorError::InvalidBoundary),
        }
    }

    fn text_len(&self, id: NodeId) -> usize {
        match self.kind(id) {
            NodeKind::Text(text) => text.len(),
            _ => 0,
        }
    }

    fn index_in_parent(&self, parent: NodeId, child: NodeId) -> Result<usize, AnchorError> {
        self.children(parent)
            .iter()
            .position(|&c| c == child)
            .ok_or(AnchorError::InvalidBoundary)
    }

    fn sibling(&self, parent: NodeId, child: NodeId, step: isize) -> Option<NodeId> {
        let index = self.children(parent).iter().position(|&c| c == child)?;
        let target = index.checked_add_signed(step)?;
        self.children(parent).get(target).copied()
    }

    /// Splits a text node at `at`, moving the tail into a new sibling.
    ///
    /// Returns the new node, or None when `at` is at either end.
    fn split_text(&mut self, id: NodeId, at: usize) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let tail = match &mut self.nodes[id.0].kind {
            NodeKind::Text(text) if at > 0 && at < text.len() => text.split_off(at),
            _ => return None,
        };
        let index = self.children(parent).iter().position(|&c| c == id)?;
        let right = self.alloc(NodeKind::Text(tail), Some(parent));
        self.nodes[parent.0].children.insert(index + 1, right);
        Some(right)
    }
}
