//! Markdown rendering into an annotatable document tree.

use comrak::nodes::{AstNode, ListType, NodeValue};
use comrak::{Arena, Options, parse_document};

use super::links::sanitize_url;
use crate::document::{Document, Element, NodeId};

/// Renders markdown into a [`Document`] and sanitized HTML.
///
/// Provides GFM extensions including tables, strikethrough, autolinks and
/// task lists. Comments quote literal substrings of the rendered text, so
/// the renderer keeps text exactly as written: no smart punctuation and no
/// generated heading ids. Soft line breaks become hard breaks and raw HTML
/// is dropped.
pub struct MarkdownRenderer<'a> {
    options: Options<'a>,
}

impl<'a> MarkdownRenderer<'a> {
    /// Creates renderer with GitHub Flavored Markdown options.
    ///
    /// Configures GFM extensions and output settings:
    /// - Tables, strikethrough, autolinks, task lists
    /// - Soft breaks rendered as line breaks
    /// - Literal punctuation, no heading ids
    /// - Raw HTML omitted
    pub fn new() -> Self {
        let mut options = Options::default();

        // Extension options (GFM features)
        options.extension.strikethrough = true;
        options.extension.table = true;
        options.extension.autolink = true;
        options.extension.tasklist = true;
        options.extension.header_ids = None;

        // Quoted text must match the source characters
        options.parse.smart = false;

        options.render.hardbreaks = true;
        options.render.unsafe_ = false;

        Self { options }
    }

    /// Parses markdown into a document tree.
    ///
    /// # Arguments
    ///
    /// * `content`: Markdown content to render
    ///
    /// # Returns
    ///
    /// Document tree ready for selection and highlighting
    pub fn parse(&self, content: &str) -> Document {
        let arena = Arena::new();
        let root = parse_document(&arena, content, &self.options);

        let mut document = Document::new();
        let target = document.root();
        for child in root.children() {
            self.build(&mut document, target, child, false);
        }
        log::debug!(
            "Rendered {} bytes of markdown into {} bytes of text",
            content.len(),
            document.visible_text().len()
        );
        document
    }

    /// Renders markdown content to HTML string.
    ///
    /// # Arguments
    ///
    /// * `content`: Markdown content to render
    ///
    /// # Returns
    ///
    /// Sanitized HTML
    pub fn render(&self, content: &str) -> String {
        self.parse(content).to_html()
    }

    /// Converts one AST node and its subtree into document nodes.
    ///
    /// `header_row` is true while converting the cells of a table header.
    fn build<'n>(
        &self,
        document: &mut Document,
        parent: NodeId,
        node: &'n AstNode<'n>,
        header_row: bool,
    ) {
        let ast = node.data.borrow();
        let target = match &ast.value {
            NodeValue::Paragraph if in_tight_list(node) => parent,
            NodeValue::Paragraph => document.append_element(parent, Element::new("p")),
            NodeValue::Heading(heading) => {
                document.append_element(parent, Element::new(heading_tag(heading.level)))
            }
            NodeValue::BlockQuote => document.append_element(parent, Element::new("blockquote")),
            NodeValue::List(list) => match list.list_type {
                ListType::Bullet => document.append_element(parent, Element::new("ul")),
                ListType::Ordered if list.start != 1 => document.append_element(
                    parent,
                    Element::new("ol").with_attr("start", list.start.to_string()),
                ),
                ListType::Ordered => document.append_element(parent, Element::new("ol")),
            },
            NodeValue::Item(_) => document.append_element(parent, Element::new("li")),
            NodeValue::TaskItem(symbol) => {
                let item = document.append_element(
                    parent,
                    Element::new("li").with_attr("class", "task-list-item"),
                );
                let mut checkbox = Element::new("input")
                    .with_attr("type", "checkbox")
                    .with_attr("disabled", "");
                if symbol.is_some() {
                    checkbox = checkbox.with_attr("checked", "");
                }
                document.append_element(item, checkbox);
                item
            }
            NodeValue::CodeBlock(block) => {
                let pre = document.append_element(parent, Element::new("pre"));
                let language = block.info.split_whitespace().next().unwrap_or("");
                let code = if language.is_empty() {
                    Element::new("code")
                } else {
                    Element::new("code").with_attr("class", format!("language-{}", language))
                };
                let code = document.append_element(pre, code);
                document.append_text(code, block.literal.clone());
                return;
            }
            NodeValue::ThematicBreak => {
                document.append_element(parent, Element::new("hr"));
                return;
            }
            NodeValue::HtmlBlock(_) | NodeValue::HtmlInline(_) => {
                log::debug!("Dropping raw HTML from markdown input");
                return;
            }
            NodeValue::Table(..) => document.append_element(parent, Element::new("table")),
            NodeValue::TableRow(header) => {
                let row = document.append_element(parent, Element::new("tr"));
                for child in node.children() {
                    self.build(document, row, child, *header);
                }
                return;
            }
            NodeValue::TableCell => {
                let tag = if header_row { "th" } else { "td" };
                document.append_element(parent, Element::new(tag))
            }
            NodeValue::Text(text) => {
                document.append_text(parent, text.clone());
                return;
            }
            NodeValue::SoftBreak | NodeValue::LineBreak => {
                document.append_element(parent, Element::new("br"));
                return;
            }
            NodeValue::Code(code) => {
                let element = document.append_element(parent, Element::new("code"));
                document.append_text(element, code.literal.clone());
                return;
            }
            NodeValue::Emph => document.append_element(parent, Element::new("em")),
            NodeValue::Strong => document.append_element(parent, Element::new("strong")),
            NodeValue::Strikethrough => document.append_element(parent, Element::new("del")),
            NodeValue::Link(link) => {
                let mut anchor = Element::new("a");
                if let Some(url) = sanitize_url(&link.url) {
                    anchor = anchor.with_attr("href", url);
                }
                if !link.title.is_empty() {
                    anchor = anchor.with_attr("title", link.title.clone());
                }
                document.append_element(parent, anchor)
            }
            NodeValue::Image(link) => {
                let mut image = Element::new("img");
                if let Some(url) = sanitize_url(&link.url) {
                    image = image.with_attr("src", url);
                }
                image = image.with_attr("alt", plain_text(node));
                if !link.title.is_empty() {
                    image = image.with_attr("title", link.title.clone());
                }
                document.append_element(parent, image);
                return;
            }
            // Document and extensions without a dedicated element render
            // their children in place.
            _ => parent,
        };

        for child in node.children() {
            self.build(document, target, child, header_row);
        }
    }
}

impl<'a> Default for MarkdownRenderer<'a> {
    fn default() -> Self {
        Self::new()
    }
}

fn heading_tag(level: u8) -> &'static str {
    match level {
        1 => "h1",
        2 => "h2",
        3 => "h3",
        4 => "h4",
        5 => "h5",
        _ => "h6",
    }
}

/// Paragraphs directly inside items of a tight list render without `<p>`.
fn in_tight_list<'n>(node: &'n AstNode<'n>) -> bool {
    node.parent()
        .and_then(|item| item.parent())
        .is_some_and(|list| matches!(&list.data.borrow().value, NodeValue::List(l) if l.tight))
}

/// Text of all descendants, used for image alt text.
fn plain_text<'n>(node: &'n AstNode<'n>) -> String {
    let mut out = String::new();
    for descendant in node.descendants() {
        match &descendant.data.borrow().value {
            NodeValue::Text(text) => out.push_str(text),
            NodeValue::Code(code) => out.push_str(&code.literal),
            _ => {}
        }
    }
    out
}
