//! HTML source to an element tree.
//!
//! tree-sitter does the parsing, so unclosed void elements, implied end
//! tags and stray markup never fail a document. The syntax tree is folded
//! into the same `Element` tree the markup backend queries.

use std::borrow::Cow;

use dql_core::{Format, LoadError};
use dql_xml::{Content, Element};
use quick_xml::escape::{resolve_html5_entity, unescape_with};
use tree_sitter::{Node as SyntaxNode, Parser};

/// Parse `source` into a document element.
///
/// The document element has an empty name; the page's top-level elements
/// (usually a single `html`) are its children. Tag and attribute names are
/// lowercased, entities are decoded, comments and the doctype are dropped.
pub fn parse(source: &str) -> Result<Element, LoadError> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_html::LANGUAGE.into())
        .map_err(|e| LoadError::decode(Format::HTML, e.to_string()))?;
    let tree = parser
        .parse(source, None)
        .ok_or_else(|| LoadError::decode(Format::HTML, "parser returned no tree"))?;

    let builder = Builder { source };
    let mut document = Element::default();
    builder.content(tree.root_node(), &mut document, false);
    Ok(document)
}

struct Builder<'s> {
    source: &'s str,
}

impl Builder<'_> {
    fn slice(&self, start: usize, end: usize) -> &str {
        self.source.get(start..end).unwrap_or_default()
    }

    fn text(&self, node: SyntaxNode<'_>) -> &str {
        self.slice(node.start_byte(), node.end_byte())
    }

    fn element(&self, node: SyntaxNode<'_>) -> Element {
        let mut element = Element::default();
        self.content(node, &mut element, true);
        element
    }

    /// Append what `node` contains to `out`. When `tagged` is set, the
    /// first start tag names `out` instead of becoming a child.
    fn content(&self, node: SyntaxNode<'_>, out: &mut Element, mut tagged: bool) {
        // adjacent text and entity tokens form one run
        let mut run: Option<(usize, usize)> = None;
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            if child.is_missing() {
                continue;
            }
            if matches!(child.kind(), "text" | "entity") {
                let start = run.map_or(child.start_byte(), |(start, _)| start);
                run = Some((start, child.end_byte()));
                continue;
            }
            if let Some((start, end)) = run.take() {
                out.children.push(Content::Text(unescape(self.slice(start, end))));
            }

            match child.kind() {
                "element" | "script_element" | "style_element" => {
                    out.children.push(Content::Element(self.element(child)));
                }
                "start_tag" | "self_closing_tag" if tagged => {
                    self.tag(child, out);
                    tagged = false;
                }
                "start_tag" | "self_closing_tag" => {
                    let mut stray = Element::default();
                    self.tag(child, &mut stray);
                    out.children.push(Content::Element(stray));
                }
                "raw_text" => {
                    let text = self.text(child);
                    if !text.trim().is_empty() {
                        out.children.push(Content::Text(text.to_string()));
                    }
                }
                "end_tag" | "erroneous_end_tag" | "comment" | "doctype" => {}
                // ERROR and other wrappers: keep whatever they recovered
                _ => self.content(child, out, false),
            }
        }
        if let Some((start, end)) = run {
            out.children.push(Content::Text(unescape(self.slice(start, end))));
        }
    }

    fn tag(&self, node: SyntaxNode<'_>, out: &mut Element) {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "tag_name" => out.name = self.text(child).to_ascii_lowercase(),
                "attribute" => out.attrs.push(self.attribute(child)),
                _ => {}
            }
        }
    }

    fn attribute(&self, node: SyntaxNode<'_>) -> (String, String) {
        let mut name = String::new();
        let mut value = String::new();
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "attribute_name" => name = self.text(child).to_ascii_lowercase(),
                "attribute_value" => value = unescape(self.text(child)),
                "quoted_attribute_value" => {
                    value = child
                        .named_child(0)
                        .map(|v| unescape(self.text(v)))
                        .unwrap_or_default();
                }
                _ => {}
            }
        }
        (name, value)
    }
}

/// Decode character references. Text with a bare `&` is kept as written.
fn unescape(raw: &str) -> String {
    unescape_with(raw, resolve_html5_entity).map_or_else(|_| raw.to_string(), Cow::into_owned)
}
