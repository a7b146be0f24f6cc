//! HTML backend for dql
//!
//! Real-world pages are rarely well-formed XML: void elements go
//! unclosed, end tags are implied, entities are HTML ones. This crate
//! parses them with tree-sitter into the markup backend's `Element` tree,
//! so every markup query and the `text()` / `int()` helpers apply.
//!
//! The selection from `Document::nodes()` holds the document itself
//! under an empty name; the page's `html` element is its child.
//!
//! # Example
//!
//! ```rust
//! use dql_html::{Document, XmlNodeSetExt};
//!
//! let doc = Document::parse(r#"<html><head><meta charset="utf-8"><title>Stars</title></head>
//!     <body><span class="count">42</span><br></body></html>"#);
//! assert_eq!(doc.nodes().any("title").text().unwrap(), "Stars");
//! assert_eq!(doc.nodes().any("span").int().unwrap(), 42);
//! assert_eq!(doc.nodes().any("meta").attr("charset").unwrap(), "utf-8");
//! ```

mod document;
mod parse;

pub use document::Document;
pub use parse::parse;

pub use dql_core::Error;
pub use dql_xml::{Content, Element, NodeSet, XmlNode, XmlNodeSetExt};
