//! Markup backend for dql
//!
//! Parses XML into a plain element tree and queries it:
//! - `Element` / `Content`: the tree, built by quick-xml
//! - `Document`: a parsed root, or the error that prevented it
//! - `XmlNode`: the `Node` binding used by `NodeSet`
//! - `XmlNodeSetExt`: `text()` and `int()` on selections
//!
//! Nodes are elements reached under their local tag name, the root
//! included. Unlike keyed backends, `elem` yields every child with the
//! requested tag. Attributes are strings.
//!
//! # Example
//!
//! ```rust
//! use dql_xml::{Document, XmlNodeSetExt};
//!
//! let doc = Document::parse(r#"<rss><channel><item id="a"><title>A</title></item><item id="b"/></channel></rss>"#);
//! let items = doc.nodes().any("item");
//! assert_eq!(items.iter().count(), 2);
//! assert_eq!(items.attr("id").unwrap(), "a");
//! assert_eq!(items.elem("title").text().unwrap(), "A");
//! ```

mod document;
mod element;
mod node;

pub use document::Document;
pub use element::{Config, Content, Element};
pub use node::{nodes, NodeSet, XmlNode, XmlNodeSetExt};

pub use dql_core::Error;
