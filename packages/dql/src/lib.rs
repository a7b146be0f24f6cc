//! dql: lazy, error-carrying queries over tree-shaped data.
//!
//! Every backend hands out a `NodeSet`: a selection of named nodes that
//! either produces nodes on demand or carries the error that stopped it.
//! Operations (`elem`, `any`, `select`, `child`, `one`, `single`, `attr`)
//! chain without checking errors in between; the first failure rides
//! along to the terminal call.
//!
//! This crate re-exports the layers:
//! - [`core`]: the engine, `Error`, `Value`, `Format`
//! - [`reflect`]: in-memory values that describe their own shape
//! - [`maps`]: JSON and YAML documents as nested maps
//! - [`xml`]: markup documents
//! - [`html`]: HTML pages, parsed leniently into the markup tree
//! - [`fetch`]: page-type registry that opens and converts HTML pages
//!
//! ```rust
//! let doc = dql::maps::Document::json(r#"{"a": {"b": {"c": 1}}}"#);
//! let c = doc.nodes().any("b").attr("c").unwrap();
//! assert_eq!(c.as_i64(), Some(1));
//!
//! let doc = dql::xml::Document::parse("<a><b c=\"1\"/></a>");
//! assert_eq!(doc.nodes().any("b").attr("c").unwrap(), "1");
//! ```

pub use dql_core as core;
pub use dql_fetch as fetch;
pub use dql_html as html;
pub use dql_maps as maps;
pub use dql_reflect as reflect;
pub use dql_xml as xml;

pub use dql_core::{Error, Node, NodeSet, Value, ValueSet};
