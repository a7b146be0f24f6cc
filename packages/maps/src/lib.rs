//! Dictionary backend for dql
//!
//! Documents here are maps of maps, the shape JSON and YAML decode to:
//! - `Document`: a decoded root map, or the error that prevented it
//! - `MapNode`: the `Node` binding used by `NodeSet`
//! - `JsonCodec`, `YamlCodec`, `MultiCodec`: bytes to `Value`
//! - `TypedAttr`: attributes deserialized into Rust types
//!
//! Entries holding a map are children; every entry, map or not, is an
//! attribute. Keys are matched exactly.
//!
//! # Example
//!
//! ```rust
//! use dql_maps::Document;
//!
//! let doc = Document::json(r#"{"spec": {"replicas": 3, "template": {}}}"#);
//! let spec = doc.nodes().elem("spec");
//! assert_eq!(spec.attr("replicas").unwrap().as_i64(), Some(3));
//! assert_eq!(doc.nodes().any("").iter().count(), 3);
//! ```

pub use bytes::Bytes;

mod codec;
mod convert;
mod document;
mod node;
mod typed;

pub use codec::{JsonCodec, MultiCodec, YamlCodec};
pub use convert::{from_value, json_to_value, to_value, value_to_json, yaml_to_value};
pub use document::Document;
pub use node::{nodes, MapNode, NodeSet};
pub use typed::TypedAttr;

// Re-export core types for convenience
pub use dql_core::{Codec, Error, Format, LoadError, Map, Value};
