//! Core dql: the backend-agnostic query engine
//!
//! This layer defines what every document backend shares:
//! - `Node`: the contract a backend implements over its own tree
//! - `NodeSet`: a lazy, error-carrying selection and its operation algebra
//! - `ValueSet`: per-node attribute results
//! - `Error`: `NotFound`, `MultiEntities`, and opaque backend failures
//! - `Value`, `Format`, `Codec`: the dynamic tree and the decoding seam
//!   used by loaders
//!
//! Backends live in their own crates (`dql-reflect`, `dql-maps`,
//! `dql-xml`); each hands out `NodeSet`s of its own node type, so the same
//! chain of operations works on all of them.
//!
//! # Example
//!
//! ```rust,ignore
//! let set = doc.nodes().any("item").elem("price");
//! let first: Result<_, dql_core::Error> = set.attr("currency");
//! ```

pub use bytes::Bytes;

mod error;
mod format;
mod node;
mod node_set;
mod traits;
mod value;
mod value_set;

pub use error::{Error, LoadError};
pub use format::Format;
pub use node::{Name, Node, Nodes};
pub use node_set::NodeSet;
pub use traits::{Codec, NoCodec};
pub use value::{Map, Value};
pub use value_set::{ValueSet, Values};
