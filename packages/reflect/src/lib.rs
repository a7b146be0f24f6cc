//! Introspection backend for dql
//!
//! Queries any in-memory value that describes its own shape:
//! - `Reflect`: what every queryable value implements
//! - `Record`: values with declared, named fields (see `reflect_record!`)
//! - `Dict`: maps keyed by text
//! - `ReflectNode`: the `Node` binding used by `NodeSet`
//!
//! Records and string-keyed dictionaries are nodes; everything else is a
//! leaf, reachable only as an attribute. Record fields are looked up with
//! their first letter capitalized and reported with it lowercased.
//! Dictionary keys are used as they are.
//!
//! # Example
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use dql_reflect::{reflect_record, ReflectNodeSetExt, Value};
//!
//! struct Config {
//!     server: Server,
//!     tags: BTreeMap<String, String>,
//! }
//!
//! struct Server {
//!     port: i64,
//! }
//!
//! reflect_record!(Config { "Server" => server, "Tags" => tags });
//! reflect_record!(Server { "Port" => port });
//!
//! let cfg = Config { server: Server { port: 8080 }, tags: BTreeMap::new() };
//! let set = dql_reflect::nodes(&cfg);
//! assert_eq!(set.elem("server").attr_value("port").unwrap(), Value::Integer(8080));
//! ```

mod impls;
mod macros;
mod names;
mod node;
mod shape;

pub use dql_core::{Error, Value};
pub use names::{capitalize, uncapitalize};
pub use node::{nodes, NodeSet, ReflectNode, ReflectNodeSetExt};
pub use shape::{classify, dict_value, record_value, Dict, Entries, Fields, Kind, Record, Reflect, Shape};
