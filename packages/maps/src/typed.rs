//! Typed attribute extraction.

use serde::de::DeserializeOwned;

use dql_core::Error;

use crate::convert::from_value;
use crate::node::NodeSet;

/// Extension trait for typed attribute reads.
///
/// # Example
///
/// ```rust
/// use dql_maps::{Document, TypedAttr};
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Limits {
///     cpu: u32,
/// }
///
/// let doc = Document::yaml("pod:\n  limits:\n    cpu: 2\n");
/// let limits: Limits = doc.nodes().elem("pod").attr_as("limits").unwrap();
/// assert_eq!(limits.cpu, 2);
/// ```
pub trait TypedAttr {
    /// The first attribute `name`, deserialized into `T`.
    ///
    /// A value that does not fit `T` is a backend error, not `NotFound`.
    fn attr_as<T: DeserializeOwned>(&self, name: &str) -> Result<T, Error>;

    /// Every node's attribute `name`, deserialized into `T`.
    fn attrs_as<T: DeserializeOwned>(&self, name: &str) -> Vec<Result<T, Error>>;
}

impl TypedAttr for NodeSet<'_> {
    fn attr_as<T: DeserializeOwned>(&self, name: &str) -> Result<T, Error> {
        let value = self.attr(name)?;
        Ok(from_value(value)?)
    }

    fn attrs_as<T: DeserializeOwned>(&self, name: &str) -> Vec<Result<T, Error>> {
        self.attrs(name)
            .iter()
            .map(|r| r.and_then(|value| Ok(from_value(value)?)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Document;

    #[test]
    fn mismatched_type_is_backend_error() {
        let doc = Document::json(&b"{\"port\": \"eighty\"}"[..]);
        let result: Result<u16, _> = doc.nodes().attr_as("port");
        assert!(matches!(result, Err(Error::Backend(_))));
    }

    #[test]
    fn missing_is_not_found() {
        let doc = Document::json(&b"{}"[..]);
        let result: Result<u16, _> = doc.nodes().attr_as("port");
        assert!(result.unwrap_err().is_not_found());
    }

    #[test]
    fn per_node_values() {
        let doc = Document::json(&b"{\"a\": {\"n\": 1}, \"b\": {}, \"c\": {\"n\": 3}}"[..]);
        let values: Vec<Option<i64>> = doc
            .nodes()
            .child()
            .attrs_as::<i64>("n")
            .into_iter()
            .map(Result::ok)
            .collect();
        assert_eq!(values, vec![Some(1), None, Some(3)]);
    }
}
