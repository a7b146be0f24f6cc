//! The introspection backend for the query engine.

use std::borrow::Cow;
use std::fmt;

use dql_core::{Error, Node, Nodes, Value};

use crate::names::{capitalize, uncapitalize};
use crate::shape::{classify, Kind, Reflect};

/// A selection over introspected values.
pub type NodeSet<'a> = dql_core::NodeSet<'a, ReflectNode<'a>>;

/// A position in an introspected value.
#[derive(Clone, Copy)]
pub struct ReflectNode<'a> {
    value: &'a dyn Reflect,
}

impl<'a> ReflectNode<'a> {
    pub fn new(value: &'a dyn Reflect) -> Self {
        Self { value }
    }

    /// The value at this position.
    pub fn value(self) -> &'a dyn Reflect {
        self.value
    }

    pub fn type_name(self) -> &'static str {
        self.value.type_name()
    }
}

impl fmt::Debug for ReflectNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ReflectNode")
            .field(&self.type_name())
            .field(&classify(self.value))
            .finish()
    }
}

/// One-level lookup by query name, with no traversability filter.
fn lookup<'a>(value: &'a dyn Reflect, name: &str) -> Option<&'a dyn Reflect> {
    match classify(value) {
        Kind::Record(r) => r.field(&capitalize(name)),
        Kind::Dict(d) => d.get(name),
        Kind::Leaf => None,
    }
}

fn is_node(value: &dyn Reflect) -> bool {
    classify(value).is_node()
}

impl<'a> Node<'a> for ReflectNode<'a> {
    type Attr = &'a dyn Reflect;

    fn elem(self, name: &str) -> Option<Self> {
        lookup(self.value, name)
            .filter(|v| is_node(*v))
            .map(ReflectNode::new)
    }

    fn children(self) -> Nodes<'a, Self> {
        match classify(self.value) {
            Kind::Record(r) => Box::new(
                r.fields()
                    .filter(|(_, v)| is_node(*v))
                    .map(|(k, v)| (uncapitalize(k), ReflectNode::new(v))),
            ),
            Kind::Dict(d) => Box::new(
                d.entries()
                    .filter(|(_, v)| is_node(*v))
                    .map(|(k, v)| (Cow::Borrowed(k), ReflectNode::new(v))),
            ),
            Kind::Leaf => Box::new(std::iter::empty()),
        }
    }

    fn attr(self, name: &str) -> Option<&'a dyn Reflect> {
        lookup(self.value, name)
    }
}

/// A selection holding `value` as its root.
pub fn nodes(value: &dyn Reflect) -> NodeSet<'_> {
    NodeSet::root(ReflectNode::new(value))
}

/// Queries that only make sense on introspected values.
pub trait ReflectNodeSetExt {
    /// The type name of the first node.
    fn class(&self) -> Result<&'static str, Error>;

    /// Like `attr`, extracted into a `Value`.
    fn attr_value(&self, name: &str) -> Result<Value, Error>;
}

impl ReflectNodeSetExt for NodeSet<'_> {
    fn class(&self) -> Result<&'static str, Error> {
        if let Some(err) = self.err() {
            return Err(err.clone());
        }
        self.iter()
            .next()
            .map(|(_, node)| node.type_name())
            .ok_or(Error::NotFound)
    }

    fn attr_value(&self, name: &str) -> Result<Value, Error> {
        self.attr(name).map(|v| v.to_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    struct Inner {
        label: String,
    }

    crate::reflect_record!(Inner { "Label" => label });

    struct Outer {
        inner: Inner,
        count: i64,
        maybe: Option<Inner>,
    }

    crate::reflect_record!(Outer {
        "Inner" => inner,
        "Count" => count,
        "Maybe" => maybe,
    });

    fn outer() -> Outer {
        Outer {
            inner: Inner { label: "in".into() },
            count: 3,
            maybe: None,
        }
    }

    #[test]
    fn lookup_folds_first_letter() {
        let doc = outer();
        let root = ReflectNode::new(&doc);
        assert!(root.elem("inner").is_some());
        assert!(root.elem("Inner").is_some());
        assert!(root.elem("iNNER").is_none());
    }

    #[test]
    fn scalars_are_attrs_not_elems() {
        let doc = outer();
        let root = ReflectNode::new(&doc);
        assert!(root.elem("count").is_none());
        assert_eq!(root.attr("count").map(|v| v.to_value()), Some(Value::Integer(3)));
    }

    #[test]
    fn none_is_a_leaf() {
        let doc = outer();
        let root = ReflectNode::new(&doc);
        assert!(root.elem("maybe").is_none());
        let names: Vec<_> = root.children().map(|(k, _)| k.into_owned()).collect();
        assert_eq!(names, vec!["inner"]);
    }

    #[test]
    fn dict_children_are_verbatim() {
        let mut doc: BTreeMap<String, BTreeMap<String, i32>> = BTreeMap::new();
        doc.insert("Upper".into(), BTreeMap::new());
        let root = ReflectNode::new(&doc);
        assert!(root.elem("Upper").is_some());
        assert!(root.elem("upper").is_none());
    }

    #[test]
    fn class_of_first_node() {
        let doc = outer();
        let set = nodes(&doc);
        assert!(set.class().unwrap().ends_with("Outer"));
        assert!(set.elem("missing").class().unwrap_err().is_not_found());
    }

    #[test]
    fn debug_names_the_kind() {
        let doc = outer();
        let text = format!("{:?}", ReflectNode::new(&doc));
        assert!(text.contains("Record"));
    }
}
