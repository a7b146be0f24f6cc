//! Dictionary-of-dictionaries backend.

use std::borrow::Cow;

use dql_core::{Map, Node, Nodes, Value};

/// A selection over nested maps.
pub type NodeSet<'a> = dql_core::NodeSet<'a, MapNode<'a>>;

/// One map in a document. Entries whose value is itself a map are
/// children; every entry is an attribute.
#[derive(Clone, Copy, Debug)]
pub struct MapNode<'a> {
    map: &'a Map,
}

impl<'a> MapNode<'a> {
    pub fn new(map: &'a Map) -> Self {
        Self { map }
    }

    /// The map at this position.
    pub fn map(self) -> &'a Map {
        self.map
    }
}

impl<'a> Node<'a> for MapNode<'a> {
    type Attr = &'a Value;

    fn elem(self, name: &str) -> Option<Self> {
        self.map.get(name).and_then(Value::as_map).map(MapNode::new)
    }

    fn children(self) -> Nodes<'a, Self> {
        Box::new(
            self.map
                .iter()
                .filter_map(|(k, v)| v.as_map().map(|m| (Cow::Borrowed(k.as_str()), MapNode::new(m)))),
        )
    }

    fn attr(self, name: &str) -> Option<&'a Value> {
        self.map.get(name)
    }
}

/// A selection holding an already-decoded map as its root.
pub fn nodes(map: &Map) -> NodeSet<'_> {
    NodeSet::root(MapNode::new(map))
}
