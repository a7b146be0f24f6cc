//! NodeSet - the lazy, error-carrying selection.
//!
//! A `NodeSet` is either an error or a restartable producer of
//! `(name, node)` pairs. Every operation builds a new `NodeSet` whose
//! producer closes over the previous one; nothing runs until a consumer
//! pulls, and a consumer that stops pulling stops all upstream work.
//!
//! # Example
//!
//! ```rust
//! use std::borrow::Cow;
//! use dql_core::{Node, NodeSet, Nodes};
//!
//! struct Dir {
//!     files: Vec<(&'static str, Dir)>,
//! }
//!
//! #[derive(Clone, Copy)]
//! struct DirNode<'a>(&'a Dir);
//!
//! impl<'a> Node<'a> for DirNode<'a> {
//!     type Attr = usize;
//!
//!     fn elem(self, name: &str) -> Option<Self> {
//!         self.0.files.iter().find(|(k, _)| *k == name).map(|(_, d)| DirNode(d))
//!     }
//!
//!     fn children(self) -> Nodes<'a, Self> {
//!         Box::new(self.0.files.iter().map(|(k, d)| (Cow::Borrowed(*k), DirNode(d))))
//!     }
//!
//!     fn attr(self, name: &str) -> Option<usize> {
//!         (name == "len").then(|| self.0.files.len())
//!     }
//! }
//!
//! let root = Dir { files: vec![("src", Dir { files: vec![] })] };
//! let set = NodeSet::root(DirNode(&root));
//! assert_eq!(set.elem("src").iter().count(), 1);
//! assert_eq!(set.attr("len").unwrap(), 1);
//! ```

use std::fmt;
use std::rc::Rc;

use crate::node::{Name, Node, Nodes};
use crate::value_set::ValueSet;
use crate::Error;

type Source<'a, N> = Rc<dyn Fn() -> Nodes<'a, N> + 'a>;

/// A lazy sequence of named nodes, or the error that stopped it.
///
/// Cloning is cheap and shares the producer. Once the error slot is set,
/// every operation returns a set carrying that same error and never looks
/// for a producer.
///
/// `NodeSet` is single-threaded (`!Send`): consumers on other threads
/// need their own selection built over a document that is safe to read
/// concurrently.
pub struct NodeSet<'a, N> {
    data: Result<Source<'a, N>, Error>,
}

impl<'a, N> Clone for NodeSet<'a, N> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
        }
    }
}

impl<'a, N> fmt::Debug for NodeSet<'a, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.data {
            Ok(_) => f.write_str("NodeSet(..)"),
            Err(e) => f.debug_tuple("NodeSet").field(e).finish(),
        }
    }
}

impl<'a, N: Node<'a>> NodeSet<'a, N> {
    // === Construction ===

    /// A set holding one root node with an empty name.
    pub fn root(node: N) -> Self {
        Self::named("", node)
    }

    /// A set holding one node reached under `name`.
    pub fn named(name: impl Into<Name<'a>>, node: N) -> Self {
        let name = name.into();
        Self::from_fn(move || std::iter::once((name.clone(), node)))
    }

    /// A set replaying the given pairs.
    pub fn from_nodes(nodes: Vec<(Name<'a>, N)>) -> Self {
        let nodes = Rc::new(nodes);
        Self::from_fn(move || {
            let nodes = Rc::clone(&nodes);
            (0..nodes.len()).map(move |i| nodes[i].clone())
        })
    }

    /// A set driven by a caller-supplied producer.
    ///
    /// The producer is called once per traversal, so it must be able to
    /// start over.
    pub fn from_fn<F, I>(producer: F) -> Self
    where
        F: Fn() -> I + 'a,
        I: IntoIterator<Item = (Name<'a>, N)>,
        I::IntoIter: 'a,
    {
        let source: Source<'a, N> = Rc::new(move || Box::new(producer().into_iter()) as Nodes<'a, N>);
        Self { data: Ok(source) }
    }

    /// A set that carries `err` and nothing else.
    pub fn from_error(err: impl Into<Error>) -> Self {
        Self {
            data: Err(err.into()),
        }
    }

    // === Inspection ===

    /// The error, if this set carries one.
    pub fn err(&self) -> Option<&Error> {
        self.data.as_ref().err()
    }

    /// True when no error is set.
    pub fn is_ok(&self) -> bool {
        self.data.is_ok()
    }

    /// Start a traversal. An errored set yields nothing.
    pub fn iter(&self) -> Nodes<'a, N> {
        match &self.data {
            Ok(source) => source(),
            Err(_) => Box::new(std::iter::empty()),
        }
    }

    fn then<F>(&self, step: F) -> Self
    where
        F: Fn(Nodes<'a, N>) -> Nodes<'a, N> + 'a,
    {
        match &self.data {
            Err(_) => self.clone(),
            Ok(source) => {
                let source = Rc::clone(source);
                let next: Source<'a, N> = Rc::new(move || step(source()));
                Self { data: Ok(next) }
            }
        }
    }

    // === Algebra ===

    /// Keep the nodes whose reaching name is exactly `name`.
    pub fn select(&self, name: impl Into<Name<'a>>) -> Self {
        let name = name.into();
        self.then(move |nodes| {
            let name = name.clone();
            Box::new(nodes.filter(move |(key, _)| *key == name))
        })
    }

    /// The children named `name` of every node, retagged with `name`.
    ///
    /// A node without such a child contributes nothing.
    pub fn elem(&self, name: impl Into<Name<'a>>) -> Self {
        let name = name.into();
        self.then(move |nodes| {
            let name = name.clone();
            Box::new(nodes.flat_map(move |(_, node)| {
                let tag = name.clone();
                node.elems(&name).map(move |child| (tag.clone(), child))
            }))
        })
    }

    /// All direct children of every node.
    pub fn child(&self) -> Self {
        self.then(|nodes| Box::new(nodes.flat_map(|(_, node)| node.children())))
    }

    /// Every node and its descendants in pre-order, filtered by `name`.
    ///
    /// An empty `name` keeps everything.
    pub fn any(&self, name: impl Into<Name<'a>>) -> Self {
        let name = name.into();
        self.then(move |nodes| {
            let name = name.clone();
            Box::new(nodes.flat_map(move |(key, node)| Descendants::new(name.clone(), key, node)))
        })
    }

    /// Only the first node; the producer is not pulled past it.
    pub fn one(&self) -> Self {
        self.then(|nodes| Box::new(nodes.take(1)))
    }

    /// Run the producer once and replay the cached result from then on.
    pub fn all(&self) -> Self {
        match &self.data {
            Err(_) => self.clone(),
            Ok(source) => Self::from_nodes(source().collect()),
        }
    }

    /// Exactly one node, or `NotFound` / `MultiEntities`.
    ///
    /// Pulls at most two nodes from the producer.
    pub fn single(&self) -> Self {
        let source = match &self.data {
            Err(_) => return self.clone(),
            Ok(source) => source,
        };
        let mut nodes = source();
        let Some((name, node)) = nodes.next() else {
            return Self::from_error(Error::NotFound);
        };
        if nodes.next().is_some() {
            return Self::from_error(Error::MultiEntities);
        }
        Self::named(name, node)
    }

    // === Attributes ===

    /// The attribute `name` of every node, one carrier per node.
    pub fn attrs(&self, name: &str) -> ValueSet<'a, N::Attr> {
        let source = match &self.data {
            Err(e) => return ValueSet::from_error(e.clone()),
            Ok(source) => Rc::clone(source),
        };
        let name = name.to_owned();
        ValueSet::from_fn(move || {
            let name = name.clone();
            source().map(move |(_, node)| node.attr(&name).ok_or(Error::NotFound))
        })
    }

    /// The attribute `name` of the first node that has one.
    pub fn attr(&self, name: &str) -> Result<N::Attr, Error> {
        let source = match &self.data {
            Err(e) => return Err(e.clone()),
            Ok(source) => source,
        };
        source()
            .find_map(|(_, node)| node.attr(name))
            .ok_or(Error::NotFound)
    }
}

impl<'a, 's, N: Node<'a>> IntoIterator for &'s NodeSet<'a, N> {
    type Item = (Name<'a>, N);
    type IntoIter = Nodes<'a, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Pre-order walk below one node.
///
/// Holds one child iterator per open level, so dropping it mid-walk
/// abandons the rest of the subtree. A node handed to the consumer is
/// only opened when the next item is asked for.
struct Descendants<'a, N> {
    name: Name<'a>,
    pending: Option<(Name<'a>, N)>,
    yielded: Option<N>,
    stack: Vec<Nodes<'a, N>>,
}

impl<'a, N: Node<'a>> Descendants<'a, N> {
    fn new(name: Name<'a>, key: Name<'a>, node: N) -> Self {
        Self {
            name,
            pending: Some((key, node)),
            yielded: None,
            stack: Vec::new(),
        }
    }
}

impl<'a, N: Node<'a>> Iterator for Descendants<'a, N> {
    type Item = (Name<'a>, N);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(node) = self.yielded.take() {
            self.stack.push(node.children());
        }
        loop {
            let (key, node) = match self.pending.take() {
                Some(item) => item,
                None => match self.stack.last_mut()?.next() {
                    Some(item) => item,
                    None => {
                        self.stack.pop();
                        continue;
                    }
                },
            };
            if self.name.is_empty() || key == self.name {
                self.yielded = Some(node);
                return Some((key, node));
            }
            self.stack.push(node.children());
        }
    }
}
