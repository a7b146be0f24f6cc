//! The backend contract.
//!
//! A backend binds `Node` to its own tree representation. The engine only
//! ever asks a node three things: which child answers to a name, what all
//! of its children are, and what a named attribute holds.

use std::borrow::Cow;

/// The name under which a node was reached from its parent.
///
/// Empty for a root created directly from a value.
pub type Name<'a> = Cow<'a, str>;

/// A lazily produced sequence of `(name, node)` pairs.
pub type Nodes<'a, N> = Box<dyn Iterator<Item = (Name<'a>, N)> + 'a>;

/// A handle to one position in a backend tree.
///
/// Nodes are views: they borrow the document for `'a` and never own it,
/// which is why they are `Copy`.
///
/// Lookups that fail are not errors at this level. `elem` returns `None`
/// and `children` yields nothing; the engine turns that into an empty
/// selection.
pub trait Node<'a>: Copy + 'a {
    /// What `attr` resolves to.
    type Attr: 'a;

    /// The direct child reachable under `name`, if it is itself a node.
    fn elem(self, name: &str) -> Option<Self>;

    /// Every direct child reachable under `name`.
    ///
    /// Keyed trees hold at most one such child, which is what the default
    /// does. Markup trees override this to yield repeated tags.
    fn elems(self, name: &str) -> Box<dyn Iterator<Item = Self> + 'a> {
        Box::new(self.elem(name).into_iter())
    }

    /// All direct children, each with its own name, in backend order.
    fn children(self) -> Nodes<'a, Self>;

    /// A named scalar attribute of this node.
    fn attr(self, name: &str) -> Option<Self::Attr>;
}
