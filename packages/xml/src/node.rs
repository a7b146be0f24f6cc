//! Markup backend.

use std::borrow::Cow;
use std::num::ParseIntError;

use dql_core::{Error, Node, Nodes};

use crate::element::Element;

/// A selection over XML elements.
pub type NodeSet<'a> = dql_core::NodeSet<'a, XmlNode<'a>>;

/// One element of a parsed document. A node is always reached under its
/// own tag name.
#[derive(Clone, Copy, Debug)]
pub struct XmlNode<'a> {
    element: &'a Element,
}

impl<'a> XmlNode<'a> {
    pub fn new(element: &'a Element) -> Self {
        Self { element }
    }

    /// The element at this position.
    pub fn element(self) -> &'a Element {
        self.element
    }
}

impl<'a> Node<'a> for XmlNode<'a> {
    type Attr = &'a str;

    fn elem(self, name: &str) -> Option<Self> {
        self.element.elements().find(|e| e.name == name).map(XmlNode::new)
    }

    fn elems(self, name: &str) -> Box<dyn Iterator<Item = Self> + 'a> {
        let name = name.to_string();
        Box::new(
            self.element
                .elements()
                .filter(move |e| e.name == name)
                .map(XmlNode::new),
        )
    }

    fn children(self) -> Nodes<'a, Self> {
        Box::new(
            self.element
                .elements()
                .map(|e| (Cow::Borrowed(e.name.as_str()), XmlNode::new(e))),
        )
    }

    fn attr(self, name: &str) -> Option<&'a str> {
        self.element.attr(name)
    }
}

/// A selection holding `root` under its tag name.
pub fn nodes(root: &Element) -> NodeSet<'_> {
    NodeSet::named(root.name.as_str(), XmlNode::new(root))
}

#[derive(thiserror::Error, Debug)]
#[error("invalid integer {text:?}: {source}")]
struct IntError {
    text: String,
    source: ParseIntError,
}

/// Text extraction on markup selections.
pub trait XmlNodeSetExt<'a> {
    /// The first text run of the first node that has one.
    fn text(&self) -> Result<&'a str, Error>;

    /// `text()` parsed as an integer.
    fn int(&self) -> Result<i64, Error>;
}

impl<'a> XmlNodeSetExt<'a> for NodeSet<'a> {
    fn text(&self) -> Result<&'a str, Error> {
        if let Some(err) = self.err() {
            return Err(err.clone());
        }
        self.iter()
            .find_map(|(_, node)| node.element().text())
            .ok_or(Error::NotFound)
    }

    fn int(&self) -> Result<i64, Error> {
        let text = self.text()?;
        text.parse().map_err(|source| {
            Error::backend(IntError {
                text: text.to_string(),
                source,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed() -> Element {
        Element::new("feed")
            .with_attr("lang", "en")
            .with_child(Element::new("entry").with_attr("id", "1").with_text("first"))
            .with_child(Element::new("meta"))
            .with_child(Element::new("entry").with_attr("id", "2").with_text("42"))
    }

    #[test]
    fn root_is_named_by_its_tag() {
        let doc = feed();
        let names: Vec<_> = nodes(&doc).iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["feed"]);
        assert_eq!(nodes(&doc).select("feed").iter().count(), 1);
    }

    #[test]
    fn elem_yields_every_same_named_child() {
        let doc = feed();
        let entries = nodes(&doc).elem("entry");
        let ids: Vec<_> = entries.attrs("id").iter().map(Result::ok).collect();
        assert_eq!(ids, vec![Some("1"), Some("2")]);
    }

    #[test]
    fn text_and_int() {
        let doc = feed();
        let entries = nodes(&doc).elem("entry");
        assert_eq!(entries.text().unwrap(), "first");
        assert!(entries.int().unwrap_err().to_string().contains("\"first\""));
        assert_eq!(entries.attrs("id").iter().count(), 2);

        let second = nodes(&doc).child().select("entry").all();
        let last: Vec<_> = second.iter().skip(1).collect();
        let last = NodeSet::from_nodes(last);
        assert_eq!(last.int().unwrap(), 42);
    }

    #[test]
    fn text_not_found_and_errors() {
        let doc = feed();
        assert!(nodes(&doc).elem("meta").text().unwrap_err().is_not_found());

        let err = Error::backend("broken");
        let set: NodeSet<'_> = NodeSet::from_error(err.clone());
        assert!(set.text().unwrap_err().same(&err));
        assert!(set.int().unwrap_err().same(&err));
    }
}
