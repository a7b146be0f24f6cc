//! Loading HTML pages.

use std::io::Read;
use std::path::Path;

use dql_core::{Error, LoadError};
use dql_xml::{nodes, Element, NodeSet};

use crate::parse::parse;

/// A parsed page, or the reason it could not be read.
///
/// Malformed markup is not a failure: the parser recovers and keeps what
/// it can. Errors come from reading the source.
#[derive(Debug, Clone)]
pub struct Document {
    root: Result<Element, Error>,
}

impl Document {
    /// Parse a page. Invalid UTF-8 is replaced, not rejected.
    pub fn parse(bytes: impl AsRef<[u8]>) -> Self {
        let source = String::from_utf8_lossy(bytes.as_ref());
        match parse(&source) {
            Ok(root) => Self { root: Ok(root) },
            Err(e) => Self::failed(e),
        }
    }

    /// Read everything from `reader` and parse it.
    pub fn from_reader(mut reader: impl Read) -> Self {
        let mut buf = Vec::new();
        match reader.read_to_end(&mut buf) {
            Ok(_) => Self::parse(buf),
            Err(e) => Self::failed(LoadError::Io(e)),
        }
    }

    /// Read and parse a file.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        log::debug!("Reading {}...", path.display());
        match std::fs::read(path) {
            Ok(bytes) => Self::parse(bytes),
            Err(e) => Self::failed(LoadError::Io(e)),
        }
    }

    fn failed(e: LoadError) -> Self {
        log::debug!("Failed to load document: {}", e);
        Self {
            root: Err(e.into()),
        }
    }

    /// The document element.
    pub fn root(&self) -> Result<&Element, Error> {
        self.root.as_ref().map_err(Clone::clone)
    }

    /// The load error, if any.
    pub fn err(&self) -> Option<&Error> {
        self.root.as_ref().err()
    }

    /// A selection holding the document element with an empty name, or
    /// the load error.
    pub fn nodes(&self) -> NodeSet<'_> {
        match &self.root {
            Ok(root) => nodes(root),
            Err(e) => NodeSet::from_error(e.clone()),
        }
    }
}

impl From<Element> for Document {
    fn from(root: Element) -> Self {
        Self { root: Ok(root) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_utf8_is_replaced() {
        let doc = Document::parse(&b"<p>caf\xe9</p>"[..]);
        let p = doc.root().unwrap().elements().next().unwrap();
        assert_eq!(p.text(), Some("caf\u{fffd}"));
    }

    #[test]
    fn document_is_reached_with_empty_name() {
        let doc = Document::parse("<html><body></body></html>");
        let names: Vec<_> = doc.nodes().iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec![""]);
        assert_eq!(doc.nodes().elem("html").elem("body").iter().count(), 1);
    }

    #[test]
    fn read_failure_is_kept() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("socket closed"))
            }
        }

        let doc = Document::from_reader(Broken);
        let err = doc.err().unwrap();
        assert!(err.to_string().contains("socket closed"));
        assert!(doc.nodes().any("p").err().is_some_and(|e| e.same(err)));
    }
}
