//! Loading XML documents.

use std::io::Read;
use std::path::Path;

use dql_core::{Error, Format, LoadError};

use crate::element::{Config, Element};
use crate::node::{nodes, NodeSet};

/// A parsed document, or the reason it could not be parsed.
///
/// Like every loader here, construction never fails outright: the error is
/// kept and surfaces through `nodes()`.
#[derive(Debug, Clone)]
pub struct Document {
    root: Result<Element, Error>,
}

impl Document {
    /// Parse with the default configuration.
    pub fn parse(bytes: impl AsRef<[u8]>) -> Self {
        Self::parse_with(bytes, &Config::default())
    }

    pub fn parse_with(bytes: impl AsRef<[u8]>, config: &Config) -> Self {
        let parsed = std::str::from_utf8(bytes.as_ref())
            .map_err(|e| LoadError::decode(Format::XML, e.to_string()))
            .and_then(|xml| Element::parse(xml, config));
        match parsed {
            Ok(root) => Self { root: Ok(root) },
            Err(e) => Self::failed(e),
        }
    }

    /// Read everything from `reader` and parse it.
    pub fn from_reader(mut reader: impl Read, config: &Config) -> Self {
        let mut buf = Vec::new();
        match reader.read_to_end(&mut buf) {
            Ok(_) => Self::parse_with(buf, config),
            Err(e) => Self::failed(LoadError::Io(e)),
        }
    }

    /// Read and parse a file.
    pub fn open(path: impl AsRef<Path>) -> Self {
        Self::open_with(path, &Config::default())
    }

    pub fn open_with(path: impl AsRef<Path>, config: &Config) -> Self {
        let path = path.as_ref();
        log::debug!("Reading {}...", path.display());
        match std::fs::read(path) {
            Ok(bytes) => Self::parse_with(bytes, config),
            Err(e) => Self::failed(LoadError::Io(e)),
        }
    }

    fn failed(e: LoadError) -> Self {
        log::debug!("Failed to load document: {}", e);
        Self {
            root: Err(e.into()),
        }
    }

    /// The root element.
    pub fn root(&self) -> Result<&Element, Error> {
        self.root.as_ref().map_err(Clone::clone)
    }

    /// The load error, if any.
    pub fn err(&self) -> Option<&Error> {
        self.root.as_ref().err()
    }

    /// A selection holding the root element, or the load error.
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
