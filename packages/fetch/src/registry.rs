//! Page-type registry.
//!
//! A page type pairs a locator function (input to URL or path) with a
//! converter (input plus parsed markup to output). Fetching resolves the
//! locator, opens it, parses the bytes as HTML and hands the selection to
//! the converter. Open failures reach the converter through the
//! selection's error slot.

use std::collections::HashMap;
use std::fmt;

use bytes::Bytes;
use dql_html::{Document, NodeSet};

use crate::error::Error;
use crate::stream::{Opener, StreamOpener};

type LocatorFn<I> = Box<dyn Fn(&I) -> String>;
type ConvFn<I, O> = Box<dyn for<'d> Fn(&I, NodeSet<'d>) -> O>;

struct Page<I, O> {
    locator: LocatorFn<I>,
    conv: ConvFn<I, O>,
}

/// Where a page's bytes come from.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    /// A URL or filesystem path, opened with the registry's opener.
    Locator(String),
    /// Bytes already in memory.
    Bytes(Bytes),
}

impl From<&str> for Source {
    fn from(locator: &str) -> Self {
        Source::Locator(locator.to_string())
    }
}

impl From<String> for Source {
    fn from(locator: String) -> Self {
        Source::Locator(locator)
    }
}

impl From<Bytes> for Source {
    fn from(bytes: Bytes) -> Self {
        Source::Bytes(bytes)
    }
}

impl From<Vec<u8>> for Source {
    fn from(bytes: Vec<u8>) -> Self {
        Source::Bytes(Bytes::from(bytes))
    }
}

/// Maps page-type names to how pages of that type are found and converted.
pub struct Registry<I, O> {
    pages: HashMap<String, Page<I, O>>,
    opener: Box<dyn Opener>,
}

impl<I, O> Registry<I, O> {
    /// Create an empty registry that opens locators with `opener`.
    pub fn new(opener: impl Opener + 'static) -> Self {
        Self {
            pages: HashMap::new(),
            opener: Box::new(opener),
        }
    }

    /// Create with a [`StreamOpener`] using the default timeout.
    pub fn with_default_timeout() -> Result<Self, Error> {
        Ok(Self::new(StreamOpener::with_default_timeout()?))
    }

    /// Register `page_type`, replacing any previous registration.
    pub fn register<L, C>(&mut self, page_type: impl Into<String>, locator: L, conv: C) -> &mut Self
    where
        L: Fn(&I) -> String + 'static,
        C: for<'d> Fn(&I, NodeSet<'d>) -> O + 'static,
    {
        self.pages.insert(
            page_type.into(),
            Page {
                locator: Box::new(locator),
                conv: Box::new(conv),
            },
        );
        self
    }

    pub fn contains(&self, page_type: &str) -> bool {
        self.pages.contains_key(page_type)
    }

    /// Registered page types, in no particular order.
    pub fn page_types(&self) -> impl Iterator<Item = &str> {
        self.pages.keys().map(String::as_str)
    }

    /// The locator `page_type` resolves `input` to.
    pub fn locate(&self, page_type: &str, input: &I) -> Result<String, Error> {
        Ok((self.page(page_type)?.locator)(input))
    }

    /// Locate, open, parse and convert a page.
    pub fn fetch(&self, page_type: &str, input: &I) -> Result<O, Error> {
        let page = self.page(page_type)?;
        let locator = (page.locator)(input);
        log::trace!("Fetching {} page from {}", page_type, locator);
        Ok(self.convert(page, input, Source::Locator(locator)))
    }

    /// Convert a page read from `source` instead of the registered locator.
    pub fn from(&self, page_type: &str, input: &I, source: impl Into<Source>) -> Result<O, Error> {
        let page = self.page(page_type)?;
        let source = source.into();
        log::trace!("Converting {} page from {:?}", page_type, source);
        Ok(self.convert(page, input, source))
    }

    fn page(&self, page_type: &str) -> Result<&Page<I, O>, Error> {
        self.pages
            .get(page_type)
            .ok_or_else(|| Error::UnknownPageType(page_type.to_string()))
    }

    fn convert(&self, page: &Page<I, O>, input: &I, source: Source) -> O {
        let bytes = match source {
            Source::Locator(locator) => self.opener.open(&locator),
            Source::Bytes(bytes) => Ok(bytes),
        };
        match bytes {
            Ok(bytes) => {
                let doc = Document::parse(bytes);
                (page.conv)(input, doc.nodes())
            }
            Err(e) => {
                log::debug!("Failed to open page: {}", e);
                (page.conv)(input, NodeSet::from_error(e))
            }
        }
    }
}

impl<I, O> fmt::Debug for Registry<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut types: Vec<_> = self.page_types().collect();
        types.sort_unstable();
        f.debug_struct("Registry")
            .field("page_types", &types)
            .finish()
    }
}
