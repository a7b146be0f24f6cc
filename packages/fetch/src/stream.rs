//! Opening locators.
//!
//! `http://` and `https://` locators are fetched with a blocking reqwest
//! client; `file://` URLs and anything else are read from the filesystem.

use std::path::PathBuf;
use std::time::Duration;

use bytes::Bytes;
use reqwest::blocking::Client;
use url::Url;

use crate::error::Error;

/// Turns a locator into raw document bytes.
///
/// Implementations can hit the network or return canned pages in tests.
pub trait Opener: Send + Sync {
    fn open(&self, locator: &str) -> Result<Bytes, Error>;
}

/// Production opener: HTTP through reqwest, files through `std::fs`.
pub struct StreamOpener {
    client: Client,
}

impl StreamOpener {
    /// Create a new opener with the given request timeout.
    pub fn new(timeout: Duration) -> Result<Self, Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Create with default timeout of 30 seconds.
    pub fn with_default_timeout() -> Result<Self, Error> {
        Self::new(Duration::from_secs(30))
    }

    /// Create with a custom reqwest client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    fn get(&self, url: Url) -> Result<Bytes, Error> {
        log::debug!("Fetching {}...", url);
        let response = self.client.get(url.clone()).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.bytes()?)
    }
}

impl Opener for StreamOpener {
    fn open(&self, locator: &str) -> Result<Bytes, Error> {
        match Locator::parse(locator)? {
            Locator::Http(url) => self.get(url),
            Locator::File(path) => {
                log::debug!("Reading {}...", path.display());
                Ok(Bytes::from(std::fs::read(&path)?))
            }
        }
    }
}

/// Open `locator` with a fresh default opener.
pub fn open(locator: &str) -> Result<Bytes, Error> {
    StreamOpener::with_default_timeout()?.open(locator)
}

#[derive(Debug, PartialEq)]
enum Locator {
    Http(Url),
    File(PathBuf),
}

impl Locator {
    fn parse(locator: &str) -> Result<Self, Error> {
        if locator.is_empty() {
            return Err(Error::InvalidLocator {
                message: "empty locator".to_string(),
            });
        }

        if locator.starts_with("http://") || locator.starts_with("https://") {
            return Ok(Locator::Http(Url::parse(locator)?));
        }

        if locator.starts_with("file://") {
            let url = Url::parse(locator)?;
            let path = url.to_file_path().map_err(|()| Error::InvalidLocator {
                message: format!("not a local file URL: {}", locator),
            })?;
            return Ok(Locator::File(path));
        }

        Ok(Locator::File(PathBuf::from(locator)))
    }
}

/// Canned pages for tests.
#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    /// An opener that serves pages from memory and records every locator.
    #[derive(Clone, Default)]
    pub struct MockOpener {
        pages: Arc<Mutex<HashMap<String, Bytes>>>,
        opened: Arc<Mutex<Vec<String>>>,
    }

    impl MockOpener {
        pub fn new() -> Self {
            Self::default()
        }

        /// Serve `body` for `locator`.
        pub fn page(self, locator: &str, body: &'static str) -> Self {
            if let Ok(mut pages) = self.pages.lock() {
                pages.insert(locator.to_string(), Bytes::from_static(body.as_bytes()));
            }
            self
        }

        /// Locators opened so far.
        pub fn opened(&self) -> Vec<String> {
            self.opened.lock().map(|o| o.clone()).unwrap_or_default()
        }
    }

    impl Opener for MockOpener {
        fn open(&self, locator: &str) -> Result<Bytes, Error> {
            if let Ok(mut opened) = self.opened.lock() {
                opened.push(locator.to_string());
            }
            self.pages
                .lock()
                .ok()
                .and_then(|pages| pages.get(locator).cloned())
                .ok_or_else(|| {
                    Error::Io(std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        format!("no page at {}", locator),
                    ))
                })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_locators_are_urls() {
        let loc = Locator::parse("https://example.com/feed.xml").unwrap();
        assert!(matches!(loc, Locator::Http(url) if url.path() == "/feed.xml"));
    }

    #[test]
    fn plain_locators_are_paths() {
        let loc = Locator::parse("data/feed.xml").unwrap();
        assert_eq!(loc, Locator::File(PathBuf::from("data/feed.xml")));
    }

    #[test]
    fn file_urls_become_paths() {
        let loc = Locator::parse("file:///tmp/feed.xml").unwrap();
        assert_eq!(loc, Locator::File(PathBuf::from("/tmp/feed.xml")));
    }

    #[test]
    fn bad_locators_are_rejected() {
        assert!(matches!(Locator::parse(""), Err(Error::InvalidLocator { .. })));
        assert!(matches!(Locator::parse("http://"), Err(Error::UrlParse(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.xml");
        let opener = StreamOpener::with_client(Client::new());
        let result = opener.open(missing.to_str().unwrap());
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn mock_records_locators() {
        let opener = mock::MockOpener::new().page("a", "<a/>");
        assert_eq!(opener.open("a").unwrap(), Bytes::from_static(b"<a/>"));
        assert!(opener.open("b").is_err());
        assert_eq!(opener.opened(), vec!["a", "b"]);
    }
}
