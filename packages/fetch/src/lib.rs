//! # dql-fetch
//!
//! Page-type registry for dql.
//!
//! A [`Registry`] knows, for each page type, how to turn an input into a
//! locator and how to turn the parsed HTML page into an output. Locators are
//! opened through an [`Opener`]; the default [`StreamOpener`] fetches
//! `http://` and `https://` URLs with a blocking reqwest client and reads
//! everything else from disk.
//!
//! ```no_run
//! use dql_fetch::Registry;
//! use dql_html::{NodeSet, XmlNodeSetExt};
//!
//! let mut registry: Registry<String, Option<String>> = Registry::with_default_timeout()?;
//! registry.register(
//!     "home",
//!     |site: &String| format!("https://{}/", site),
//!     |_, set: NodeSet<'_>| set.any("title").text().ok().map(str::to_string),
//! );
//!
//! let title = registry.fetch("home", &"example.com".to_string())?;
//! # Ok::<(), dql_fetch::Error>(())
//! ```
//!
//! Pages are parsed with [`dql_html`], which recovers from malformed markup.
//! Open failures do not fail `fetch`: the converter receives a
//! selection carrying the error and decides what to produce. Only an
//! unregistered page type is returned as an error.

mod error;
mod registry;
pub mod stream;

pub use error::Error;
pub use registry::{Registry, Source};
pub use stream::{open, Opener, StreamOpener};
