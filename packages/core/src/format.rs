//! Format hints for document decoding.

use std::borrow::Cow;
use std::fmt;
use std::path::Path;

/// A hint about the encoding of raw document bytes.
///
/// Format is used to pick a codec when a loader turns bytes into a
/// document tree. It uses MIME-type-like strings for familiarity, but any
/// string your codecs understand will do.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Format(pub Cow<'static, str>);

impl Format {
    /// JSON format (`application/json`)
    pub const JSON: Format = Format(Cow::Borrowed("application/json"));

    /// YAML format (`application/yaml`)
    pub const YAML: Format = Format(Cow::Borrowed("application/yaml"));

    /// XML format (`application/xml`)
    pub const XML: Format = Format(Cow::Borrowed("application/xml"));

    /// HTML format (`text/html`)
    pub const HTML: Format = Format(Cow::Borrowed("text/html"));

    /// An in-memory `Value` that was never serialized.
    pub const VALUE: Format = Format(Cow::Borrowed("application/x-dql-value"));

    /// Create a format from a static string.
    pub const fn from_static(s: &'static str) -> Self {
        Format(Cow::Borrowed(s))
    }

    /// Create a format from an owned string.
    pub fn new(s: impl Into<String>) -> Self {
        Format(Cow::Owned(s.into()))
    }

    /// Guess the format from a file name's extension.
    ///
    /// Returns `None` for unknown or missing extensions.
    pub fn from_extension(path: impl AsRef<Path>) -> Option<Format> {
        let ext = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Format::JSON),
            "yaml" | "yml" => Some(Format::YAML),
            "xml" => Some(Format::XML),
            "html" | "htm" => Some(Format::HTML),
            _ => None,
        }
    }

    /// Get the format string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if this is JSON format.
    pub fn is_json(&self) -> bool {
        self == &Self::JSON
    }

    /// Check if this is YAML format.
    pub fn is_yaml(&self) -> bool {
        self == &Self::YAML
    }

    /// Check if this is XML format.
    pub fn is_xml(&self) -> bool {
        self == &Self::XML
    }

    pub fn is_html(&self) -> bool {
        self == &Self::HTML
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&'static str> for Format {
    fn from(s: &'static str) -> Self {
        Format(Cow::Borrowed(s))
    }
}

impl From<String> for Format {
    fn from(s: String) -> Self {
        Format(Cow::Owned(s))
    }
}

impl AsRef<str> for Format {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constants_work() {
        assert_eq!(Format::JSON.as_str(), "application/json");
        assert!(Format::JSON.is_json());
        assert!(!Format::JSON.is_yaml());
        assert!(Format::XML.is_xml());
        assert!(Format::HTML.is_html());
    }

    #[test]
    fn equality() {
        assert_eq!(Format::JSON, Format::from("application/json"));
        assert_eq!(Format::YAML, Format::new("application/yaml".to_string()));
    }

    #[test]
    fn extension_guess() {
        assert_eq!(Format::from_extension("doc.json"), Some(Format::JSON));
        assert_eq!(Format::from_extension("conf/app.YML"), Some(Format::YAML));
        assert_eq!(Format::from_extension("feed.xml"), Some(Format::XML));
        assert_eq!(Format::from_extension("index.htm"), Some(Format::HTML));
        assert_eq!(Format::from_extension("notes.txt"), None);
        assert_eq!(Format::from_extension("Makefile"), None);
    }

    #[test]
    fn display_impl() {
        assert_eq!(format!("{}", Format::XML), "application/xml");
        assert_eq!(format!("{}", Format::new("text/html")), "text/html");
    }
}
