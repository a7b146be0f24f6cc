//! The element tree and its parser.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use dql_core::{Format, LoadError};

/// Parser options.
#[derive(Debug, Clone)]
pub struct Config {
    /// Trim whitespace around text and drop whitespace-only text.
    pub trim_text: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self { trim_text: true }
    }
}

/// One element: its local name, attributes in document order, and the
/// elements and text it contains.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    pub name: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Content>,
}

/// A piece of element content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Element(Element),
    Text(String),
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Add an attribute.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    /// Add a child element.
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(Content::Element(child));
        self
    }

    /// Add a text run.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Content::Text(text.into()));
        self
    }

    /// Child elements in document order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|c| match c {
            Content::Element(e) => Some(e),
            Content::Text(_) => None,
        })
    }

    /// The value of attribute `name`.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// The first text run directly inside this element.
    pub fn text(&self) -> Option<&str> {
        self.children.iter().find_map(|c| match c {
            Content::Text(t) => Some(t.as_str()),
            Content::Element(_) => None,
        })
    }

    /// Parse the first element of `xml`.
    ///
    /// Anything after the root element closes is ignored.
    pub fn parse(xml: &str, config: &Config) -> Result<Element, LoadError> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(config.trim_text);

        let mut stack: Vec<Element> = Vec::new();
        loop {
            let event = reader
                .read_event()
                .map_err(|e| syntax(reader.error_position(), e))?;
            match event {
                Event::Start(e) => {
                    stack.push(open(&e).map_err(|e| syntax(reader.buffer_position(), e))?);
                }
                Event::Empty(e) => {
                    let element = open(&e).map_err(|e| syntax(reader.buffer_position(), e))?;
                    if let Some(done) = close(&mut stack, element) {
                        return Ok(done);
                    }
                }
                Event::End(_) => {
                    // end names are checked by the reader
                    let Some(element) = stack.pop() else {
                        return Err(LoadError::decode(Format::XML, "unexpected closing tag"));
                    };
                    if let Some(done) = close(&mut stack, element) {
                        return Ok(done);
                    }
                }
                Event::Text(e) => {
                    let text = e.unescape().map_err(|e| syntax(reader.buffer_position(), e))?;
                    push_text(&mut stack, text.into_owned());
                }
                Event::CData(e) => {
                    let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                    push_text(&mut stack, text);
                }
                Event::Eof => {
                    let message = if stack.is_empty() {
                        "no root element"
                    } else {
                        "unexpected end of document"
                    };
                    return Err(LoadError::decode(Format::XML, message));
                }
                _ => {}
            }
        }
    }
}

fn open(start: &BytesStart<'_>) -> Result<Element, quick_xml::Error> {
    let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
    let mut attrs = Vec::new();
    for attr in start.attributes() {
        let attr = attr?;
        if attr.key.as_namespace_binding().is_some() {
            continue;
        }
        let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
        attrs.push((key, attr.unescape_value()?.into_owned()));
    }
    Ok(Element {
        name,
        attrs,
        children: Vec::new(),
    })
}

/// Attach a finished element to its parent, or hand it back if it is the
/// root.
fn close(stack: &mut [Element], element: Element) -> Option<Element> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(Content::Element(element));
            None
        }
        None => Some(element),
    }
}

fn push_text(stack: &mut [Element], text: String) {
    // text outside the root element is dropped
    if let Some(parent) = stack.last_mut() {
        if !text.is_empty() {
            parent.children.push(Content::Text(text));
        }
    }
}

fn syntax(position: u64, e: impl std::fmt::Display) -> LoadError {
    LoadError::decode(Format::XML, format!("at position {}: {}", position, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(xml: &str) -> Element {
        Element::parse(xml, &Config::default()).unwrap()
    }

    #[test]
    fn builds_nested_tree() {
        let root = parse(r#"<feed lang="en"><entry id="1"><title>One</title></entry><entry id="2"/></feed>"#);
        assert_eq!(root.name, "feed");
        assert_eq!(root.attr("lang"), Some("en"));

        let entries: Vec<_> = root.elements().collect();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].attr("id"), Some("2"));
        assert_eq!(entries[0].elements().next().and_then(Element::text), Some("One"));
    }

    #[test]
    fn names_are_local() {
        let root = parse(r#"<a:feed xmlns:a="urn:x" a:id="7"><a:entry/></a:feed>"#);
        assert_eq!(root.name, "feed");
        assert_eq!(root.attrs, vec![("id".to_string(), "7".to_string())]);
        assert_eq!(root.elements().next().map(|e| e.name.as_str()), Some("entry"));
    }

    #[test]
    fn whitespace_is_trimmed_by_default() {
        let root = parse("<a>\n  <b> x </b>\n</a>");
        assert_eq!(root.text(), None);
        assert_eq!(root.elements().next().and_then(Element::text), Some("x"));
    }

    #[test]
    fn whitespace_is_kept_on_request() {
        let config = Config { trim_text: false };
        let root = Element::parse("<a> <b> x </b></a>", &config).unwrap();
        assert_eq!(root.text(), Some(" "));
        assert_eq!(root.elements().next().and_then(Element::text), Some(" x "));
    }

    #[test]
    fn entities_and_cdata() {
        let root = parse("<a t=\"&lt;&amp;\">1 &gt; 0<![CDATA[<raw>]]></a>");
        assert_eq!(root.attr("t"), Some("<&"));
        assert_eq!(
            root.children,
            vec![Content::Text("1 > 0".into()), Content::Text("<raw>".into())]
        );
    }

    #[test]
    fn prolog_and_trailing_content_are_ignored() {
        let root = parse("<?xml version=\"1.0\"?>\n<!-- c --><a/><b/>");
        assert_eq!(root, Element::new("a"));
    }

    #[test]
    fn malformed_documents_fail() {
        let config = Config::default();
        for xml in ["", "<a><b></a>", "<a>", "just text"] {
            let result = Element::parse(xml, &config);
            assert!(matches!(result, Err(LoadError::Decode { .. })), "{:?}", xml);
        }
    }

    #[test]
    fn builder_matches_parser() {
        let built = Element::new("a")
            .with_attr("k", "v")
            .with_child(Element::new("b").with_text("t"));
        assert_eq!(parse(r#"<a k="v"><b>t</b></a>"#), built);
    }
}
