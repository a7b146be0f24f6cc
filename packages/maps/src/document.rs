//! Loading map documents.

use std::io::Read;
use std::path::Path;

use bytes::Bytes;
use serde::Serialize;

use dql_core::{Codec, Error, Format, LoadError, Map, Value};

use crate::codec::MultiCodec;
use crate::convert::to_value;
use crate::node::{MapNode, NodeSet};

/// A decoded document, or the reason it could not be decoded.
///
/// Every constructor succeeds; a failure is kept and handed to every
/// `NodeSet` taken from the document, so a query chain over a broken
/// document reports the load error at its end.
#[derive(Debug, Clone)]
pub struct Document {
    root: Result<Map, Error>,
}

impl Document {
    /// A document rooted at `value`, which must be a map.
    pub fn from_value(value: Value) -> Self {
        Self::from_root(Format::VALUE, Ok(value))
    }

    /// A document built from any serializable Rust value.
    pub fn from_serialize<T: Serialize>(data: &T) -> Self {
        Self::from_root(Format::VALUE, to_value(data))
    }

    /// Decode `bytes` with the default JSON and YAML codecs.
    pub fn from_slice(bytes: impl Into<Bytes>, format: &Format) -> Self {
        Self::decode_with(&MultiCodec::default(), bytes, format)
    }

    /// Decode `bytes` with a caller-chosen codec.
    pub fn decode_with(codec: &dyn Codec, bytes: impl Into<Bytes>, format: &Format) -> Self {
        let bytes = bytes.into();
        Self::from_root(format.clone(), codec.decode(&bytes, format))
    }

    /// Decode a JSON document.
    pub fn json(bytes: impl Into<Bytes>) -> Self {
        Self::from_slice(bytes, &Format::JSON)
    }

    /// Decode a YAML document.
    pub fn yaml(bytes: impl Into<Bytes>) -> Self {
        Self::from_slice(bytes, &Format::YAML)
    }

    /// Read everything from `reader` and decode it.
    pub fn from_reader(mut reader: impl Read, format: &Format) -> Self {
        let mut buf = Vec::new();
        match reader.read_to_end(&mut buf) {
            Ok(_) => Self::from_slice(buf, format),
            Err(e) => Self::failed(LoadError::Io(e)),
        }
    }

    /// Read and decode a file, choosing the format from its extension.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let Some(format) = Format::from_extension(path) else {
            let unknown = Format::new(
                path.extension()
                    .map(|ext| ext.to_string_lossy().into_owned())
                    .unwrap_or_default(),
            );
            return Self::failed(LoadError::UnsupportedFormat(unknown));
        };

        log::debug!("Reading {}...", path.display());
        match std::fs::read(path) {
            Ok(bytes) => Self::from_slice(bytes, &format),
            Err(e) => Self::failed(LoadError::Io(e)),
        }
    }

    fn from_root(format: Format, decoded: Result<Value, LoadError>) -> Self {
        match decoded {
            Ok(Value::Map(map)) => Self { root: Ok(map) },
            Ok(other) => Self::failed(LoadError::NotADocument {
                format,
                found: other.kind().to_string(),
            }),
            Err(e) => Self::failed(e),
        }
    }

    fn failed(e: LoadError) -> Self {
        log::debug!("Failed to load document: {}", e);
        Self {
            root: Err(e.into()),
        }
    }

    /// The root map.
    pub fn root(&self) -> Result<&Map, Error> {
        self.root.as_ref().map_err(Clone::clone)
    }

    /// The load error, if any.
    pub fn err(&self) -> Option<&Error> {
        self.root.as_ref().err()
    }

    /// A selection holding the root with an empty name, or the load error.
    pub fn nodes(&self) -> NodeSet<'_> {
        match &self.root {
            Ok(map) => NodeSet::root(MapNode::new(map)),
            Err(e) => NodeSet::from_error(e.clone()),
        }
    }
}

impl From<Map> for Document {
    fn from(map: Map) -> Self {
        Self { root: Ok(map) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_map_root_is_rejected() {
        let doc = Document::json(&b"[1, 2]"[..]);
        let err = doc.err().unwrap();
        assert!(err.to_string().contains("found array"));
        assert!(doc.nodes().err().is_some_and(|e| e.same(err)));
    }

    #[test]
    fn every_selection_shares_the_load_error() {
        let doc = Document::yaml("a: [unclosed");
        let first = doc.nodes().child();
        let second = doc.nodes().any("").single();
        let (a, b) = (first.err().unwrap(), second.err().unwrap());
        assert!(a.same(b));
        assert!(doc.root().is_err());
    }

    #[test]
    fn unknown_extension_is_unsupported() {
        let doc = Document::open("settings.ini");
        let msg = doc.err().unwrap().to_string();
        assert!(msg.contains("unsupported format: ini"));
    }

    #[test]
    fn reader_source() {
        let doc = Document::from_reader(&b"{\"a\": {\"b\": 1}}"[..], &Format::JSON);
        assert_eq!(doc.nodes().elem("a").attr("b").unwrap(), &Value::Integer(1));
    }

    #[test]
    fn serializable_source() {
        #[derive(Serialize)]
        struct Cfg {
            db: Db,
        }
        #[derive(Serialize)]
        struct Db {
            port: u16,
        }

        let doc = Document::from_serialize(&Cfg { db: Db { port: 5432 } });
        assert_eq!(doc.nodes().elem("db").attr("port").unwrap(), &Value::Integer(5432));
    }
}
