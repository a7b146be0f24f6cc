//! Codec trait: bytes in, document tree out.

use bytes::Bytes;

use crate::{Format, LoadError, Value};

/// Codec for decoding raw document bytes into a `Value` tree.
///
/// Codecs are the document-loading collaborators of the dictionary
/// backend. The engine never calls them; loaders do, before any
/// `NodeSet` exists.
///
/// # Implementing Custom Codecs
///
/// ```rust
/// use dql_core::{Codec, Format, LoadError, Value};
/// use bytes::Bytes;
///
/// struct TomlCodec;
///
/// impl Codec for TomlCodec {
///     fn decode(&self, bytes: &Bytes, format: &Format) -> Result<Value, LoadError> {
///         if !self.supports(format) {
///             return Err(LoadError::UnsupportedFormat(format.clone()));
///         }
///         // Parse TOML bytes into Value...
///         Ok(Value::map())
///     }
///
///     fn supports(&self, format: &Format) -> bool {
///         format.as_str() == "application/toml"
///     }
/// }
/// ```
pub trait Codec: Send + Sync {
    /// Decode bytes into a Value.
    ///
    /// Returns `LoadError::UnsupportedFormat` if this codec doesn't handle
    /// the given format.
    fn decode(&self, bytes: &Bytes, format: &Format) -> Result<Value, LoadError>;

    /// Check if this codec supports a format.
    fn supports(&self, format: &Format) -> bool;
}

/// A codec that supports nothing.
///
/// Useful as a placeholder when every document arrives already parsed.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCodec;

impl Codec for NoCodec {
    fn decode(&self, _bytes: &Bytes, format: &Format) -> Result<Value, LoadError> {
        Err(LoadError::UnsupportedFormat(format.clone()))
    }

    fn supports(&self, _format: &Format) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_codec_rejects_everything() {
        let codec = NoCodec;
        assert!(!codec.supports(&Format::JSON));
        let result = codec.decode(&Bytes::from_static(b"{}"), &Format::JSON);
        assert!(matches!(result, Err(LoadError::UnsupportedFormat(_))));
    }
}
