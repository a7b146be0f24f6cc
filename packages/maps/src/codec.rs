//! JSON and YAML codecs.

use bytes::Bytes;
use dql_core::{Codec, Format, LoadError, Value};

use crate::convert::{json_to_value, yaml_to_value};

/// A codec that decodes JSON documents.
///
/// # Example
///
/// ```rust
/// use dql_maps::JsonCodec;
/// use dql_core::{Codec, Format, Value};
/// use bytes::Bytes;
///
/// let codec = JsonCodec;
/// let decoded = codec.decode(&Bytes::from_static(b"{\"a\": 1}"), &Format::JSON).unwrap();
///
/// assert_eq!(decoded.get("a"), Some(&Value::Integer(1)));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn decode(&self, bytes: &Bytes, format: &Format) -> Result<Value, LoadError> {
        if !self.supports(format) {
            return Err(LoadError::UnsupportedFormat(format.clone()));
        }

        let json: serde_json::Value =
            serde_json::from_slice(bytes).map_err(|e| LoadError::decode(format.clone(), e.to_string()))?;

        Ok(json_to_value(json))
    }

    fn supports(&self, format: &Format) -> bool {
        format.is_json()
    }
}

/// A codec that decodes YAML documents.
///
/// Multi-document streams are rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlCodec;

impl Codec for YamlCodec {
    fn decode(&self, bytes: &Bytes, format: &Format) -> Result<Value, LoadError> {
        if !self.supports(format) {
            return Err(LoadError::UnsupportedFormat(format.clone()));
        }

        let yaml: serde_yaml::Value =
            serde_yaml::from_slice(bytes).map_err(|e| LoadError::decode(format.clone(), e.to_string()))?;

        yaml_to_value(yaml)
    }

    fn supports(&self, format: &Format) -> bool {
        format.is_yaml()
    }
}

/// A codec that combines multiple codecs.
///
/// Routes decoding to the first codec that supports the format.
pub struct MultiCodec {
    codecs: Vec<Box<dyn Codec>>,
}

impl MultiCodec {
    /// Create an empty multi-codec.
    pub fn new() -> Self {
        Self { codecs: Vec::new() }
    }

    /// Add a codec.
    pub fn add(&mut self, codec: impl Codec + 'static) {
        self.codecs.push(Box::new(codec));
    }

    /// Create a multi-codec with the JSON and YAML codecs included.
    pub fn with_defaults() -> Self {
        let mut mc = Self::new();
        mc.add(JsonCodec);
        mc.add(YamlCodec);
        mc
    }
}

impl Default for MultiCodec {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl Codec for MultiCodec {
    fn decode(&self, bytes: &Bytes, format: &Format) -> Result<Value, LoadError> {
        for codec in &self.codecs {
            if codec.supports(format) {
                return codec.decode(bytes, format);
            }
        }
        Err(LoadError::UnsupportedFormat(format.clone()))
    }

    fn supports(&self, format: &Format) -> bool {
        self.codecs.iter().any(|c| c.supports(format))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_codec_rejects_other_formats() {
        let result = JsonCodec.decode(&Bytes::from_static(b"a: 1"), &Format::YAML);
        assert!(matches!(result, Err(LoadError::UnsupportedFormat(_))));
    }

    #[test]
    fn json_codec_reports_syntax_errors() {
        let result = JsonCodec.decode(&Bytes::from_static(b"{\"a\":"), &Format::JSON);
        match result {
            Err(LoadError::Decode { format, .. }) => assert_eq!(format, Format::JSON),
            other => panic!("expected decode error, got {:?}", other),
        }
    }

    #[test]
    fn yaml_codec_decodes_nested_maps() {
        let bytes = Bytes::from_static(b"server:\n  host: localhost\n  port: 8080\n");
        let value = YamlCodec.decode(&bytes, &Format::YAML).unwrap();
        let server = value.get("server").unwrap();
        assert_eq!(server.get("port"), Some(&Value::Integer(8080)));
    }

    #[test]
    fn multi_codec_routes_by_format() {
        let codec = MultiCodec::default();
        assert!(codec.supports(&Format::JSON));
        assert!(codec.supports(&Format::YAML));
        assert!(!codec.supports(&Format::XML));

        let value = codec.decode(&Bytes::from_static(b"a: 1"), &Format::YAML).unwrap();
        assert_eq!(value.get("a"), Some(&Value::Integer(1)));

        let result = codec.decode(&Bytes::from_static(b"<a/>"), &Format::XML);
        assert!(matches!(result, Err(LoadError::UnsupportedFormat(_))));
    }

    #[test]
    fn empty_multi_codec_supports_nothing() {
        let codec = MultiCodec::new();
        assert!(!codec.supports(&Format::JSON));
    }
}
