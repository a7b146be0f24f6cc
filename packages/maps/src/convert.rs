//! Conversions between `Value` and the decoders' own trees.

use serde::de::DeserializeOwned;
use serde::Serialize;

use dql_core::{Format, LoadError, Value};

/// Deserialize an extracted attribute into a Rust type.
pub fn from_value<T: DeserializeOwned>(value: &Value) -> Result<T, LoadError> {
    // Value has no Deserializer of its own; go through serde_json
    let json = value_to_json(value.clone());
    serde_json::from_value(json).map_err(|e| LoadError::decode(Format::VALUE, e.to_string()))
}

/// Serialize a Rust type into a `Value` tree.
pub fn to_value<T: Serialize>(data: &T) -> Result<Value, LoadError> {
    let json = serde_json::to_value(data).map_err(|e| LoadError::decode(Format::VALUE, e.to_string()))?;
    Ok(json_to_value(json))
}

/// Convert our Value to serde_json::Value.
pub fn value_to_json(value: Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(b),
        Value::Integer(i) => serde_json::Value::Number(i.into()),
        Value::Float(f) => serde_json::Number::from_f64(f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::String(s) => serde_json::Value::String(s),
        Value::Bytes(b) => {
            // JSON doesn't have bytes, so we base64 encode
            use base64::Engine;
            serde_json::Value::String(base64::engine::general_purpose::STANDARD.encode(&b))
        }
        Value::Array(arr) => serde_json::Value::Array(arr.into_iter().map(value_to_json).collect()),
        Value::Map(map) => serde_json::Value::Object(
            map.into_iter()
                .map(|(k, v)| (k, value_to_json(v)))
                .collect(),
        ),
    }
}

/// Convert serde_json::Value to our Value.
pub fn json_to_value(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => number(n.as_i64(), n.as_f64(), || n.to_string()),
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(arr) => Value::Array(arr.into_iter().map(json_to_value).collect()),
        serde_json::Value::Object(map) => Value::Map(
            map.into_iter()
                .map(|(k, v)| (k, json_to_value(v)))
                .collect(),
        ),
    }
}

/// Convert serde_yaml::Value to our Value.
///
/// Scalar mapping keys are stringified the way they were written. Sequence
/// or mapping keys have no textual form and fail the decode. Tags are
/// dropped.
pub fn yaml_to_value(yaml: serde_yaml::Value) -> Result<Value, LoadError> {
    Ok(match yaml {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => number(n.as_i64(), n.as_f64(), || n.to_string()),
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(seq) => Value::Array(
            seq.into_iter()
                .map(yaml_to_value)
                .collect::<Result<_, _>>()?,
        ),
        serde_yaml::Value::Mapping(mapping) => {
            let mut map = dql_core::Map::new();
            for (k, v) in mapping {
                map.insert(yaml_key(k)?, yaml_to_value(v)?);
            }
            Value::Map(map)
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_value(tagged.value)?,
    })
}

fn yaml_key(key: serde_yaml::Value) -> Result<String, LoadError> {
    match key {
        serde_yaml::Value::String(s) => Ok(s),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Null => Ok("null".to_string()),
        serde_yaml::Value::Tagged(tagged) => yaml_key(tagged.value),
        other => Err(LoadError::decode(
            Format::YAML,
            format!("unsupported mapping key: {:?}", other),
        )),
    }
}

fn number(int: Option<i64>, float: Option<f64>, text: impl FnOnce() -> String) -> Value {
    match (int, float) {
        (Some(i), _) => Value::Integer(i),
        (None, Some(f)) => Value::Float(f),
        // Fallback for very large numbers
        (None, None) => Value::String(text()),
    }
}
