//! Conversion between serde value trees and `Value`.
//!
//! Decoding itself is delegated to `serde_json` and `serde_yaml`; this module
//! only maps their generic trees onto our tagged `Value` and back to
//! `serde_json::Value` for printing.

use super::value::{Number, Value};
use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde_json::Value as JsonValue;
use serde_yaml::Value as YamlValue;

/// Parses a JSON string into a `Value`.
///
/// # Example
///
/// ```
/// use pathquill::document::parser::parse_json;
///
/// let value = parse_json(r#"{"name": "Alice"}"#).unwrap();
/// assert!(value.is_object());
///
/// assert!(parse_json(r#"{"unclosed": "#).is_err());
/// ```
pub fn parse_json(json_str: &str) -> Result<Value> {
    let json: JsonValue = serde_json::from_str(json_str).context("Failed to parse JSON")?;
    Ok(from_json(&json))
}

/// Parses a YAML string into a `Value`.
///
/// Only the first document of a multi-document stream is accepted; tags are
/// dropped and the tagged value is kept.
pub fn parse_yaml(yaml_str: &str) -> Result<Value> {
    let yaml: YamlValue = serde_yaml::from_str(yaml_str).context("Failed to parse YAML")?;
    Ok(from_yaml(&yaml))
}

/// Converts a `serde_json::Value` into a `Value`.
///
/// Integers that fit in `i64` stay integers; everything else becomes a float.
pub fn from_json(value: &JsonValue) -> Value {
    match value {
        JsonValue::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), from_json(v)))
                .collect(),
        ),
        JsonValue::Array(arr) => Value::Array(arr.iter().map(from_json).collect()),
        JsonValue::String(s) => Value::String(s.clone()),
        JsonValue::Number(n) => match n.as_i64() {
            Some(i) => Value::Number(Number::Integer(i)),
            None => Value::Number(Number::Float(n.as_f64().unwrap_or(0.0))),
        },
        JsonValue::Bool(b) => Value::Boolean(*b),
        JsonValue::Null => Value::Null,
    }
}

/// Converts a `serde_yaml::Value` into a `Value`.
///
/// Mapping keys that are not strings are rendered to their scalar text, so
/// `1: one` is reachable with the path `1` just like a JSON object key.
pub fn from_yaml(value: &YamlValue) -> Value {
    match value {
        YamlValue::Mapping(map) => {
            let mut entries = IndexMap::with_capacity(map.len());
            for (k, v) in map {
                entries.insert(yaml_key(k), from_yaml(v));
            }
            Value::Object(entries)
        }
        YamlValue::Sequence(seq) => Value::Array(seq.iter().map(from_yaml).collect()),
        YamlValue::String(s) => Value::String(s.clone()),
        YamlValue::Number(n) => match n.as_i64() {
            Some(i) => Value::Number(Number::Integer(i)),
            None => Value::Number(Number::Float(n.as_f64().unwrap_or(0.0))),
        },
        YamlValue::Bool(b) => Value::Boolean(*b),
        YamlValue::Null => Value::Null,
        YamlValue::Tagged(tagged) => from_yaml(&tagged.value),
    }
}

fn yaml_key(key: &YamlValue) -> String {
    match key {
        YamlValue::String(s) => s.clone(),
        YamlValue::Number(n) => n.to_string(),
        YamlValue::Bool(b) => b.to_string(),
        YamlValue::Null => "null".to_string(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

/// Converts a `Value` into a `serde_json::Value` for output.
///
/// Non-finite floats have no JSON representation and become `null`.
pub fn to_json(value: &Value) -> JsonValue {
    match value {
        Value::Object(map) => JsonValue::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), to_json(v)))
                .collect(),
        ),
        Value::Array(items) => JsonValue::Array(items.iter().map(to_json).collect()),
        Value::String(s) => JsonValue::String(s.clone()),
        Value::Number(Number::Integer(i)) => JsonValue::from(*i),
        Value::Number(Number::Float(f)) => serde_json::Number::from_f64(*f)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
        Value::Boolean(b) => JsonValue::Bool(*b),
        Value::Null => JsonValue::Null,
    }
}
