//! Generic value tree that path queries are resolved against.
//!
//! Every decoded document (JSON, YAML, or an undecodable body kept as text)
//! is represented as a `Value`. The tree is owned by the caller and only ever
//! borrowed by the query engine.
//!
//! # Example
//!
//! ```
//! use pathquill::document::value::{Number, Value};
//! use indexmap::IndexMap;
//!
//! let mut map = IndexMap::new();
//! map.insert("name".to_string(), Value::String("pathquill".to_string()));
//! map.insert("version".to_string(), Value::Number(Number::Integer(1)));
//! let object = Value::Object(map);
//!
//! assert!(object.is_object());
//! assert_eq!(object.get("name"), Some(&Value::String("pathquill".to_string())));
//! ```

use indexmap::IndexMap;

/// Represents numbers (integer or float)
#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

/// A decoded document value.
///
/// Objects keep their keys in document order, although lookups never depend
/// on that order.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// An object containing key-value pairs
    Object(IndexMap<String, Value>),
    /// An ordered sequence of values
    Array(Vec<Value>),
    /// A string
    String(String),
    /// A number (integer or float)
    Number(Number),
    /// A boolean
    Boolean(bool),
    /// Null
    Null,
}

impl Value {
    /// Returns true if this is an object.
    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// Returns true if this is an array.
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Looks up `key` when this value is an object.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(map) => map.get(key),
            _ => None,
        }
    }

    /// Returns a short name for the value's type, used in log messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Object(_) => "object",
            Value::Array(_) => "array",
            Value::String(_) => "string",
            Value::Number(_) => "number",
            Value::Boolean(_) => "boolean",
            Value::Null => "null",
        }
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Number(Number::Integer(i))
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Number(Number::Integer(i as i64))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Number(Number::Float(f))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}
