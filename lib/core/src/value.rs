//! Dynamic document values
//!
//! Every document that crosses the engine boundary is transcoded into
//! [`Value`], a closed set of JSON-compatible variants. Coercion sites match
//! on it exhaustively instead of inspecting open types.

use crate::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Nested map of string keys to values. Sorted so output is deterministic.
pub type Map = BTreeMap<String, Value>;

/// A dynamically typed document value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<Value>),
    Map(Map),
}

impl Value {
    /// Transcode any serializable structure into a value.
    ///
    /// Fails with [`Error::Flatten`] when the input has no JSON
    /// representation (e.g. maps keyed by non-strings).
    /// Integers above `i64::MAX` are rejected the same way.
    pub fn from_serialize<T: Serialize + ?Sized>(input: &T) -> Result<Self> {
        let json = serde_json::to_value(input)
            .map_err(|e| Error::Flatten(format!("unrepresentable value: {}", e)))?;
        ensure_int_range(&json)?;
        Ok(Value::from(json))
    }

    /// Transcode this value into a typed structure
    pub fn deserialize_into<T: DeserializeOwned>(self) -> Result<T> {
        Ok(serde_json::from_value(serde_json::Value::from(self))?)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Short name of the variant, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }

    /// Parse a JSON document
    pub fn from_json_slice(data: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(data)?)
    }

    pub fn to_json_vec(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}

fn ensure_int_range(json: &serde_json::Value) -> Result<()> {
    match json {
        serde_json::Value::Number(n) if n.is_u64() && n.as_i64().is_none() => Err(
            Error::Flatten(format!("integer {} is out of the signed 64-bit range", n)),
        ),
        serde_json::Value::Array(items) => items.iter().try_for_each(ensure_int_range),
        serde_json::Value::Object(entries) => entries.values().try_for_each(ensure_int_range),
        _ => Ok(()),
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => write!(f, "{:?}", s),
            other => {
                let json = serde_json::to_string(other).map_err(|_| fmt::Error)?;
                f.write_str(&json)
            }
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or_default()),
            },
            serde_json::Value::String(s) => Value::Text(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(entries) => Value::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Int(i) => serde_json::Value::from(i),
            // Non-finite floats have no JSON form
            Value::Float(f) => serde_json::Number::from_f64(f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Text(s) => serde_json::Value::String(s),
            Value::List(items) => {
                serde_json::Value::Array(items.into_iter().map(Into::into).collect())
            }
            Value::Map(map) => serde_json::Value::Object(
                map.into_iter().map(|(k, v)| (k, v.into())).collect(),
            ),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Map(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_serialize_rejects_unsigned_overflow() {
        #[derive(Serialize)]
        struct Big {
            n: u64,
        }

        let err = Value::from_serialize(&Big { n: u64::MAX }).unwrap_err();
        assert!(matches!(err, Error::Flatten(_)));

        let err = Value::from_serialize(&json!({"a": [1, u64::MAX]})).unwrap_err();
        assert!(matches!(err, Error::Flatten(_)));

        let value = Value::from_serialize(&Big { n: i64::MAX as u64 }).unwrap();
        assert_eq!(value, Value::from(json!({"n": i64::MAX})));
    }

    #[test]
    fn test_from_json_keeps_integer_and_float_apart() {
        let value = Value::from(json!({"a": 1, "b": 1.5, "c": [true, null, "x"]}));
        let map = value.as_map().unwrap();

        assert_eq!(map["a"], Value::Int(1));
        assert_eq!(map["b"], Value::Float(1.5));
        assert_eq!(
            map["c"],
            Value::List(vec![Value::Bool(true), Value::Null, Value::from("x")])
        );
    }

    #[test]
    fn test_deserialize_untagged() {
        let value: Value = serde_json::from_str(r#"{"n": null, "f": 2.0, "i": -3}"#).unwrap();
        let map = value.as_map().unwrap();

        assert!(map["n"].is_null());
        assert_eq!(map["f"], Value::Float(2.0));
        assert_eq!(map["i"], Value::Int(-3));
    }

    #[test]
    fn test_non_finite_float_becomes_null() {
        let json = serde_json::Value::from(Value::Float(f64::NAN));
        assert!(json.is_null());
    }

    #[test]
    fn test_from_serialize_rejects_non_string_keys() {
        let mut input = std::collections::HashMap::new();
        input.insert((1, 2), "tuple key");

        assert!(matches!(
            Value::from_serialize(&input),
            Err(Error::Flatten(_))
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::from("hi").to_string(), "\"hi\"");
        assert_eq!(Value::Int(7).to_string(), "7");
        assert_eq!(Value::List(vec![Value::Bool(false)]).to_string(), "[false]");
    }
}
