//! The untyped value tree that readers decode.
//!
//! [`Value`] is the in-memory shape produced by a tokenizer. Numbers keep their
//! original text so typed readers can pick a lossless conversion, and structs
//! keep their key order for diagnostics.

use std::fmt::{self, Display};

use indexmap::IndexMap;

/// Ordered key/value storage backing [`Value::Struct`].
pub type StructMap = IndexMap<String, Value>;

/// A decoded-but-untyped value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    /// A number in its original textual form.
    Number(String),
    String(String),
    Array(Vec<Value>),
    Struct(StructMap),
}

/// The variant tag of a [`Value`], used in type-mismatch diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Struct,
}

impl ValueKind {
    /// Renders a list of kinds as `a`, `a or b`, `a, b or c`.
    pub fn join(kinds: &[ValueKind]) -> String {
        match kinds {
            [] => String::new(),
            [single] => single.to_string(),
            [init @ .., last] => {
                let init: Vec<_> = init.iter().map(ToString::to_string).collect();
                format!("{} or {}", init.join(", "), last)
            }
        }
    }
}

impl Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "boolean",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Struct => "object",
        };
        f.write_str(name)
    }
}

impl Value {
    /// Creates a number value from anything with a textual representation.
    pub fn number(n: impl ToString) -> Self {
        Value::Number(n.to_string())
    }

    /// Creates a string value.
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(s.into())
    }

    /// Creates an array value from its elements.
    pub fn array(items: impl IntoIterator<Item = Value>) -> Self {
        Value::Array(items.into_iter().collect())
    }

    /// Creates a struct value from key/value pairs, keeping their order.
    pub fn structure<K: Into<String>>(entries: impl IntoIterator<Item = (K, Value)>) -> Self {
        Value::Struct(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// The kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Struct(_) => ValueKind::Struct,
        }
    }

    /// Whether this is `null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the textual form of a number value.
    pub fn as_number(&self) -> Option<&str> {
        match self {
            Value::Number(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_struct(&self) -> Option<&StructMap> {
        match self {
            Value::Struct(map) => Some(map),
            _ => None,
        }
    }

    /// Converts back into a `serde_json::Value` for writing.
    ///
    /// Number text that serde_json cannot represent is written as a string
    /// rather than being rounded.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value as Json;

        match self {
            Value::Null => Json::Null,
            Value::Bool(b) => Json::Bool(*b),
            Value::Number(text) => text
                .parse::<serde_json::Number>()
                .map(Json::Number)
                .unwrap_or_else(|_| Json::String(text.clone())),
            Value::String(s) => Json::String(s.clone()),
            Value::Array(items) => Json::Array(items.iter().map(Value::to_json).collect()),
            Value::Struct(map) => Json::Object(
                map.iter()
                    .map(|(key, value)| (key.clone(), value.to_json()))
                    .collect(),
            ),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        use serde_json::Value as Json;

        match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(b),
            Json::Number(n) => Value::Number(n.to_string()),
            Json::String(s) => Value::String(s),
            Json::Array(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            Json::Object(map) => Value::Struct(
                map.into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
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

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::number(n)
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::number(n)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<StructMap> for Value {
    fn from(map: StructMap) -> Self {
        Value::Struct(map)
    }
}
