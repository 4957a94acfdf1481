//! [`Value`] — the decoded JSON value union with native date-time support.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::datetime::DateTime;

/// A JSON-representable value, plus the two extensions this crate deals in:
///
/// - [`Value::DateTime`] — a date-time leaf, written to JSON as an ISO-8601
///   string and recognized again on decode.
/// - [`Value::Other`] — an opaque payload with no native JSON representation;
///   it can only be serialized through an encoder fallback hook.
///
/// Objects are ordered key/value pairs; decoding preserves source order.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// JSON null
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer (fits in i64)
    Integer(i64),
    /// Floating-point number
    Float(f64),
    /// String
    Str(String),
    /// Array of values
    Array(Vec<Value>),
    /// Object (ordered key-value pairs)
    Object(Vec<(String, Value)>),
    /// Date-time leaf
    DateTime(DateTime),
    /// Opaque non-JSON payload, serializable only via a fallback hook
    Other(OtherValue),
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Integer(i)
                } else {
                    Value::Float(n.as_f64().unwrap_or(0.0))
                }
            }
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(arr) => {
                Value::Array(arr.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(obj) => {
                Value::Object(obj.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
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
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<DateTime> for Value {
    fn from(dt: DateTime) -> Self {
        Value::DateTime(dt)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

/// An opaque payload carried by [`Value::Other`].
///
/// The payload is anything `Any + Send + Sync`; the encoder's fallback hook
/// is expected to downcast it and produce a JSON-representable replacement.
/// Equality is payload identity, so an `Other` value never compares equal to
/// an independently constructed one.
#[derive(Clone)]
pub struct OtherValue(Arc<dyn Any + Send + Sync>);

impl OtherValue {
    pub fn new<T: Any + Send + Sync>(payload: T) -> Self {
        Self(Arc::new(payload))
    }

    /// Borrow the payload as a concrete type, if it is one.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref()
    }
}

impl PartialEq for OtherValue {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for OtherValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OtherValue(..)")
    }
}
