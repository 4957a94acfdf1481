//! JSON decoder that recognizes date strings and turns them back into
//! [`DateTime`](crate::DateTime) values.
//!
//! JSON syntax is delegated entirely to `serde_json` (with key order
//! preserved); this module transforms the parsed tree bottom-up, classifying
//! every string at every depth and handing each completed object to an
//! optional caller hook.

use std::io;

use crate::datetime::{looks_like_date, DateTime, CONTROL_MARKER};
use crate::error::DecodeError;
use crate::value::Value;

/// Hook receiving each completed object's ordered key/value pairs (dates
/// already converted) and returning a replacement value.
pub type ObjectHook = Box<dyn Fn(Vec<(String, Value)>) -> Value>;

/// Options controlling decoding behaviour.
#[derive(Debug, Clone, Default)]
pub struct DecodeOptions {
    /// When `true`, only strings bearing the control marker `\D` are treated
    /// as dates; unmarked date-shaped strings stay strings. Marked strings
    /// are always converted regardless of this flag.
    pub control: bool,
}

/// JSON decoder — parses JSON text into a [`Value`] graph.
pub struct Decoder {
    pub options: DecodeOptions,
    object_hook: Option<ObjectHook>,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder {
    pub fn new() -> Self {
        Self {
            options: DecodeOptions::default(),
            object_hook: None,
        }
    }

    pub fn control() -> Self {
        Self {
            options: DecodeOptions { control: true },
            object_hook: None,
        }
    }

    pub fn with_options(options: DecodeOptions) -> Self {
        Self {
            options,
            object_hook: None,
        }
    }

    /// Install the object hook. It fires once per completed object, inner
    /// objects before the enclosing one, after date conversion.
    pub fn with_object_hook(
        mut self,
        hook: impl Fn(Vec<(String, Value)>) -> Value + 'static,
    ) -> Self {
        self.object_hook = Some(Box::new(hook));
        self
    }

    // ----------------------------------------------------------------
    // Public decode entry-points

    /// Decode a JSON string into a value graph.
    pub fn decode(&self, input: &str) -> Result<Value, DecodeError> {
        let json: serde_json::Value = serde_json::from_str(input)?;
        self.transform(json)
    }

    /// Decode JSON read from a caller-provided input stream.
    pub fn decode_from_reader<R: io::Read>(&self, reader: R) -> Result<Value, DecodeError> {
        let json: serde_json::Value = serde_json::from_reader(reader)?;
        self.transform(json)
    }

    // ----------------------------------------------------------------
    // Core dispatch

    fn transform(&self, json: serde_json::Value) -> Result<Value, DecodeError> {
        Ok(match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Integer(i)
                } else {
                    Value::Float(n.as_f64().unwrap_or(0.0))
                }
            }
            serde_json::Value::String(s) => self.classify_str(s)?,
            serde_json::Value::Array(items) => Value::Array(
                items
                    .into_iter()
                    .map(|item| self.transform(item))
                    .collect::<Result<_, _>>()?,
            ),
            serde_json::Value::Object(map) => {
                let mut pairs = Vec::with_capacity(map.len());
                for (key, val) in map {
                    pairs.push((key, self.transform(val)?));
                }
                match &self.object_hook {
                    Some(hook) => hook(pairs),
                    None => Value::Object(pairs),
                }
            }
        })
    }

    /// Classify a decoded string: marker first (always converted), then the
    /// heuristic shape check unless control mode suppresses it.
    fn classify_str(&self, s: String) -> Result<Value, DecodeError> {
        if let Some(tail) = s.strip_prefix(CONTROL_MARKER) {
            return DateTime::parse_iso(tail).map(Value::DateTime);
        }
        if self.options.control {
            return Ok(Value::Str(s));
        }
        if looks_like_date(&s) {
            return DateTime::parse_iso(&s).map(Value::DateTime);
        }
        Ok(Value::Str(s))
    }
}

// ----------------------------------------------------------------
// Convenience entry-points

/// Decode a JSON string into a value graph.
pub fn from_str(input: &str) -> Result<Value, DecodeError> {
    Decoder::new().decode(input)
}

/// Decode a JSON string, converting only control-marked date strings.
pub fn from_str_control(input: &str) -> Result<Value, DecodeError> {
    Decoder::control().decode(input)
}

/// Decode JSON read from a caller-provided input stream.
pub fn from_reader<R: io::Read>(reader: R) -> Result<Value, DecodeError> {
    Decoder::new().decode_from_reader(reader)
}

/// Decode JSON from a stream, converting only control-marked date strings.
pub fn from_reader_control<R: io::Read>(reader: R) -> Result<Value, DecodeError> {
    Decoder::control().decode_from_reader(reader)
}
