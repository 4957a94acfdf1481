//! JSON encoder that writes [`DateTime`](crate::DateTime) values as
//! ISO-8601 strings.
//!
//! Everything except date-times is delegated to `serde_json`; this module
//! only translates the value graph into the engine's own value type, failing
//! loudly for anything the engine cannot represent.

use std::io;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::datetime::CONTROL_MARKER;
use crate::error::EncodeError;
use crate::value::{OtherValue, Value};

/// Fallback hook for [`Value::Other`] payloads. Returning `None` means the
/// hook does not know the payload either, and encoding fails.
pub type DefaultHook = Box<dyn Fn(&OtherValue) -> Option<Value>>;

/// Options controlling encoding behaviour.
#[derive(Debug, Clone, Default)]
pub struct EncodeOptions {
    /// When `true`, every emitted date string is prefixed with the control
    /// marker `\D` so the decoder can tell real dates from date-shaped text.
    pub control: bool,
    /// Emit object keys in sorted order instead of insertion order.
    pub sort_keys: bool,
    /// Pretty-print with this many spaces of indentation.
    pub indent: Option<usize>,
}

/// JSON encoder — writes a [`Value`] graph as JSON text.
///
/// Date-times become ISO-8601 strings (marked in control mode); an optional
/// fallback hook handles [`Value::Other`] payloads. Everything else is the
/// engine's standard output.
pub struct Encoder {
    pub options: EncodeOptions,
    default: Option<DefaultHook>,
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder {
    pub fn new() -> Self {
        Self {
            options: EncodeOptions::default(),
            default: None,
        }
    }

    pub fn control() -> Self {
        Self {
            options: EncodeOptions {
                control: true,
                ..EncodeOptions::default()
            },
            default: None,
        }
    }

    pub fn with_options(options: EncodeOptions) -> Self {
        Self {
            options,
            default: None,
        }
    }

    /// Install the fallback hook consulted for [`Value::Other`] payloads.
    /// The hook's replacement value is re-dispatched, so it may itself
    /// produce a date-time.
    pub fn with_default(mut self, hook: impl Fn(&OtherValue) -> Option<Value> + 'static) -> Self {
        self.default = Some(Box::new(hook));
        self
    }

    // ----------------------------------------------------------------
    // Public encode entry-points

    /// Encode a value graph to a JSON string.
    pub fn encode(&self, value: &Value) -> Result<String, EncodeError> {
        let json = self.to_json(value)?;
        match self.options.indent {
            None => Ok(serde_json::to_string(&json)?),
            Some(width) => {
                let mut buf = Vec::new();
                write_pretty(&mut buf, &json, width)?;
                Ok(String::from_utf8(buf).unwrap_or_default())
            }
        }
    }

    /// Encode a value graph to a caller-provided output stream.
    pub fn encode_to_writer<W: io::Write>(
        &self,
        writer: W,
        value: &Value,
    ) -> Result<(), EncodeError> {
        let json = self.to_json(value)?;
        match self.options.indent {
            None => serde_json::to_writer(writer, &json)?,
            Some(width) => write_pretty(writer, &json, width)?,
        }
        Ok(())
    }

    // ----------------------------------------------------------------
    // Core dispatch

    fn to_json(&self, value: &Value) -> Result<serde_json::Value, EncodeError> {
        Ok(match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Integer(i) => serde_json::Value::Number((*i).into()),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .ok_or(EncodeError::NonFiniteNumber)?,
            Value::Str(s) => serde_json::Value::String(s.clone()),
            Value::Array(items) => serde_json::Value::Array(
                items
                    .iter()
                    .map(|item| self.to_json(item))
                    .collect::<Result<_, _>>()?,
            ),
            Value::Object(pairs) => {
                let mut map = serde_json::Map::with_capacity(pairs.len());
                if self.options.sort_keys {
                    let mut sorted: Vec<&(String, Value)> = pairs.iter().collect();
                    sorted.sort_by(|a, b| a.0.cmp(&b.0));
                    for (key, val) in sorted {
                        map.insert(key.clone(), self.to_json(val)?);
                    }
                } else {
                    for (key, val) in pairs {
                        map.insert(key.clone(), self.to_json(val)?);
                    }
                }
                serde_json::Value::Object(map)
            }
            Value::DateTime(dt) => {
                let iso = dt.format_iso()?;
                serde_json::Value::String(if self.options.control {
                    format!("{CONTROL_MARKER}{iso}")
                } else {
                    iso
                })
            }
            Value::Other(payload) => {
                let hook = self
                    .default
                    .as_ref()
                    .ok_or(EncodeError::UnserializableValue)?;
                let replacement = hook(payload).ok_or(EncodeError::UnserializableValue)?;
                self.to_json(&replacement)?
            }
        })
    }
}

fn write_pretty<W: io::Write>(
    writer: W,
    json: &serde_json::Value,
    width: usize,
) -> Result<(), EncodeError> {
    let indent = vec![b' '; width];
    let formatter = PrettyFormatter::with_indent(&indent);
    let mut ser = serde_json::Serializer::with_formatter(writer, formatter);
    json.serialize(&mut ser)?;
    Ok(())
}

// ----------------------------------------------------------------
// Convenience entry-points

/// Encode a value graph to a JSON string.
pub fn to_string(value: &Value) -> Result<String, EncodeError> {
    Encoder::new().encode(value)
}

/// Encode a value graph to a JSON string with control-marked dates.
pub fn to_string_control(value: &Value) -> Result<String, EncodeError> {
    Encoder::control().encode(value)
}

/// Encode a value graph to a caller-provided output stream.
pub fn to_writer<W: io::Write>(writer: W, value: &Value) -> Result<(), EncodeError> {
    Encoder::new().encode_to_writer(writer, value)
}

/// Encode a value graph to a caller-provided output stream with
/// control-marked dates.
pub fn to_writer_control<W: io::Write>(writer: W, value: &Value) -> Result<(), EncodeError> {
    Encoder::control().encode_to_writer(writer, value)
}
