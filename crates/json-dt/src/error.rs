//! Error types for encoding and decoding.

/// Errors that can occur while encoding a value graph to JSON.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    /// A [`crate::Value::Other`] payload with no fallback hook, or one the
    /// hook declined to convert.
    #[error("value is not JSON serializable")]
    UnserializableValue,
    /// NaN and infinities have no JSON representation.
    #[error("non-finite number is not JSON serializable")]
    NonFiniteNumber,
    /// A date-time that cannot be formatted as ISO-8601.
    #[error("date-time formatting failed: {0}")]
    DateFormat(#[from] time::error::Format),
    /// Failure reported by the underlying JSON engine (including I/O errors
    /// from stream targets).
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that can occur while decoding JSON text into a value graph.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// Malformed JSON syntax, reported verbatim by the underlying JSON
    /// engine (including I/O errors from stream sources).
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// A string recognized as a date (control-marked, or date-shaped outside
    /// control mode) that fails full ISO-8601 parsing.
    #[error("invalid ISO-8601 date string: {0:?}")]
    InvalidDate(String),
}
