//! JSON encoding and decoding with lossless date-time round-tripping.
//!
//! JSON has no native date-time type. This crate pairs a thin encoder and
//! decoder around `serde_json` so that [`DateTime`] values survive a trip
//! through JSON text:
//!
//! | value        | JSON            |
//! |--------------|-----------------|
//! | [`DateTime`] | ISO-8601 string |
//!
//! On output every date-time becomes `YYYY-MM-DDTHH:MM:SS[.ffffff][+HH:MM]`;
//! on input every string whose first ten characters look like `YYYY-MM-DD`
//! is parsed back into a date-time. Everything else is stock JSON with
//! object key order preserved.
//!
//! ```no_run
//! use json_dt::{from_str, to_string, DateTime, Value};
//! use time::macros::datetime;
//!
//! let record = Value::Object(vec![
//!     ("ctime".to_owned(), DateTime::new(datetime!(2019-08-19 18:18:25.609815)).into()),
//! ]);
//! let encoded = to_string(&record).unwrap();
//! assert_eq!(encoded, r#"{"ctime":"2019-08-19T18:18:25.609815"}"#);
//! assert_eq!(from_str(&encoded).unwrap(), record);
//! ```
//!
//! # Control mode
//!
//! Heuristic recognition converts every date-shaped string, including plain
//! strings that merely look like dates. When that matters, control mode
//! makes recognition explicit: the encoder prefixes each date string with
//! the two-character marker `\D`, and the decoder converts only marked
//! strings. A marked string is always converted, in either mode; the
//! `control` flag gates only the unmarked heuristic path.
//!
//! ```no_run
//! use json_dt::{from_str_control, to_string_control};
//!
//! let decoded = from_str_control(r#"{"a": "\\D2019-08-19T21:32:59.169730",
//!                                    "b": "2018-05-01T07:03:44.560600"}"#).unwrap();
//! // "a" is a DateTime, "b" stays a string.
//! ```

mod datetime;
mod decoder;
mod encoder;
mod error;
mod value;

pub use datetime::{DateTime, CONTROL_MARKER};
pub use decoder::{
    from_reader, from_reader_control, from_str, from_str_control, DecodeOptions, Decoder,
    ObjectHook,
};
pub use encoder::{
    to_string, to_string_control, to_writer, to_writer_control, DefaultHook, EncodeOptions,
    Encoder,
};
pub use error::{DecodeError, EncodeError};
pub use value::{OtherValue, Value};
