//! [`DateTime`] and the ISO-8601 wire format shared by encoder and decoder.
//!
//! The wire contract is `[\D]YYYY-MM-DDTHH:MM:SS[.ffffff][+HH:MM]`: the
//! fractional part is six digits and omitted entirely when the microsecond
//! value is zero, and the offset suffix appears only for offset-aware values.
//! A trailing literal `Z` on input is normalized to an explicit `+00:00`
//! offset before parsing.

use std::borrow::Cow;

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};

use crate::error::DecodeError;

/// Two-character prefix identifying a control-mode-encoded date string.
pub const CONTROL_MARKER: &str = "\\D";

const FMT_DATETIME: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");

const FMT_FRACTION: &[BorrowedFormatItem<'static>] =
    format_description!(".[subsecond digits:6]");

const FMT_OFFSET: &[BorrowedFormatItem<'static>] =
    format_description!("[offset_hour sign:mandatory]:[offset_minute]");

const FMT_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

const FMT_PARSE_NAIVE: &[BorrowedFormatItem<'static>] = format_description!(
    version = 2,
    "[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]"
);

const FMT_PARSE_OFFSET: &[BorrowedFormatItem<'static>] = format_description!(
    version = 2,
    "[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]][offset_hour sign:mandatory]:[offset_minute]"
);

/// A wall-clock date-time with microsecond precision and an optional UTC
/// offset.
///
/// Sub-microsecond digits are truncated on construction so that every value
/// this crate hands out survives the wire format unchanged. Naive and
/// offset-aware values never compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateTime {
    datetime: PrimitiveDateTime,
    offset: Option<UtcOffset>,
}

impl DateTime {
    /// A naive (offset-less) date-time.
    pub fn new(datetime: PrimitiveDateTime) -> Self {
        Self {
            datetime: truncate_to_micros(datetime),
            offset: None,
        }
    }

    /// An offset-aware date-time. The datetime is the wall-clock reading in
    /// the given offset, not a UTC instant.
    pub fn with_offset(datetime: PrimitiveDateTime, offset: UtcOffset) -> Self {
        Self {
            datetime: truncate_to_micros(datetime),
            offset: Some(offset),
        }
    }

    pub fn datetime(&self) -> PrimitiveDateTime {
        self.datetime
    }

    pub fn offset(&self) -> Option<UtcOffset> {
        self.offset
    }

    /// Microseconds within the second, `0..1_000_000`.
    pub fn microsecond(&self) -> u32 {
        self.datetime.microsecond()
    }

    /// Format as `YYYY-MM-DDTHH:MM:SS[.ffffff][+HH:MM]`.
    pub fn format_iso(&self) -> Result<String, time::error::Format> {
        let mut out = self.datetime.format(FMT_DATETIME)?;
        if self.datetime.microsecond() != 0 {
            out.push_str(&self.datetime.format(FMT_FRACTION)?);
        }
        if let Some(offset) = self.offset {
            out.push_str(&offset.format(FMT_OFFSET)?);
        }
        Ok(out)
    }

    /// Parse an ISO-8601 extended date-time string.
    ///
    /// Accepts `YYYY-MM-DD[THH:MM:SS[.f{1,6}]]` with an optional `+HH:MM`
    /// offset or literal `Z` suffix; a date-only string parses to midnight.
    /// `Z` is substituted with `+00:00` before parsing, so the result always
    /// carries an explicit zero offset rather than a distinct UTC marker.
    pub fn parse_iso(input: &str) -> Result<Self, DecodeError> {
        let invalid = || DecodeError::InvalidDate(input.to_owned());
        let s: Cow<'_, str> = match input.strip_suffix('Z') {
            Some(stripped) => Cow::Owned(format!("{stripped}+00:00")),
            None => Cow::Borrowed(input),
        };
        // A sign anywhere after the date part can only belong to an offset
        // suffix; the date's own dashes all sit in the first ten bytes.
        let has_offset = s
            .get(10..)
            .is_some_and(|tail| tail.contains('+') || tail.contains('-'));
        if has_offset {
            let odt = OffsetDateTime::parse(&s, FMT_PARSE_OFFSET).map_err(|_| invalid())?;
            Ok(Self::with_offset(
                PrimitiveDateTime::new(odt.date(), odt.time()),
                odt.offset(),
            ))
        } else if s.len() == 10 {
            let date = Date::parse(&s, FMT_DATE).map_err(|_| invalid())?;
            Ok(Self::new(PrimitiveDateTime::new(date, Time::MIDNIGHT)))
        } else {
            let dt = PrimitiveDateTime::parse(&s, FMT_PARSE_NAIVE).map_err(|_| invalid())?;
            Ok(Self::new(dt))
        }
    }
}

impl From<PrimitiveDateTime> for DateTime {
    fn from(datetime: PrimitiveDateTime) -> Self {
        Self::new(datetime)
    }
}

impl From<OffsetDateTime> for DateTime {
    fn from(odt: OffsetDateTime) -> Self {
        Self::with_offset(PrimitiveDateTime::new(odt.date(), odt.time()), odt.offset())
    }
}

fn truncate_to_micros(dt: PrimitiveDateTime) -> PrimitiveDateTime {
    dt.replace_microsecond(dt.microsecond()).unwrap_or(dt)
}

/// Heuristic date-shape check: the first ten bytes look like `YYYY-MM-DD`.
///
/// Both dash positions are tested, so `"1234-5678"` is not date-shaped.
pub(crate) fn looks_like_date(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() >= 8 && b[..4].iter().all(u8::is_ascii_digit) && b[4] == b'-' && b[7] == b'-'
}
