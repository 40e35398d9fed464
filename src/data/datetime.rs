// src/data/datetime.rs

//! Functions to transform the timestamp substring of an entry header into a
//! chrono [`DateTime`], and to format that `DateTime` for the flow diagram.
//!
//! The interceptor log timestamp carries no timezone, e.g.
//! `2024-01-05 10:00:00.0000`. The caller chooses how the wall-clock value is
//! interpreted with a [`TzInterpretation`].
//!
//! The most relevant documents to understand this file are:
//! - `chrono` crate [`strftime`] format.
//!
//! [`DateTime`]: https://docs.rs/chrono/0.4.40/chrono/struct.DateTime.html
//! [`strftime`]: https://docs.rs/chrono/0.4.40/chrono/format/strftime/index.html

#![allow(non_camel_case_types)]

#[cfg(any(debug_assertions, test))]
use crate::debug::printers::str_to_String_noraw;

use std::fmt;

#[doc(hidden)]
pub use ::chrono::{
    DateTime,
    FixedOffset,
    Local,
    NaiveDateTime,
    TimeZone,
    Timelike, // adds method `.nanosecond()` onto `DateTime`
    Utc,
};
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// DateTime parsing and formatting
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Crate `chrono` [`strftime`] formatting pattern, passed to
/// chrono [`NaiveDateTime::parse_from_str`].
///
/// [`strftime`]: https://docs.rs/chrono/0.4.40/chrono/format/strftime/index.html
/// [`NaiveDateTime::parse_from_str`]: https://docs.rs/chrono/0.4.40/chrono/naive/struct.NaiveDateTime.html#method.parse_from_str
pub type DateTimePattern_str = str;

/// A chrono [`DateTime`] type used in _imflowlib_.
///
/// [`DateTime`]: https://docs.rs/chrono/0.4.40/chrono/struct.DateTime.html
pub type DateTimeL = DateTime<FixedOffset>;
pub type DateTimeLOpt = Option<DateTimeL>;

/// Pattern of the timestamp within an entry header,
/// e.g. `2024-01-05 10:00:00.0000`.
///
/// `%.f` accepts any count of fractional digits.
pub const DTP_ENTRY_HEADER: &DateTimePattern_str = "%Y-%m-%d %H:%M:%S%.f";

/// Count of fractional second digits printed in the flow diagram.
const FLOW_FRACTIONAL_DIGITS_DIVISOR: u32 = 100_000;

/// Printed width of [`datetime_to_flow_string`], e.g. `10:00:00.1234 +00:00`.
pub const DATETIME_FLOW_WIDTH: usize = 20;

/// How a zone-less wall-clock timestamp is interpreted.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum TzInterpretation {
    /// The local system timezone at that wall-clock time.
    Local,
    /// UTC.
    #[default]
    Utc,
}

impl fmt::Display for TzInterpretation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TzInterpretation::Local => write!(f, "local"),
            TzInterpretation::Utc => write!(f, "UTC"),
        }
    }
}

/// Convert a [`&str`] to a chrono [`Option<DateTime<FixedOffset>>`]
/// instance.
///
/// - `data` to parse that has only a datetime string
/// - strftime `pattern` to use for parsing, must not have a timezone
/// - `tz` how to interpret the zone-less result
///
/// Returns `None` if `data` does not match `pattern` or, for
/// [`TzInterpretation::Local`], the wall-clock time does not exist in the
/// local timezone (e.g. skipped by a daylight savings transition).
///
/// [`&str`]: str
/// [`Option<DateTime<FixedOffset>>`]: https://docs.rs/chrono/0.4.40/chrono/struct.DateTime.html#impl-DateTime%3CFixedOffset%3E
pub fn datetime_parse_from_str(
    data: &str,
    pattern: &DateTimePattern_str,
    tz: TzInterpretation,
) -> DateTimeLOpt {
    defn!("(pattern {:?}, tz {:?}, data {:?})", pattern, tz, str_to_String_noraw(data));

    // no timezone in `pattern` so first convert to a `NaiveDateTime` instance
    let dt_naive = match NaiveDateTime::parse_from_str(data, pattern) {
        Ok(val) => val,
        Err(_err) => {
            defx!("NaiveDateTime.parse_from_str({:?}, {:?}) failed ParseError: {}", data, pattern, _err);
            return None;
        }
    };
    defo!("NaiveDateTime.parse_from_str() extrapolated NaiveDateTime {:?}", dt_naive);

    // second convert the `NaiveDateTime` instance to `DateTime<FixedOffset>` instance
    let dt: DateTimeLOpt = match tz {
        TzInterpretation::Utc => Some(DateTimeL::from(Utc.from_utc_datetime(&dt_naive))),
        TzInterpretation::Local => Local
            .from_local_datetime(&dt_naive)
            .earliest()
            .map(DateTimeL::from),
    };
    defx!("return {:?}", dt);

    dt
}

/// Parse the timestamp substring of an entry header using
/// [`DTP_ENTRY_HEADER`].
#[inline(always)]
pub fn datetime_parse_entry_header(
    data: &str,
    tz: TzInterpretation,
) -> DateTimeLOpt {
    datetime_parse_from_str(data, DTP_ENTRY_HEADER, tz)
}

/// Format a `DateTimeL` for the "Date" column of the flow diagram,
/// e.g. `10:00:00.1234 +00:00`.
///
/// Fractional seconds are truncated to four digits.
pub fn datetime_to_flow_string(dt: &DateTimeL) -> String {
    // a leap second is represented as nanosecond >= 1_000_000_000
    let fractional: u32 = (dt.nanosecond() % 1_000_000_000) / FLOW_FRACTIONAL_DIGITS_DIVISOR;

    format!("{}.{:04} {}", dt.format("%H:%M:%S"), fractional, dt.format("%:z"))
}

/// Testing helper to create a `DateTimeL` in UTC.
#[doc(hidden)]
#[cfg(test)]
pub fn ymdhms_utc(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    min: u32,
    sec: u32,
    millis: u32,
) -> DateTimeL {
    let dt = Utc
        .with_ymd_and_hms(year, month, day, hour, min, sec)
        .unwrap()
        + ::chrono::Duration::milliseconds(millis as i64);

    DateTimeL::from(dt)
}
