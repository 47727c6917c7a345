//! Date normalization
//!
//! Turns loosely formatted dates into offset-bearing [`Instant`]s and renders
//! them in the canonical feed timestamp format.
//!
//! Parsing tries the canonical ISO 8601 form first. Only a shape mismatch falls
//! back to the lenient parser; a canonical-looking string with an impossible
//! field (`2020-02-30`) is an error.
//!
//! This module is organized into:
//! - `canonical`: strict ISO 8601 parser with tagged failures
//! - `lenient`: free-form fallback parser
//! - `value`: the [`DateValue`] input type
//! - `zone`: timezone lookup and offset attachment

mod canonical;
mod lenient;
mod value;
mod zone;

use chrono::{DateTime, FixedOffset, NaiveDateTime, SecondsFormat, Timelike};
use chrono_tz::Tz;
use tracing::debug;

use self::canonical::CanonicalError;
use crate::{FeedError, Result};

pub use self::value::DateValue;
pub use self::zone::lookup_zone;
pub(crate) use self::zone::now_in;

/// An absolute point in time with an explicit UTC offset
pub type Instant = DateTime<FixedOffset>;

/// Result of the internal parse step, before anchoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Reading {
    Naive(NaiveDateTime),
    Aware(Instant),
}

/// Parse a date value into an [`Instant`]
///
/// Instants pass through unchanged. Strings are parsed canonically, falling
/// back to the lenient parser when they are not in canonical form. Readings
/// without an offset are anchored at UTC.
///
/// # Examples
///
/// ```
/// use gen_rss::date::{format, parse};
/// use gen_rss::DateValue;
///
/// let instant = parse(&DateValue::from("2020-01-01T00:00:00+00:00")).unwrap();
/// assert_eq!(format(&instant), "2020-01-01T00:00:00+00:00");
///
/// // Free-form text goes through the lenient parser
/// let noon = parse(&DateValue::from("March 3rd, 2020 around noon")).unwrap();
/// assert_eq!(format(&noon), "2020-03-03T12:00:00+00:00");
///
/// assert!(parse(&DateValue::from("not a date")).is_err());
/// ```
pub fn parse(value: &DateValue) -> Result<Instant> {
    Ok(match read(value)? {
        Reading::Aware(instant) => instant,
        Reading::Naive(naive) => zone::utc(&naive),
    })
}

/// Parse a date value, anchoring offset-less readings in `zone`
///
/// Readings that already carry an offset keep it.
pub fn parse_in(value: &DateValue, zone: &str) -> Result<Instant> {
    let tz = lookup_zone(zone)?;
    parse_with(value, &tz)
}

pub(crate) fn parse_with(value: &DateValue, tz: &Tz) -> Result<Instant> {
    match read(value)? {
        Reading::Aware(instant) => Ok(instant),
        Reading::Naive(naive) => zone::attach(&naive, tz),
    }
}

/// Move a date value into `zone`
///
/// A reading without an offset is taken to already be local time in `zone`:
/// the offset is attached and the wall clock is unchanged. A reading with an
/// offset is converted: the wall clock shifts and the absolute instant is
/// preserved.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, Timelike};
/// use gen_rss::date::to_zone;
/// use gen_rss::DateValue;
///
/// let naive = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap().and_hms_opt(9, 0, 0).unwrap();
/// let attached = to_zone(&DateValue::Naive(naive), "US/Eastern").unwrap();
/// assert_eq!(attached.hour(), 9);
///
/// let anchored = to_zone(&DateValue::from(naive.and_utc()), "US/Eastern").unwrap();
/// assert_eq!(anchored.hour(), 4);
/// ```
pub fn to_zone(value: &DateValue, zone: &str) -> Result<Instant> {
    let tz = lookup_zone(zone)?;
    match read(value)? {
        Reading::Naive(naive) => zone::attach(&naive, &tz),
        Reading::Aware(instant) => Ok(zone::convert(&instant, &tz)),
    }
}

/// Current instant viewed in `zone`
pub fn now(zone: &str) -> Result<Instant> {
    let tz = lookup_zone(zone)?;
    Ok(now_in(&tz))
}

/// Render an instant in the canonical feed format
///
/// RFC 3339 with a `+HH:MM` offset. Sub-microsecond precision is dropped and
/// fractional seconds appear only when non-zero, in the shortest of 3 or 6
/// digits that holds them.
pub fn format(instant: &Instant) -> String {
    let micros = instant.nanosecond() / 1_000 * 1_000;
    instant
        .with_nanosecond(micros)
        .unwrap_or(*instant)
        .to_rfc3339_opts(SecondsFormat::AutoSi, false)
}

fn read(value: &DateValue) -> Result<Reading> {
    match value {
        DateValue::Instant(instant) => Ok(Reading::Aware(*instant)),
        DateValue::Naive(naive) => Ok(Reading::Naive(*naive)),
        DateValue::Text(text) => read_text(text),
    }
}

fn read_text(input: &str) -> Result<Reading> {
    match canonical::parse(input) {
        Ok(reading) => Ok(reading),
        Err(CanonicalError::NotCanonical) => {
            debug!("{:?} is not a canonical timestamp, parsing leniently", input);
            lenient::parse(input)
        }
        Err(CanonicalError::OutOfRange(reason)) => Err(FeedError::date_parse(input, reason)),
    }
}
