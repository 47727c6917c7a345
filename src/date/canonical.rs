//! Canonical timestamp parsing
//!
//! Fast path for ISO 8601 style timestamps (`2020-01-01T00:00:00+00:00`).
//! Failures are tagged so the caller can tell a string that merely has a
//! different shape apart from one that has the canonical shape but carries
//! an impossible field value.

use std::sync::LazyLock;

use chrono::{FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use regex::{Captures, Regex};

use super::Reading;

static CANONICAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([0-9]{4})-([0-9]{2})-([0-9]{2})(?:[T ]([0-9]{2})(?::([0-9]{2})(?::([0-9]{2})(?:[.,]([0-9]{1,9}))?)?)?(Z|[+-][0-9]{2}(?::?[0-9]{2})?)?)?$",
    )
    .expect("canonical timestamp pattern is valid")
});

/// Why a string was rejected by the canonical parser
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum CanonicalError {
    /// The string does not have the canonical shape at all
    NotCanonical,
    /// The shape matched but a field is out of range
    OutOfRange(String),
}

/// Parse a canonical timestamp
pub(crate) fn parse(input: &str) -> Result<Reading, CanonicalError> {
    let caps = CANONICAL
        .captures(input)
        .ok_or(CanonicalError::NotCanonical)?;

    let year = digits(&caps, 1) as i32;
    let month = digits(&caps, 2);
    let day = digits(&caps, 3);

    if !(1..=12).contains(&month) {
        return Err(CanonicalError::OutOfRange(format!(
            "month must be in 1..12, got {}",
            month
        )));
    }
    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        CanonicalError::OutOfRange(format!(
            "day {} is out of range for {:04}-{:02}",
            day, year, month
        ))
    })?;

    let hour = digits(&caps, 4);
    let minute = digits(&caps, 5);
    let second = digits(&caps, 6);
    let nanos = caps
        .get(7)
        .and_then(|m| format!("{:0<9}", m.as_str()).parse::<u32>().ok())
        .unwrap_or(0);

    let time = NaiveTime::from_hms_nano_opt(hour, minute, second, nanos).ok_or_else(|| {
        CanonicalError::OutOfRange(format!(
            "time {:02}:{:02}:{:02} is out of range",
            hour, minute, second
        ))
    })?;

    let naive = NaiveDateTime::new(date, time);

    match caps.get(8) {
        None => Ok(Reading::Naive(naive)),
        Some(m) => {
            let offset = parse_offset(m.as_str())?;
            naive
                .and_local_timezone(offset)
                .single()
                .map(Reading::Aware)
                .ok_or_else(|| {
                    CanonicalError::OutOfRange(format!("cannot apply offset {}", m.as_str()))
                })
        }
    }
}

/// Parse `Z`, `+HH`, `+HHMM` or `+HH:MM`
pub(crate) fn parse_offset(raw: &str) -> Result<FixedOffset, CanonicalError> {
    if raw == "Z" || raw == "z" {
        return FixedOffset::east_opt(0)
            .ok_or_else(|| CanonicalError::OutOfRange("invalid UTC offset".to_string()));
    }

    let (sign, rest) = match raw.as_bytes().first() {
        Some(b'+') => (1, &raw[1..]),
        Some(b'-') => (-1, &raw[1..]),
        _ => return Err(CanonicalError::NotCanonical),
    };
    let rest = rest.replace(':', "");
    if !(rest.len() == 2 || rest.len() == 4) || !rest.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CanonicalError::NotCanonical);
    }

    let hours: i32 = rest[..2].parse().map_err(|_| CanonicalError::NotCanonical)?;
    let minutes: i32 = if rest.len() == 4 {
        rest[2..].parse().map_err(|_| CanonicalError::NotCanonical)?
    } else {
        0
    };

    if hours > 23 || minutes > 59 {
        return Err(CanonicalError::OutOfRange(format!(
            "offset {} must be strictly between -24:00 and +24:00",
            raw
        )));
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
        .ok_or_else(|| CanonicalError::OutOfRange(format!("invalid UTC offset {}", raw)))
}

fn digits(caps: &Captures<'_>, index: usize) -> u32 {
    caps.get(index)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}
