//! Lenient date parsing
//!
//! Best-effort parser for free-form dates such as `March 3rd, 2020 around noon`
//! or `Tue, 20 Jan 2026 12:00:00 GMT`. Words that are not date components are
//! skipped. At least one date or time component must be found.

use std::sync::LazyLock;

use chrono::{Datelike, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use regex::Regex;
use tracing::trace;

use super::Reading;
use super::canonical::parse_offset;
use crate::{FeedError, Result};

static TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{1,2}):([0-9]{2})(?::([0-9]{2})(?:\.([0-9]{1,9}))?)?(am|pm|a\.m|p\.m)?$")
        .expect("time pattern is valid")
});

static NUMERIC_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{1,4})[/.-]([0-9]{1,2})[/.-]([0-9]{1,4})$")
        .expect("numeric date pattern is valid")
});

static DATE_T_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{1,4}[/.-][0-9]{1,2}[/.-][0-9]{1,4})t([0-9].*)$")
        .expect("date-time pattern is valid")
});

static ORDINAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{1,2})(st|nd|rd|th)$").expect("ordinal pattern is valid")
});

static HOUR_MERIDIEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{1,2})(am|pm|a\.m|p\.m)$").expect("hour pattern is valid")
});

static OFFSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-][0-9]{2}:?[0-9]{2}$").expect("offset pattern is valid")
});

const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "am" | "a.m" => Some(Meridiem::Am),
            "pm" | "p.m" => Some(Meridiem::Pm),
            _ => None,
        }
    }
}

/// Date and time components collected from the input
#[derive(Debug, Default)]
struct Fields {
    year: Option<i32>,
    month: Option<u32>,
    day: Option<u32>,
    time: Option<(u32, u32, u32, u32)>,
    meridiem: Option<Meridiem>,
    offset: Option<FixedOffset>,
    /// Month came from a month name rather than a number
    month_named: bool,
    /// Bare numbers whose role is decided once all tokens are seen
    numbers: Vec<u32>,
}

impl Fields {
    fn has_components(&self) -> bool {
        self.year.is_some()
            || self.month.is_some()
            || self.day.is_some()
            || self.time.is_some()
            || !self.numbers.is_empty()
    }

    fn set_time(&mut self, hour: u32, minute: u32, second: u32, nanos: u32) {
        if self.time.is_none() {
            self.time = Some((hour, minute, second, nanos));
        }
    }
}

/// Parse a free-form date string
pub(crate) fn parse(input: &str) -> Result<Reading> {
    let mut fields = Fields::default();
    let mut last_was_number = false;

    for token in tokenize(input) {
        let number_token = consume(&token, &mut fields, last_was_number, input)?;
        last_was_number = number_token;
    }

    if !fields.has_components() {
        return Err(FeedError::date_parse(input, "no date or time components found"));
    }

    resolve_numbers(&mut fields, input)?;
    build(fields, input)
}

fn tokenize(input: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    for raw in input.split(|c: char| c.is_whitespace() || c == ',') {
        let token = raw
            .trim_matches(|c: char| matches!(c, '.' | ';' | '(' | ')' | '!' | '?' | '"' | '\''))
            .to_lowercase();
        if token.is_empty() {
            continue;
        }
        if let Some(caps) = DATE_T_TIME.captures(&token) {
            tokens.push(caps[1].to_string());
            tokens.push(caps[2].to_string());
        } else {
            tokens.push(token);
        }
    }
    tokens
}

/// Apply one token; returns whether it was a bare number
fn consume(token: &str, fields: &mut Fields, last_was_number: bool, input: &str) -> Result<bool> {
    if let Some(caps) = TIME.captures(token) {
        let hour = caps[1].parse().unwrap_or(0);
        let minute = caps[2].parse().unwrap_or(0);
        let second = caps.get(3).and_then(|m| m.as_str().parse().ok()).unwrap_or(0);
        let nanos = caps
            .get(4)
            .and_then(|m| format!("{:0<9}", m.as_str()).parse().ok())
            .unwrap_or(0);
        fields.set_time(hour, minute, second, nanos);
        if let Some(m) = caps.get(5) {
            fields.meridiem = Meridiem::from_token(m.as_str());
        }
        return Ok(false);
    }

    if let Some(caps) = NUMERIC_DATE.captures(token) {
        let first = &caps[1];
        let a: u32 = first.parse().unwrap_or(0);
        let b: u32 = caps[2].parse().unwrap_or(0);
        let c: u32 = caps[3].parse().unwrap_or(0);
        if first.len() == 4 {
            fields.year.get_or_insert(a as i32);
            fields.month.get_or_insert(b);
            fields.day.get_or_insert(c);
        } else {
            fields.month.get_or_insert(a);
            fields.day.get_or_insert(b);
            fields.year.get_or_insert(expand_year(c));
        }
        return Ok(false);
    }

    if let Some(caps) = ORDINAL.captures(token) {
        fields.day.get_or_insert(caps[1].parse().unwrap_or(0));
        return Ok(false);
    }

    if let Some(caps) = HOUR_MERIDIEM.captures(token) {
        fields.set_time(caps[1].parse().unwrap_or(0), 0, 0, 0);
        fields.meridiem = Meridiem::from_token(&caps[2]);
        return Ok(false);
    }

    if token.bytes().all(|b| b.is_ascii_digit()) {
        if token.len() == 4 && fields.year.is_none() {
            fields.year = token.parse().ok();
            return Ok(false);
        }
        if token.len() > 4 {
            return Err(FeedError::date_parse(
                input,
                format!("number {} is too long for a date component", token),
            ));
        }
        fields.numbers.push(token.parse().unwrap_or(0));
        return Ok(true);
    }

    if let Some(meridiem) = Meridiem::from_token(token) {
        // "5 pm": the preceding bare number is the hour
        if last_was_number && fields.time.is_none() {
            if let Some(hour) = fields.numbers.pop() {
                fields.set_time(hour, 0, 0, 0);
            }
        }
        fields.meridiem = Some(meridiem);
        return Ok(false);
    }

    match token {
        "noon" => fields.set_time(12, 0, 0, 0),
        "midnight" => fields.set_time(0, 0, 0, 0),
        "utc" | "gmt" | "z" => fields.offset = FixedOffset::east_opt(0),
        _ => {
            if let Some(month) = month_number(token) {
                if fields.month.is_none() {
                    fields.month = Some(month);
                    fields.month_named = true;
                }
            } else if OFFSET.is_match(token) {
                let offset = parse_offset(token).map_err(|_| {
                    FeedError::date_parse(input, format!("invalid UTC offset {}", token))
                })?;
                fields.offset = Some(offset);
            } else {
                trace!("Skipping non-date token {:?}", token);
            }
        }
    }

    Ok(false)
}

fn month_number(token: &str) -> Option<u32> {
    if token == "sept" {
        return Some(9);
    }
    MONTHS
        .iter()
        .position(|name| *name == token || (token.len() == 3 && name.starts_with(token)))
        .map(|i| i as u32 + 1)
}

/// Two-digit years: 00-69 are 20xx, 70-99 are 19xx
fn expand_year(year: u32) -> i32 {
    match year {
        0..=69 => 2000 + year as i32,
        70..=99 => 1900 + year as i32,
        _ => year as i32,
    }
}

/// Assign bare numbers to day, month and year, month-first
///
/// A number that fits no remaining field makes the input unparseable.
fn resolve_numbers(fields: &mut Fields, input: &str) -> Result<()> {
    let numbers = std::mem::take(&mut fields.numbers);
    let named_month = fields.month.is_some();

    for n in numbers {
        if named_month && fields.day.is_none() && (1..=31).contains(&n) {
            fields.day = Some(n);
        } else if n > 31 && fields.year.is_none() {
            fields.year = Some(expand_year(n));
        } else if fields.month.is_none() && (1..=12).contains(&n) {
            fields.month = Some(n);
        } else if fields.day.is_none() && (1..=31).contains(&n) {
            fields.day = Some(n);
        } else if fields.year.is_none() {
            fields.year = Some(expand_year(n));
        } else {
            return Err(FeedError::date_parse(
                input,
                format!("number {} does not fit any date field", n),
            ));
        }
    }
    Ok(())
}

fn build(fields: Fields, input: &str) -> Result<Reading> {
    let today = Utc::now().date_naive();
    let has_date = fields.year.is_some() || fields.month.is_some() || fields.day.is_some();

    let date = if has_date {
        let year = fields.year.unwrap_or_else(|| today.year());
        let mut month = fields.month.unwrap_or_else(|| today.month());
        let mut day = fields.day.unwrap_or(1);
        // Day-first numeric dates such as 25/12/2020
        if !fields.month_named && month > 12 && (1..=12).contains(&day) {
            trace!("Reading {}/{} as day/month", month, day);
            std::mem::swap(&mut month, &mut day);
        }
        NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            FeedError::date_parse(
                input,
                format!("{:04}-{:02}-{:02} is not a valid date", year, month, day),
            )
        })?
    } else {
        today
    };

    let (mut hour, minute, second, nanos) = fields.time.unwrap_or((0, 0, 0, 0));
    match fields.meridiem {
        Some(Meridiem::Am) if hour == 12 => hour = 0,
        Some(Meridiem::Pm) if hour < 12 => hour += 12,
        _ => {}
    }

    let time = NaiveTime::from_hms_nano_opt(hour, minute, second, nanos).ok_or_else(|| {
        FeedError::date_parse(
            input,
            format!("{:02}:{:02}:{:02} is not a valid time", hour, minute, second),
        )
    })?;

    let naive = NaiveDateTime::new(date, time);
    match fields.offset {
        Some(offset) => naive
            .and_local_timezone(offset)
            .single()
            .map(Reading::Aware)
            .ok_or_else(|| FeedError::date_parse(input, "cannot apply UTC offset")),
        None => Ok(Reading::Naive(naive)),
    }
}
