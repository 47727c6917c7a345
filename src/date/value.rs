//! Date values accepted by the normalizer

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};

use super::{Instant, format};
#[cfg(feature = "serde")]
use crate::FeedError;

/// A date as supplied by the caller
///
/// `Naive` values are accepted as input only; every operation in
/// [`crate::date`] returns an offset-bearing [`Instant`].
///
/// # Examples
///
/// ```
/// use gen_rss::DateValue;
///
/// let text = DateValue::from("2020-01-01T00:00:00+00:00");
/// assert!(matches!(text, DateValue::Text(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateValue {
    /// Already anchored instant
    Instant(Instant),
    /// Wall-clock reading without an offset
    Naive(NaiveDateTime),
    /// Free-form or canonical date string
    Text(String),
}

impl From<&str> for DateValue {
    fn from(value: &str) -> Self {
        DateValue::Text(value.to_string())
    }
}

impl From<String> for DateValue {
    fn from(value: String) -> Self {
        DateValue::Text(value)
    }
}

impl From<DateTime<FixedOffset>> for DateValue {
    fn from(value: DateTime<FixedOffset>) -> Self {
        DateValue::Instant(value)
    }
}

impl From<DateTime<Utc>> for DateValue {
    fn from(value: DateTime<Utc>) -> Self {
        DateValue::Instant(value.fixed_offset())
    }
}

impl From<NaiveDateTime> for DateValue {
    fn from(value: NaiveDateTime) -> Self {
        DateValue::Naive(value)
    }
}

impl fmt::Display for DateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateValue::Instant(instant) => f.write_str(&format(instant)),
            DateValue::Naive(naive) => write!(f, "{}", naive.format("%Y-%m-%dT%H:%M:%S%.f")),
            DateValue::Text(text) => f.write_str(text),
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<serde_json::Value> for DateValue {
    type Error = FeedError;

    /// Only JSON strings carry dates; every other JSON type is rejected
    fn try_from(value: serde_json::Value) -> crate::Result<Self> {
        use serde_json::Value;

        match value {
            Value::String(text) => Ok(DateValue::Text(text)),
            Value::Null => Err(FeedError::UnsupportedType("null".to_string())),
            Value::Bool(_) => Err(FeedError::UnsupportedType("boolean".to_string())),
            Value::Number(n) => Err(FeedError::UnsupportedType(format!("number {}", n))),
            Value::Array(_) => Err(FeedError::UnsupportedType("array".to_string())),
            Value::Object(_) => Err(FeedError::UnsupportedType("object".to_string())),
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for DateValue {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        DateValue::try_from(value).map_err(serde::de::Error::custom)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for DateValue {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}
