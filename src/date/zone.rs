//! Timezone lookup and offset attachment

use chrono::{NaiveDateTime, Offset, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;

use super::Instant;
use crate::{FeedError, Result};

/// Look up an IANA timezone identifier (e.g. `US/Eastern`, `Europe/Berlin`, `UTC`)
///
/// # Examples
///
/// ```
/// use gen_rss::date::lookup_zone;
///
/// assert!(lookup_zone("US/Eastern").is_ok());
/// assert!(lookup_zone("Mars/Olympus_Mons").is_err());
/// ```
pub fn lookup_zone(id: &str) -> Result<Tz> {
    id.parse::<Tz>()
        .map_err(|_| FeedError::UnknownTimezone(id.to_string()))
}

/// Treat a naive reading as local wall-clock time in `tz`.
///
/// Ambiguous local times (clocks falling back) take the earlier offset.
/// Local times skipped by a DST transition keep their wall-clock reading and
/// take the offset that was in effect before the transition.
pub(crate) fn attach(naive: &NaiveDateTime, tz: &Tz) -> Result<Instant> {
    if let Some(dt) = tz.from_local_datetime(naive).earliest() {
        return Ok(dt.fixed_offset());
    }

    let offset = naive
        .checked_sub_signed(TimeDelta::days(1))
        .and_then(|before| tz.offset_from_local_datetime(&before).earliest())
        .map(|offset| offset.fix())
        .ok_or_else(|| FeedError::date_parse(&naive.to_string(), "local time does not exist"))?;

    naive
        .and_local_timezone(offset)
        .single()
        .ok_or_else(|| FeedError::date_parse(&naive.to_string(), "local time does not exist"))
}

/// View an anchored instant in `tz`; the absolute instant is unchanged.
pub(crate) fn convert(instant: &Instant, tz: &Tz) -> Instant {
    instant.with_timezone(tz).fixed_offset()
}

/// Anchor a naive reading at UTC
pub(crate) fn utc(naive: &NaiveDateTime) -> Instant {
    naive.and_utc().fixed_offset()
}

/// Current instant viewed in `tz`
pub(crate) fn now_in(tz: &Tz) -> Instant {
    Utc::now().with_timezone(tz).fixed_offset()
}
