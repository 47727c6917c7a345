//! Timezone attachment and conversion tests

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use gen_rss::date::{format, now, to_zone};
use gen_rss::{DateValue, FeedError};

fn noon() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2020, 1, 15)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

#[test]
fn test_naive_attaches_without_shift() {
    let result = to_zone(&DateValue::Naive(noon()), "US/Eastern").unwrap();
    assert_eq!(result.naive_local(), noon());
    assert_eq!(format(&result), "2020-01-15T12:00:00-05:00");
}

#[test]
fn test_naive_text_attaches_without_shift() {
    let result = to_zone(&DateValue::from("2020-01-15T12:00:00"), "Europe/Paris").unwrap();
    assert_eq!(format(&result), "2020-01-15T12:00:00+01:00");
}

#[test]
fn test_aware_converts_preserving_instant() {
    let original = noon().and_utc().fixed_offset();
    let result = to_zone(&DateValue::from(original), "US/Eastern").unwrap();

    // Same absolute instant
    assert_eq!(result, original);
    assert_eq!(result.timestamp(), original.timestamp());
    // Different printed local time
    assert_eq!(result.hour(), 7);
    assert_ne!(format(&result), format(&original));
    assert_eq!(format(&result), "2020-01-15T07:00:00-05:00");
}

#[test]
fn test_attach_and_convert_differ() {
    let attached = to_zone(&DateValue::Naive(noon()), "Asia/Tokyo").unwrap();
    let converted = to_zone(&DateValue::from(noon().and_utc()), "Asia/Tokyo").unwrap();
    assert_ne!(attached, converted);
    assert_eq!(attached.hour(), 12);
    assert_eq!(converted.hour(), 21);
}

#[test]
fn test_unknown_zone() {
    for zone in ["", "US/Nowhere", "Eastern Standard Time"] {
        match to_zone(&DateValue::Naive(noon()), zone) {
            Err(FeedError::UnknownTimezone(id)) => assert_eq!(id, zone),
            other => panic!("expected UnknownTimezone for {:?}, got {:?}", zone, other),
        }
        assert!(now(zone).is_err());
    }
}

#[test]
fn test_now_is_comparable_across_zones() {
    let tokyo = now("Asia/Tokyo").unwrap();
    let eastern = now("US/Eastern").unwrap();
    assert_eq!(tokyo.offset().local_minus_utc(), 9 * 3600);
    assert!((tokyo - eastern).num_seconds().abs() < 60);
}
