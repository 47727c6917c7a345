//! Render round-trip tests
//!
//! Every item field written into the document must come back unchanged
//! when the document is parsed as an RSS channel.

use gen_rss::{FeedConfig, Item, render};
use rss::Channel;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn test_config() -> FeedConfig {
    FeedConfig::new(
        "Test Feed",
        "https://blast.video/whatever/rss",
        "feed description",
    )
}

fn creators(item: &rss::Item) -> Vec<String> {
    item.dublin_core_ext()
        .map(|dc| dc.creators().to_vec())
        .unwrap_or_default()
}

#[test]
fn test_single_item_round_trip() {
    init_tracing();
    let datetime_iso = "2020-01-01T00:00:00+00:00";
    let items = vec![Item::new(
        "test_title",
        "test_link",
        "test_description",
        datetime_iso,
        "test_channel_name",
    )];

    let xml = render(&items, &test_config()).unwrap();
    let channel = Channel::read_from(xml.as_bytes()).unwrap();

    assert_eq!(channel.items().len(), 1);
    let item = &channel.items()[0];
    assert_eq!(item.title(), Some("test_title"));
    assert_eq!(item.link(), Some("test_link"));
    assert_eq!(item.description(), Some("test_description"));
    assert_eq!(item.pub_date(), Some(datetime_iso));
    assert_eq!(creators(item), vec!["test_channel_name".to_string()]);
}

#[test]
fn test_channel_header_fields() {
    let xml = render(&[], &test_config()).unwrap();
    let channel = Channel::read_from(xml.as_bytes()).unwrap();

    assert_eq!(channel.title(), "Test Feed");
    assert_eq!(channel.link(), "https://blast.video");
    assert_eq!(channel.description(), "feed description");
    assert_eq!(channel.language(), Some("en-US"));
    assert_eq!(channel.generator(), Some("https://wordpress.org/?v=5.9.3"));
    assert!(channel.items().is_empty());
}

#[test]
fn test_last_build_date_is_offset_aware() {
    let xml = render(&[], &test_config().with_timezone("Asia/Kolkata")).unwrap();
    let channel = Channel::read_from(xml.as_bytes()).unwrap();

    let last_build = channel.last_build_date().unwrap();
    let parsed = chrono::DateTime::parse_from_rfc3339(last_build).unwrap();
    assert_eq!(parsed.offset().local_minus_utc(), 5 * 3600 + 30 * 60);
    assert!((chrono::Utc::now() - parsed.with_timezone(&chrono::Utc)).num_seconds().abs() < 60);

    // At most microsecond precision
    if let Some((_, fraction)) = last_build.split_once('.') {
        let digits = fraction.chars().take_while(char::is_ascii_digit).count();
        assert!(digits <= 6, "too precise: {}", last_build);
    }
}

#[test]
fn test_items_keep_input_order() {
    let items: Vec<Item> = (1..=5)
        .map(|i| {
            Item::new(
                format!("title {}", i),
                format!("https://example.com/{}", i),
                format!("description {}", i),
                format!("2021-0{}-01T12:00:00-05:00", i),
                "channel",
            )
        })
        .collect();

    let xml = render(&items, &test_config()).unwrap();
    let channel = Channel::read_from(xml.as_bytes()).unwrap();

    assert_eq!(channel.items().len(), items.len());
    for (input, output) in items.iter().zip(channel.items()) {
        assert_eq!(output.title(), Some(input.title.as_str()));
        assert_eq!(output.link(), Some(input.link.as_str()));
        assert_eq!(output.description(), Some(input.description.as_str()));
        assert_eq!(output.pub_date(), Some(input.published.to_string().as_str()));
    }
}

#[test]
fn test_markup_in_item_fields_survives() {
    let items = vec![Item::new(
        "Tom & Jerry <live>",
        "https://example.com/?a=1&b=2",
        "<p>Some <em>html</em> & an ]]> terminator</p>",
        "2020-06-01T08:00:00+02:00",
        "Hanna & Barbera",
    )];

    let xml = render(&items, &test_config()).unwrap();
    let channel = Channel::read_from(xml.as_bytes()).unwrap();
    let item = &channel.items()[0];

    assert_eq!(item.title(), Some("Tom & Jerry <live>"));
    assert_eq!(item.link(), Some("https://example.com/?a=1&b=2"));
    assert_eq!(
        item.description(),
        Some("<p>Some <em>html</em> & an ]]> terminator</p>")
    );
    assert_eq!(creators(item), vec!["Hanna & Barbera".to_string()]);
}

#[test]
fn test_free_form_dates_are_normalized() {
    let items = vec![
        Item::new("a", "l", "d", "March 3rd, 2020 around noon", "c"),
        Item::new("b", "l", "d", "Tue, 20 Jan 2026 12:00:00 GMT", "c"),
    ];

    let xml = render(&items, &test_config()).unwrap();
    let channel = Channel::read_from(xml.as_bytes()).unwrap();

    // Offset-less readings are anchored in the feed timezone
    assert_eq!(
        channel.items()[0].pub_date(),
        Some("2020-03-03T12:00:00-05:00")
    );
    assert_eq!(
        channel.items()[1].pub_date(),
        Some("2026-01-20T12:00:00+00:00")
    );
}

#[test]
fn test_structured_dates() {
    let instant = chrono::DateTime::parse_from_rfc3339("2022-02-02T02:02:02+03:00").unwrap();
    let items = vec![Item::new("a", "l", "d", instant, "c")];

    let xml = render(&items, &test_config()).unwrap();
    assert!(xml.contains("<pubDate>2022-02-02T02:02:02+03:00</pubDate>"));
}

#[cfg(feature = "serde")]
#[test]
fn test_items_from_json() {
    let items: Vec<Item> = serde_json::from_str(
        r#"[{
            "title": "json title",
            "link": "https://example.com/json",
            "description": "json description",
            "date_published": "2020-01-01T00:00:00+00:00",
            "channel_name": "json channel"
        }]"#,
    )
    .unwrap();

    let xml = render(&items, &test_config()).unwrap();
    let channel = Channel::read_from(xml.as_bytes()).unwrap();
    assert_eq!(channel.items()[0].title(), Some("json title"));
}
