//! Feed validation tests
//!
//! Channel-level title and description are written unescaped, so markup in
//! them is the one way a caller can produce a malformed document.

use gen_rss::feed::validate;
use gen_rss::{FeedConfig, FeedError, Item, render};

fn items() -> Vec<Item> {
    vec![Item::new(
        "title",
        "https://example.com/1",
        "description",
        "2020-01-01T00:00:00+00:00",
        "channel",
    )]
}

#[test]
fn test_empty_feed_validates() {
    let config = FeedConfig::new("Feed", "https://example.com/rss", "desc");
    let xml = render(&[], &config).unwrap();
    let channel = validate(&xml).unwrap();
    assert!(channel.items().is_empty());
}

#[test]
fn test_unescaped_channel_title_is_rejected() {
    let config = FeedConfig::new("Tom & Jerry <b>live", "https://example.com/rss", "desc");
    match render(&items(), &config) {
        Err(FeedError::MalformedFeed(e)) => assert!(!e.to_string().is_empty()),
        other => panic!("expected MalformedFeed, got {:?}", other),
    }
}

#[test]
fn test_ignore_errors_returns_unvalidated_document() {
    let config = FeedConfig::new("Tom & Jerry <b>live", "https://example.com/rss", "desc")
        .ignore_errors(true);
    let xml = render(&items(), &config).unwrap();
    assert!(xml.contains("<title>Tom & Jerry <b>live</title>"));
    assert!(validate(&xml).is_err());
}

#[test]
fn test_escaped_channel_title_is_accepted() {
    let config = FeedConfig::new("Tom &amp; Jerry", "https://example.com/rss", "desc");
    let xml = render(&items(), &config).unwrap();
    let channel = validate(&xml).unwrap();
    assert_eq!(channel.title(), "Tom & Jerry");
}

#[test]
fn test_unwrapped_item_title_is_rejected() {
    let config = FeedConfig::new("Feed", "https://example.com/rss", "desc").ignore_errors(true);
    let xml = render(&items(), &config).unwrap();
    assert!(validate(&xml).is_ok());

    // Same document with the item title written without CDATA
    let broken = xml.replace(
        "<title><![CDATA[title]]></title>",
        "<title>a <b>bold title</title>",
    );
    assert_ne!(broken, xml);
    assert!(matches!(validate(&broken), Err(FeedError::MalformedFeed(_))));
}

#[test]
fn test_truncated_document_is_rejected() {
    let config = FeedConfig::new("Feed", "https://example.com/rss", "desc");
    let xml = render(&items(), &config).unwrap();

    let truncated = xml.replace("</rss>", "");
    assert_ne!(truncated, xml);
    assert!(matches!(validate(&truncated), Err(FeedError::MalformedFeed(_))));

    let trailing = format!("{}\n<rss version=\"2.0\"/>", xml);
    assert!(matches!(validate(&trailing), Err(FeedError::MalformedFeed(_))));
}
