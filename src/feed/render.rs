//! RSS 2.0 document assembly

use chrono_tz::Tz;
use tracing::debug;

use super::validate::validate;
use super::writer::{Attr, Content, FeedWriter};
use crate::config::FeedConfig;
use crate::date::{self, Instant};
use crate::item::Item;
use crate::Result;

/// Namespaces declared on the `<rss>` root element
const NAMESPACES: [(&str, &str); 8] = [
    ("xmlns:atom", "http://www.w3.org/2005/Atom"),
    ("xmlns:content", "http://purl.org/rss/1.0/modules/content/"),
    ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
    ("xmlns:geo", "http://www.w3.org/2003/01/geo/wgs84_pos#"),
    ("xmlns:georss", "http://www.georss.org/georss"),
    ("xmlns:slash", "http://purl.org/rss/1.0/modules/slash/"),
    ("xmlns:sy", "http://purl.org/rss/1.0/modules/syndication/"),
    ("xmlns:wfw", "http://wellformedweb.org/CommentAPI/"),
];

const UPDATE_PERIOD: &str = "hourly";
const UPDATE_FREQUENCY: &str = "1";

/// Render items into an RSS 2.0 document
///
/// Items keep their input order and every item carries the same category
/// list. Blank lines are removed from the result. Unless
/// `ignore_errors` is set in the config, the document is read back as an RSS
/// channel and a parse failure is returned as [`crate::FeedError::MalformedFeed`].
///
/// Date and timezone errors are always returned.
///
/// # Examples
///
/// ```
/// use gen_rss::{FeedConfig, Item, render};
///
/// let items = vec![Item::new(
///     "test_title",
///     "test_link",
///     "test_description",
///     "2020-01-01T00:00:00+00:00",
///     "test_channel_name",
/// )];
/// let config = FeedConfig::new("Test Feed", "https://blast.video/whatever/rss", "feed description");
///
/// let xml = render(&items, &config).unwrap();
/// assert!(xml.contains("<pubDate>2020-01-01T00:00:00+00:00</pubDate>"));
/// assert!(xml.contains("<dc:creator><![CDATA[test_channel_name]]></dc:creator>"));
/// ```
pub fn render(items: &[Item], config: &FeedConfig) -> Result<String> {
    let tz = date::lookup_zone(&config.timezone)?;
    let now = date::now_in(&tz);
    let categories = config.effective_categories();

    debug!(
        "Rendering feed {:?} with {} items and {} categories in {}",
        config.title,
        items.len(),
        categories.len(),
        config.timezone
    );

    let mut writer = FeedWriter::new();
    write_header(&mut writer, config, &now)?;
    for item in items {
        write_item(&mut writer, item, &categories, &tz)?;
    }
    write_footer(&mut writer)?;

    let document = strip_blank_lines(&writer.finish()?);

    if config.ignore_errors {
        debug!("Skipping feed validation");
    } else {
        let channel = validate(&document)?;
        debug!("Feed validated with {} items", channel.items().len());
    }

    Ok(document)
}

fn write_header(writer: &mut FeedWriter, config: &FeedConfig, now: &Instant) -> Result<()> {
    let mut root: Vec<Attr<'_>> = NAMESPACES
        .iter()
        .map(|&(key, value)| Attr::Text(key, value))
        .collect();
    root.push(Attr::Text("version", "2.0"));

    writer.declaration()?;
    writer.open("rss", &root)?;
    writer.open("channel", &[])?;
    writer.element("title", Content::Raw(&config.title))?;
    writer.empty(
        "atom:link",
        &[
            Attr::Raw("href", &config.link),
            Attr::Text("rel", "self"),
            Attr::Text("type", "application/rss+xml"),
        ],
    )?;
    writer.element("link", Content::Text(&config.site_link))?;
    writer.element("description", Content::Raw(&config.description))?;
    writer.element("lastBuildDate", Content::Text(&date::format(now)))?;
    writer.element("language", Content::Text(&config.language))?;
    writer.element("sy:updatePeriod", Content::Text(UPDATE_PERIOD))?;
    writer.element("sy:updateFrequency", Content::Text(UPDATE_FREQUENCY))?;
    writer.element("generator", Content::Text(&config.generator))?;
    Ok(())
}

fn write_item(writer: &mut FeedWriter, item: &Item, categories: &[&str], tz: &Tz) -> Result<()> {
    let published = date::parse_with(&item.published, tz)?;

    writer.open("item", &[])?;
    writer.element("title", Content::CData(&item.title))?;
    writer.element("link", Content::Text(&item.link))?;
    writer.element("dc:creator", Content::CData(&item.channel_name))?;
    writer.element("pubDate", Content::Text(&date::format(&published)))?;
    for &category in categories {
        writer.element("category", Content::CData(category))?;
    }
    writer.element("description", Content::CData(&item.description))?;
    writer.close("item")
}

fn write_footer(writer: &mut FeedWriter) -> Result<()> {
    writer.close("channel")?;
    writer.close("rss")
}

/// Remove every empty or whitespace-only line
pub fn strip_blank_lines(document: &str) -> String {
    document
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
