//! Feed item record

use crate::date::DateValue;

/// A single entry in the feed's channel
///
/// # Example
///
/// ```
/// use gen_rss::Item;
///
/// let item = Item::new(
///     "Episode 12",
///     "https://example.com/episodes/12",
///     "The twelfth episode",
///     "2020-01-01T00:00:00+00:00",
///     "Example Channel",
/// );
/// assert_eq!(item.channel_name, "Example Channel");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    /// Entry title (CDATA-wrapped on output)
    pub title: String,

    /// Entry link
    pub link: String,

    /// Entry description (CDATA-wrapped on output)
    pub description: String,

    /// Publication date, normalized on output
    #[cfg_attr(feature = "serde", serde(rename = "date_published"))]
    pub published: DateValue,

    /// Channel or author name, emitted as `dc:creator`
    pub channel_name: String,
}

impl Item {
    /// Create a new item
    pub fn new(
        title: impl Into<String>,
        link: impl Into<String>,
        description: impl Into<String>,
        published: impl Into<DateValue>,
        channel_name: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            description: description.into(),
            published: published.into(),
            channel_name: channel_name.into(),
        }
    }
}
