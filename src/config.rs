//! Feed channel configuration

/// Categories attached to every item when none are configured
pub const DEFAULT_CATEGORIES: [&str; 2] = ["Politics", "News"];

/// Default channel language tag
pub const DEFAULT_LANGUAGE: &str = "en-US";

/// Default timezone for `lastBuildDate` and offset-less item dates
pub const DEFAULT_TIMEZONE: &str = "US/Eastern";

/// Default channel `<link>` target
pub const DEFAULT_SITE_LINK: &str = "https://blast.video";

/// Default `<generator>` marker
pub const DEFAULT_GENERATOR: &str = "https://wordpress.org/?v=5.9.3";

/// Channel metadata and rendering options
///
/// # Example
///
/// ```
/// use gen_rss::FeedConfig;
///
/// // Recommended: use the constructor and helpers
/// let config = FeedConfig::new("My Feed", "https://example.com/rss", "All the news")
///     .with_timezone("Europe/Berlin")
///     .with_categories(vec!["Tech"]);
/// assert_eq!(config.language, "en-US");
///
/// // An explicit empty list suppresses category elements
/// let bare = FeedConfig::new("My Feed", "https://example.com/rss", "All the news")
///     .with_categories(Vec::<String>::new());
/// assert!(bare.effective_categories().is_empty());
/// ```
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeedConfig {
    /// Channel title
    ///
    /// **Trust boundary:** inserted into the document without escaping.
    pub title: String,

    /// Feed URL, used as the `atom:link` self reference
    ///
    /// **Trust boundary:** inserted into the document without escaping.
    pub link: String,

    /// Channel description
    ///
    /// **Trust boundary:** inserted into the document without escaping.
    pub description: String,

    /// Canonical site URL for the channel `<link>` element
    #[cfg_attr(feature = "serde", serde(default = "default_site_link"))]
    pub site_link: String,

    /// Language tag (default: "en-US")
    #[cfg_attr(feature = "serde", serde(default = "default_language"))]
    pub language: String,

    /// IANA timezone identifier (default: "US/Eastern")
    #[cfg_attr(feature = "serde", serde(default = "default_timezone"))]
    pub timezone: String,

    /// Categories repeated on every item
    ///
    /// `None` uses [`DEFAULT_CATEGORIES`]; `Some(vec![])` emits no categories.
    #[cfg_attr(feature = "serde", serde(default))]
    pub categories: Option<Vec<String>>,

    /// Value of the `<generator>` element
    #[cfg_attr(feature = "serde", serde(default = "default_generator"))]
    pub generator: String,

    /// Return the document without validating it
    #[cfg_attr(feature = "serde", serde(default))]
    pub ignore_errors: bool,
}

#[cfg(feature = "serde")]
fn default_site_link() -> String {
    DEFAULT_SITE_LINK.to_string()
}

#[cfg(feature = "serde")]
fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

#[cfg(feature = "serde")]
fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

#[cfg(feature = "serde")]
fn default_generator() -> String {
    DEFAULT_GENERATOR.to_string()
}

impl FeedConfig {
    /// Create a configuration with default language, timezone and categories
    pub fn new(
        title: impl Into<String>,
        link: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            description: description.into(),
            site_link: DEFAULT_SITE_LINK.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            timezone: DEFAULT_TIMEZONE.to_string(),
            categories: None,
            generator: DEFAULT_GENERATOR.to_string(),
            ignore_errors: false,
        }
    }

    /// Set the language tag
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Set the timezone identifier
    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = timezone.into();
        self
    }

    /// Set the item categories; an empty list suppresses them
    pub fn with_categories(mut self, categories: Vec<impl Into<String>>) -> Self {
        self.categories = Some(categories.into_iter().map(|c| c.into()).collect());
        self
    }

    /// Set the canonical site link
    pub fn with_site_link(mut self, site_link: impl Into<String>) -> Self {
        self.site_link = site_link.into();
        self
    }

    /// Set the generator marker
    pub fn with_generator(mut self, generator: impl Into<String>) -> Self {
        self.generator = generator.into();
        self
    }

    /// Skip validation of the rendered document
    pub fn ignore_errors(mut self, ignore: bool) -> Self {
        self.ignore_errors = ignore;
        self
    }

    /// Categories to emit on each item, in order
    pub fn effective_categories(&self) -> Vec<&str> {
        match &self.categories {
            Some(categories) => categories.iter().map(String::as_str).collect(),
            None => DEFAULT_CATEGORIES.to_vec(),
        }
    }
}
