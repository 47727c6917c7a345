//! Feed generation error types

use thiserror::Error;

/// Date normalization and feed serialization errors
#[derive(Error, Debug)]
pub enum FeedError {
    /// Date string could not be parsed
    #[error("Unparseable date {input:?}: {reason}")]
    DateParse {
        /// The offending input
        input: String,
        /// What the parser rejected
        reason: String,
    },

    /// Timezone identifier not present in the timezone database
    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    /// Date value of a kind the normalizer does not accept
    #[error("Unsupported date value: {0}")]
    UnsupportedType(String),

    /// Rendered document failed feed validation, with the reader's diagnostic
    #[error("Malformed feed: {0}")]
    MalformedFeed(String),

    /// IO error while writing the document buffer
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// XML writer error
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// UTF-8 decoding error
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl FeedError {
    pub(crate) fn date_parse(input: &str, reason: impl Into<String>) -> Self {
        FeedError::DateParse {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias using FeedError
pub type Result<T> = std::result::Result<T, FeedError>;
