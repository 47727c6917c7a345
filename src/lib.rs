#![doc = include_str!("../README.md")]

mod config;
/// Date parsing, timezone conversion and canonical formatting
pub mod date;
mod error;
/// RSS 2.0 document assembly and validation
pub mod feed;
mod item;

pub use config::{
    DEFAULT_CATEGORIES, DEFAULT_GENERATOR, DEFAULT_LANGUAGE, DEFAULT_SITE_LINK, DEFAULT_TIMEZONE,
    FeedConfig,
};
pub use date::{DateValue, Instant};
pub use error::{FeedError, Result};
pub use feed::render;
pub use item::Item;
