//! RSS 2.0 feed serialization
//!
//! This module is organized into:
//! - `writer`: typed XML writer (raw, escaped and CDATA content)
//! - `render`: header, item and footer assembly
//! - `validate`: reads the finished document back with the `rss` crate

mod render;
mod validate;
mod writer;

pub use self::render::{render, strip_blank_lines};
pub use self::validate::validate;
pub use self::writer::{Attr, Content, FeedWriter};
