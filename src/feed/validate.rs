//! Feed well-formedness check

use quick_xml::Reader;
use quick_xml::events::Event;
use rss::Channel;
use tracing::{trace, warn};

use crate::{FeedError, Result};

/// Read a document back as an RSS channel
///
/// The document must parse as a channel and be well-formed XML through to its
/// end: a single root element, closed, with nothing but whitespace, comments
/// or processing instructions after it. Returns the parsed channel, or
/// [`FeedError::MalformedFeed`] carrying the reader's diagnostic.
///
/// # Examples
///
/// ```
/// use gen_rss::feed::validate;
///
/// let ok = r#"<rss version="2.0"><channel><title>t</title></channel></rss>"#;
/// assert!(validate(ok).is_ok());
///
/// let broken = r#"<rss version="2.0"><channel><title>a <b>c</title></channel></rss>"#;
/// assert!(validate(broken).is_err());
///
/// let truncated = r#"<rss version="2.0"><channel><title>t</title></channel>"#;
/// assert!(validate(truncated).is_err());
/// ```
pub fn validate(document: &str) -> Result<Channel> {
    let channel = Channel::read_from(document.as_bytes()).map_err(|e| malformed(e.to_string()))?;
    check_structure(document).map_err(malformed)?;
    trace!("Feed parsed: {} items", channel.items().len());
    Ok(channel)
}

fn malformed(reason: String) -> FeedError {
    warn!("Generated feed is malformed: {}", reason);
    FeedError::MalformedFeed(reason)
}

/// Walk the whole document, which the channel reader stops short of
fn check_structure(document: &str) -> std::result::Result<(), String> {
    let mut reader = Reader::from_str(document);
    let mut depth = 0usize;
    let mut root_closed = false;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| format!("{} at byte {}", e, reader.error_position()))?;
        match event {
            Event::Start(_) | Event::Empty(_) | Event::CData(_) if root_closed => {
                return Err(format!(
                    "content after the root element at byte {}",
                    reader.buffer_position()
                ));
            }
            Event::Start(_) => depth += 1,
            Event::Empty(_) if depth == 0 => root_closed = true,
            Event::End(_) => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    root_closed = true;
                }
            }
            Event::Text(text) if depth == 0 && !text.iter().all(u8::is_ascii_whitespace) => {
                return Err(format!(
                    "text outside the root element at byte {}",
                    reader.buffer_position()
                ));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if root_closed {
        Ok(())
    } else {
        Err(format!("{} unclosed element(s) at end of document", depth))
    }
}
