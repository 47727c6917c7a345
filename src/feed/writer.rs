//! Typed XML writer for feed documents
//!
//! Every element body states how its value is written, so the escaping rule
//! for a field is chosen where the field is emitted rather than by convention.

use std::borrow::Cow;
use std::io::Cursor;

use quick_xml::Writer;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::name::QName;

use crate::Result;

const INDENT: usize = 3;

/// How an element body is written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Content<'a> {
    /// Inserted verbatim; the caller is responsible for well-formedness
    Raw(&'a str),
    /// XML-escaped text
    Text(&'a str),
    /// Wrapped in `<![CDATA[...]]>`
    CData(&'a str),
}

/// How an attribute value is written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attr<'a> {
    /// Value inserted verbatim
    Raw(&'a str, &'a str),
    /// Value XML-escaped
    Text(&'a str, &'a str),
}

/// Streaming feed document writer over an in-memory buffer
pub struct FeedWriter {
    writer: Writer<Cursor<Vec<u8>>>,
}

impl Default for FeedWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedWriter {
    /// Create an empty indented writer
    pub fn new() -> Self {
        Self {
            writer: Writer::new_with_indent(Cursor::new(Vec::new()), b' ', INDENT),
        }
    }

    /// Write `<?xml version="1.0" encoding="UTF-8"?>`
    pub fn declaration(&mut self) -> Result<()> {
        self.writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        Ok(())
    }

    /// Open an element
    pub fn open(&mut self, name: &str, attributes: &[Attr<'_>]) -> Result<()> {
        self.writer
            .write_event(Event::Start(start_tag(name, attributes)))?;
        Ok(())
    }

    /// Close an element
    pub fn close(&mut self, name: &str) -> Result<()> {
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    /// Write a self-closing element
    pub fn empty(&mut self, name: &str, attributes: &[Attr<'_>]) -> Result<()> {
        self.writer
            .write_event(Event::Empty(start_tag(name, attributes)))?;
        Ok(())
    }

    /// Write `<name>content</name>`
    pub fn element(&mut self, name: &str, content: Content<'_>) -> Result<()> {
        self.writer.write_event(Event::Start(BytesStart::new(name)))?;
        match content {
            Content::Raw(raw) => {
                self.writer
                    .write_event(Event::Text(BytesText::from_escaped(raw)))?;
            }
            Content::Text(text) => {
                self.writer.write_event(Event::Text(BytesText::new(text)))?;
            }
            Content::CData(text) => {
                for section in cdata_sections(text) {
                    self.writer
                        .write_event(Event::CData(BytesCData::new(section)))?;
                }
            }
        }
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    /// Consume the writer and return the document text
    pub fn finish(self) -> Result<String> {
        Ok(String::from_utf8(self.writer.into_inner().into_inner())?)
    }
}

fn start_tag<'a>(name: &'a str, attributes: &[Attr<'a>]) -> BytesStart<'a> {
    let mut tag = BytesStart::new(name);
    for attr in attributes {
        match *attr {
            Attr::Raw(key, value) => tag.push_attribute(Attribute {
                key: QName(key.as_bytes()),
                value: Cow::Borrowed(value.as_bytes()),
            }),
            Attr::Text(key, value) => tag.push_attribute((key, value)),
        }
    }
    tag
}

/// Split text so that no section contains the CDATA terminator `]]>`
///
/// `a]]>b` becomes `a]]` and `>b`; adjacent CDATA sections concatenate back
/// to the original text when read.
fn cdata_sections(text: &str) -> Vec<&str> {
    let mut sections = Vec::new();
    let mut rest = text;
    while let Some(pos) = rest.find("]]>") {
        sections.push(&rest[..pos + 2]);
        rest = &rest[pos + 2..];
    }
    sections.push(rest);
    sections
}
