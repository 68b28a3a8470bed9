//! This module reads XML text into an [`XmlElement`] tree using quick-xml's namespace-aware reader.

use std::borrow::Cow;

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::reader::NsReader;

use crate::error::{Line, ParseError};
use crate::schema;
use crate::xml::{XmlAttribute, XmlElement};

/// Keeps track of the current line while the reader moves forward through the input
struct LineCounter<'a> {
    input: &'a [u8],
    offset: usize,
    line: u32,
}

impl<'a> LineCounter<'a> {
    fn new(input: &'a str) -> Self {
        LineCounter {
            input: input.as_bytes(),
            offset: 0,
            line: 1,
        }
    }

    /// Move to a byte position of the input and return the line it is on
    fn advance_to(&mut self, position: usize) -> u32 {
        let position = position.min(self.input.len());
        if position > self.offset {
            let newlines = self.input[self.offset..position].iter().filter(|&&b| b == b'\n').count();
            self.line += newlines as u32;
            self.offset = position;
        }
        self.line
    }
}

fn malformed<E: Into<quick_xml::Error>>(line: u32) -> impl Fn(E) -> ParseError {
    move |error| ParseError::Xml {
        line: line.into(),
        source: error.into(),
    }
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Build an element (without children yet) from a start or empty tag
fn open_element(reader: &NsReader<&[u8]>, start: &BytesStart, line: u32) -> Result<XmlElement, ParseError> {
    let mut attributes = Vec::new();
    for attribute in start.attributes() {
        let attribute = attribute.map_err(malformed(line))?;
        let (namespace, local_name) = reader.resolve_attribute(attribute.key);
        let namespace = match namespace {
            ResolveResult::Bound(Namespace(uri)) => Some(lossy(uri)),
            _ => None,
        };
        let value = attribute.unescape_value().map_err(malformed(line))?;
        attributes.push(XmlAttribute {
            namespace,
            name: lossy(local_name.as_ref()),
            value: value.into_owned(),
        });
    }
    Ok(XmlElement {
        name: lossy(start.local_name().as_ref()),
        attributes,
        children: Vec::new(),
        text: String::new(),
        line,
    })
}

/// Hand a finished element to its parent, or make it the root if it has none.
/// A document has exactly one root element.
fn close_element(
    open: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<(), ParseError> {
    match open.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_some() => {
            return Err(ParseError::invalid(
                format!("Element <{}> is a second root element", element.name),
                element.line,
            ))
        }
        None => *root = Some(element),
    }
    Ok(())
}

/// Refuse to open an element below the deepest allowed level
fn check_depth(open: &[XmlElement], line: u32) -> Result<(), ParseError> {
    if open.len() >= schema::MAX_DEPTH {
        return Err(ParseError::invalid(
            format!("Elements are nested too deeply, at most {} levels are allowed", schema::MAX_DEPTH),
            line,
        ));
    }
    Ok(())
}

/// Parse a complete XML document and return its root element.
/// Element names are matched by local name later on, so prefixes are dropped here.
pub fn parse_document(input: &str) -> Result<XmlElement, ParseError> {
    let mut reader = NsReader::from_str(input);
    let mut lines = LineCounter::new(input);
    let mut open: Vec<XmlElement> = Vec::new();
    let mut root = None;

    loop {
        let line = lines.advance_to(reader.buffer_position() as usize);
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(source) => {
                let line = lines.advance_to(reader.buffer_position() as usize);
                return Err(ParseError::Xml { line: line.into(), source });
            }
        };
        match event {
            Event::Start(start) => {
                check_depth(&open, line)?;
                open.push(open_element(&reader, &start, line)?);
            }
            Event::Empty(start) => {
                check_depth(&open, line)?;
                let element = open_element(&reader, &start, line)?;
                close_element(&mut open, &mut root, element)?;
            }
            Event::End(_) => {
                if let Some(element) = open.pop() {
                    close_element(&mut open, &mut root, element)?;
                }
            }
            Event::Text(text) => {
                if let Some(current) = open.last_mut() {
                    let text: Cow<str> = text.unescape().map_err(malformed(line))?;
                    current.text.push_str(&text);
                }
            }
            Event::CData(data) => {
                if let Some(current) = open.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions and doctypes carry no contract data
            _ => {}
        }
    }

    if let Some(unclosed) = open.last() {
        return Err(ParseError::invalid(
            format!("Element <{}> is never closed", unclosed.name),
            unclosed.line,
        ));
    }
    root.ok_or_else(|| ParseError::invalid("Document has no root element", Line(None)))
}
