//! This module defines an owned, line-aware XML element tree and the lookups the contract parsers need.
//!
//! Contract documents are small, and the parsers scan whole subtrees at arbitrary depth,
//! so the document is read once into this tree instead of being deserialized into fixed structs.

mod parse;

pub use parse::parse_document;

use std::str::FromStr;

use crate::error::ParseError;

/// An attribute with its namespace resolved to a URI (prefixes are not kept)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlAttribute {
    pub namespace: Option<String>,
    pub name: String,
    pub value: String,
}

/// An element has a local name, attributes, child elements, its own character data,
/// and the 1-based line its start tag was found on
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<XmlAttribute>,
    pub children: Vec<XmlElement>,
    pub text: String,
    pub line: u32,
}

impl XmlElement {
    /// The first direct child with the given name
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|child| child.name == name)
    }

    /// All direct children with the given name, in document order
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.children.iter().filter(move |child| child.name == name)
    }

    /// All elements below this one in document (pre-)order, regardless of depth
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children.iter().rev().collect(),
        }
    }

    /// All descendants with the given name, in document order
    pub fn descendants_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.descendants().filter(move |element| element.name == name)
    }

    /// The first descendant with the given name, at any depth
    pub fn first_descendant(&self, name: &str) -> Option<&XmlElement> {
        self.descendants().find(|element| element.name == name)
    }

    /// Look up an attribute by namespace URI (None for unqualified attributes) and local name
    pub fn attribute(&self, namespace: Option<&str>, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attribute| attribute.name == name && attribute.namespace.as_deref() == namespace)
            .map(|attribute| attribute.value.as_str())
    }

    /// The character data of the first direct child with the given name
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).map(|child| child.text.as_str())
    }

    /// Parse the character data into `T`, naming `what` was expected if it does not parse
    pub fn parse_text<T: FromStr>(&self, what: &str) -> Result<T, ParseError> {
        let text = self.text.trim();
        text.parse()
            .map_err(|_| ParseError::invalid(format!("{} is not a valid {}", text, what), self.line))
    }

    /// Parse the character data as a boolean literal: `true` or `false` in any case,
    /// surrounding whitespace ignored
    pub fn bool_value(&self) -> Result<bool, ParseError> {
        let text = self.text.trim();
        if text.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if text.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(ParseError::invalid(
                format!("{} is not a valid boolean value for {}", text, self.name),
                self.line,
            ))
        }
    }
}

/// Depth-first, pre-order walk over the elements below some element
#[derive(Debug, Clone)]
pub struct Descendants<'a> {
    stack: Vec<&'a XmlElement>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a XmlElement;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.stack.pop()?;
        self.stack.extend(element.children.iter().rev());
        Some(element)
    }
}
