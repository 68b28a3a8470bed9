//! This module defines the error types for this crate.

use std::fmt::{Display, Formatter, Result as FmtResult};

/// A 1-based line in the source document, if it is known
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Line(pub Option<u32>);

/// Lines are displayed as their number, or N/A when the position was not tracked
impl Display for Line {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self.0 {
            Some(line) => write!(f, "{}", line),
            None => write!(f, "N/A"),
        }
    }
}

impl From<u32> for Line {
    fn from(line: u32) -> Self {
        Line(Some(line))
    }
}

/// A structural problem with a contract document. Any of these aborts the whole parse.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// A required element is missing, a discriminator is unknown,
    /// or a value cannot be parsed into its legal set
    #[error("{message} (line {line})")]
    InvalidElement { message: String, line: Line },

    /// A property data type literal has no entry in the property type table
    #[error("Cannot convert {0} to a valid data type")]
    UnrecognizedDataType(String),

    /// The input is not well-formed XML
    #[error("Malformed XML at line {line}: {source}")]
    Xml { line: Line, source: quick_xml::Error },
}

impl ParseError {
    pub(crate) fn invalid(message: impl Into<String>, line: impl Into<Line>) -> Self {
        ParseError::InvalidElement {
            message: message.into(),
            line: line.into(),
        }
    }

    /// The line the error points at, if any
    pub fn line(&self) -> Line {
        match self {
            ParseError::InvalidElement { line, .. } | ParseError::Xml { line, .. } => *line,
            ParseError::UnrecognizedDataType(_) => Line(None),
        }
    }
}

/// Errors of a whole conversion run, including acquiring the document
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("No input file provided. Exiting...")]
    NoInputFile,
    #[error("Unsupported file extension. Supported file extensions are: .dascontract, .xml")]
    UnsupportedFileExt,
    #[error("Error opening file: {0}")]
    IO(#[from] std::io::Error),
    #[error("Error parsing contract: {0}")]
    Parse(#[from] ParseError),
}
