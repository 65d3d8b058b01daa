//! Error types for zxml

use std::fmt;
use thiserror::Error;

/// Position in source text
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pos {
    pub offset: usize,
    pub line: u32,
    pub col: u32,
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.offset, self.line, self.col)
    }
}

impl Pos {
    pub const fn new(offset: usize, line: u32, col: u32) -> Self {
        Self { offset, line, col }
    }
}

/// Span representing a range in source text
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Span {
    pub start: Pos,
    pub end: Pos,
}

impl Span {
    pub const fn new(start: Pos, end: Pos) -> Self {
        Self { start, end }
    }

    pub const fn at(pos: Pos) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    pub const fn empty() -> Self {
        Self {
            start: Pos::new(0, 0, 0),
            end: Pos::new(0, 0, 0),
        }
    }
}

/// Error kind for detailed categorization
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input ended while a terminator was still expected
    UnexpectedEof { expected: &'static str },
    Expected { expected: &'static str, found: char },
    EmptyTagName,
    /// Attribute key not followed by `=`
    MalformedAttribute,
    UnquotedAttributeValue,
    /// End tag with no open element to close
    UnexpectedEndTag,
    MismatchedEndTag { expected: String, found: String },
    UnclosedElement { tag: String },
    MaxDepthExceeded { max: u16 },
    MaxSizeExceeded { max: usize },
    InvalidUtf8,
    Io { path: String },
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEof { expected } => {
                write!(f, "unexpected end of input, expected {expected}")
            }
            Self::Expected { expected, found } => {
                write!(f, "expected {expected}, found {found:?}")
            }
            Self::EmptyTagName => write!(f, "empty tag name"),
            Self::MalformedAttribute => write!(f, "malformed attribute"),
            Self::UnquotedAttributeValue => write!(f, "attribute value must be quoted"),
            Self::UnexpectedEndTag => write!(f, "end tag without an open element"),
            Self::MismatchedEndTag { expected, found } => {
                write!(f, "mismatched end tag: expected </{expected}>, found </{found}>")
            }
            Self::UnclosedElement { tag } => write!(f, "unclosed element <{tag}>"),
            Self::MaxDepthExceeded { max } => write!(f, "max depth exceeded: {max}"),
            Self::MaxSizeExceeded { max } => write!(f, "max size exceeded: {max}"),
            Self::InvalidUtf8 => write!(f, "invalid utf-8"),
            Self::Io { path } => write!(f, "failed to read {path}"),
        }
    }
}

/// Main error type for zxml
#[derive(Error, Clone, Debug, PartialEq)]
#[error("error at {}: {}", .span.start, .message)]
pub struct Error {
    kind: ErrorKind,
    span: Span,
    message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, span: Span) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            span,
            message,
        }
    }

    pub fn with_message(kind: ErrorKind, span: Span, message: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Create error at specific position
    pub fn at(kind: ErrorKind, pos: Pos) -> Self {
        Self::new(kind, Span::at(pos))
    }

    /// Wrap an I/O failure for `path`, keeping the OS message
    pub fn io(path: impl Into<String>, source: &std::io::Error) -> Self {
        let path = path.into();
        let message = format!("failed to read {path}: {source}");
        Self::with_message(ErrorKind::Io { path }, Span::empty(), message)
    }
}

/// Result type alias for zxml
pub type Result<T> = std::result::Result<T, Error>;
