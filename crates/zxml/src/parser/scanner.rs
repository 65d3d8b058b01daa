//! Single-pass scanner that builds the node tree
//!
//! The scanner keeps one piece of tree state: the id of the innermost element
//! whose start tag has been read but whose end tag (or self-close) has not.
//! Start tags push a child under it, end tags pop back to its parent. Nesting
//! is followed through parent links plus a depth counter, so deep documents
//! never grow the call stack.

use tracing::{debug, trace, warn};

use crate::error::{Error, ErrorKind, Result};
use crate::parser::config::{Config, EndTagMode};
use crate::parser::cursor::{is_whitespace, Cursor};
use crate::tree::{Attribute, Document, NodeId};

/// Markup parser
#[derive(Debug)]
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    config: Config,
    doc: Document,
    current: NodeId,
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser with default configuration
    pub fn new(input: &'a str) -> Self {
        Self::with_config(input, Config::default())
    }

    pub fn with_config(input: &'a str, config: Config) -> Self {
        Self {
            cursor: Cursor::new(input),
            config,
            doc: Document::new(),
            current: NodeId::ROOT,
            depth: 0,
        }
    }

    /// Scan the whole input and return the finished tree
    pub fn parse(mut self) -> Result<Document> {
        let size = self.cursor.remaining().len();
        if self.config.size_exceeded(size) {
            return Err(Error::at(
                ErrorKind::MaxSizeExceeded {
                    max: self.config.max_size,
                },
                self.cursor.position(),
            ));
        }

        loop {
            self.cursor.skip_whitespace();
            match self.cursor.current() {
                None => break,
                Some(b'<') => {
                    self.cursor.advance();
                    self.cursor.skip_whitespace();
                    self.parse_markup()?;
                }
                Some(_) => self.parse_content(),
            }
        }

        self.finish()
    }

    fn parse_markup(&mut self) -> Result<()> {
        match self.cursor.current() {
            Some(b'?') => self.skip_processing_instruction(),
            Some(b'!') if self.cursor.starts_with(b"!--") => self.skip_comment(),
            Some(b'!') => self.skip_declaration(),
            Some(b'/') => self.parse_end_tag(),
            Some(_) => self.parse_start_tag(),
            None => Err(self.eof("tag name")),
        }
    }

    /// A text run up to the next `<`.
    ///
    /// Only the first run inside an element, seen before any child element,
    /// becomes its text, and it is dropped again if a child follows.
    /// Everything else is passed over.
    fn parse_content(&mut self) {
        let run = self.cursor.take_while(|b| b != b'<');
        let current = self.current;
        let Some(node) = self.doc.data_mut(current) else {
            return;
        };
        if current == NodeId::ROOT || node.text.is_some() || !node.children.is_empty() {
            trace!(len = run.len(), "skipped content");
            return;
        }
        let text = run.trim();
        if !text.is_empty() {
            trace!(tag = %node.tag, text, "inner text");
            node.text = Some(text.to_string());
        }
    }

    fn parse_start_tag(&mut self) -> Result<()> {
        let start = self.cursor.position();
        let name = self
            .cursor
            .take_while(|b| !(is_whitespace(b) || b == b'/' || b == b'>'));
        if name.is_empty() {
            if self.cursor.is_eof() {
                return Err(self.eof("tag name"));
            }
            return Err(Error::at(ErrorKind::EmptyTagName, start));
        }

        self.depth += 1;
        if self.config.depth_exceeded(self.depth) {
            return Err(Error::at(
                ErrorKind::MaxDepthExceeded {
                    max: self.config.max_depth,
                },
                start,
            ));
        }
        self.current = self.doc.append_child(self.current, name.to_string());

        self.parse_attributes()?;

        if self.cursor.consume(b'/') {
            if !self.cursor.consume(b'>') {
                return Err(self.unexpected("'>' after '/'"));
            }
            debug!(tag = name, "self-closing element");
            self.close_current();
        } else {
            // parse_attributes only returns when looking at '/' or '>'
            self.cursor.advance();
            debug!(tag = name, depth = self.depth, "opened element");
        }
        Ok(())
    }

    /// Attributes of the current start tag, up to its `/` or `>`
    fn parse_attributes(&mut self) -> Result<()> {
        loop {
            self.cursor.skip_whitespace();
            match self.cursor.current() {
                None => return Err(self.eof("'>'")),
                Some(b'/' | b'>') => return Ok(()),
                Some(_) => {}
            }

            let key_start = self.cursor.position();
            let key = self
                .cursor
                .take_while(|b| !(is_whitespace(b) || matches!(b, b'=' | b'/' | b'>')));
            self.cursor.skip_whitespace();
            match self.cursor.current() {
                None => return Err(self.eof("'='")),
                Some(b'=') if !key.is_empty() => self.cursor.advance(),
                Some(_) => return Err(Error::at(ErrorKind::MalformedAttribute, key_start)),
            }

            self.cursor.skip_whitespace();
            let quote = match self.cursor.current() {
                Some(q @ (b'"' | b'\'')) => q,
                None => return Err(self.eof("quoted attribute value")),
                Some(_) => {
                    return Err(Error::at(
                        ErrorKind::UnquotedAttributeValue,
                        self.cursor.position(),
                    ))
                }
            };
            self.cursor.advance();
            let Some(value) = self.cursor.take_until(quote) else {
                return Err(self.eof("closing quote"));
            };
            self.cursor.advance();

            trace!(key, value, "attribute");
            if let Some(node) = self.doc.data_mut(self.current) {
                node.attributes.push(Attribute::new(key, value));
            }
        }
    }

    fn parse_end_tag(&mut self) -> Result<()> {
        let start = self.cursor.position();
        self.cursor.advance(); // '/'
        let Some(raw) = self.cursor.take_until(b'>') else {
            return Err(self.eof("'>'"));
        };
        self.cursor.advance();

        if self.current == NodeId::ROOT {
            return Err(Error::at(ErrorKind::UnexpectedEndTag, start));
        }

        let found = raw.trim();
        let open = self.open_tag();
        if found != open {
            match self.config.end_tags {
                EndTagMode::Strict => {
                    return Err(Error::at(
                        ErrorKind::MismatchedEndTag {
                            expected: open.to_string(),
                            found: found.to_string(),
                        },
                        start,
                    ));
                }
                EndTagMode::Lenient => {
                    warn!(expected = open, found, "end tag does not match open element");
                }
            }
        }

        debug!(tag = found, "closed element");
        self.close_current();
        Ok(())
    }

    fn skip_processing_instruction(&mut self) -> Result<()> {
        // cursor currently at '?'
        self.cursor.advance();
        if !self.cursor.skip_past(b"?>") {
            return Err(self.eof("'?>'"));
        }
        debug!("skipped processing instruction");
        Ok(())
    }

    fn skip_comment(&mut self) -> Result<()> {
        // cursor currently at '!--'
        self.cursor.advance_by(3);
        if !self.cursor.skip_past(b"-->") {
            return Err(self.eof("'-->'"));
        }
        debug!("skipped comment");
        Ok(())
    }

    /// `<!DOCTYPE ...>` and similar declarations.
    ///
    /// A `<![CDATA[...]]>` section is dropped whole, so a `>` inside it does
    /// not end the skip.
    fn skip_declaration(&mut self) -> Result<()> {
        // cursor currently at '!'
        if self.cursor.starts_with(b"![CDATA[") {
            self.cursor.advance_by(8);
            if !self.cursor.skip_past(b"]]>") {
                return Err(self.eof("']]>'"));
            }
            debug!("skipped CDATA section");
            return Ok(());
        }
        if !self.cursor.skip_past(b">") {
            return Err(self.eof("'>'"));
        }
        debug!("skipped declaration");
        Ok(())
    }

    /// Pop the innermost open element back to its parent
    fn close_current(&mut self) {
        self.current = self
            .doc
            .data(self.current)
            .and_then(|node| node.parent)
            .unwrap_or(NodeId::ROOT);
        self.depth = self.depth.saturating_sub(1);
    }

    fn open_tag(&self) -> &str {
        self.doc
            .data(self.current)
            .map(|node| node.tag.as_str())
            .unwrap_or_default()
    }

    fn finish(self) -> Result<Document> {
        if self.current != NodeId::ROOT {
            let tag = self.open_tag().to_string();
            if !self.config.allow_unclosed {
                return Err(Error::at(
                    ErrorKind::UnclosedElement { tag },
                    self.cursor.position(),
                ));
            }
            warn!(tag = %tag, depth = self.depth, "input ended with open elements");
        }
        debug!(nodes = self.doc.node_count(), "parsing completed");
        Ok(self.doc)
    }

    fn eof(&self, expected: &'static str) -> Error {
        Error::at(ErrorKind::UnexpectedEof { expected }, self.cursor.position())
    }

    fn unexpected(&self, expected: &'static str) -> Error {
        match self.cursor.current() {
            None => self.eof(expected),
            Some(b) => Error::at(
                ErrorKind::Expected {
                    expected,
                    found: char::from(b),
                },
                self.cursor.position(),
            ),
        }
    }
}
