//! zxml - single-pass tree builder for an XML-like markup dialect
//!
//! Parsing produces a [`Document`]: a synthetic `ROOT` node with every
//! element of the input below it. Query the tree by child index, by tag
//! name anywhere below a node, by `/`-separated path, or by attribute key.
//!
//! # Quick Start
//!
//! ```
//! use zxml::parse_text;
//! # fn main() -> Result<(), zxml::Error> {
//! let doc = parse_text(r#"<a><b>hi</b><c x="1"/></a>"#)?;
//! let b = doc.find_tag("b", true);
//! assert_eq!(b.and_then(|n| n.text()), Some("hi"));
//! let c = doc.find_by_path("a/c", true);
//! assert_eq!(c.and_then(|n| n.attr("x")), Some("1"));
//! assert_eq!(c, doc.find_tag("c", true));
//! # Ok(())
//! # }
//! ```
//!
//! Not supported: DTD validation, entity decoding, CDATA sections,
//! namespaces and serialization back to markup.

#![forbid(unsafe_code)]

use std::path::Path;

use tracing::{debug, info, instrument};

pub mod error;
pub use error::{Error, ErrorKind, Pos, Result, Span};

pub mod input;
pub use input::Input;

pub mod list;
pub use list::GrowList;

pub mod parser;
pub use parser::{Config, EndTagMode, Parser};

pub mod tree;
pub use tree::teardown::destroy;
pub use tree::{Attribute, Descendants, Document, Node, NodeId, Teardown, ROOT_TAG};
#[cfg(feature = "serde")]
pub use tree::MAX_SERIALIZE_DEPTH;

/// Parse markup from a string
pub fn parse_text(s: &str) -> Result<Document> {
    parse_text_with_config(s, Config::default())
}

/// Parse markup from a string with custom configuration
pub fn parse_text_with_config(s: &str, config: Config) -> Result<Document> {
    parse_input(Input::from_str(s), config)
}

/// Parse markup from UTF-8 bytes
pub fn parse_bytes(bytes: &[u8]) -> Result<Document> {
    parse_bytes_with_config(bytes, Config::default())
}

pub fn parse_bytes_with_config(bytes: &[u8], config: Config) -> Result<Document> {
    parse_input(Input::from_bytes(bytes), config)
}

/// Parse any [`Input`]
pub fn parse_input(input: Input<'_>, config: Config) -> Result<Document> {
    if let Some(name) = input.filename() {
        debug!(file = name, bytes = input.len(), "parsing input");
    }
    Parser::with_config(input.as_str()?, config).parse()
}

/// Read a whole file into memory and parse it.
///
/// The buffer is released before returning, whether parsing succeeded or not.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Document> {
    parse_file_with_config(path, Config::default())
}

#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn parse_file_with_config(path: impl AsRef<Path>, config: Config) -> Result<Document> {
    let path = path.as_ref();
    let display = path.display().to_string();
    debug!("Starting to parse file");

    let metadata = std::fs::metadata(path).map_err(|e| Error::io(display.as_str(), &e))?;
    let len = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
    if config.size_exceeded(len) {
        debug!(bytes = len, max = config.max_size, "file over size limit, not read");
        return Err(Error::at(
            ErrorKind::MaxSizeExceeded {
                max: config.max_size,
            },
            Pos::new(0, 1, 1),
        ));
    }

    let buffer = std::fs::read(path).map_err(|e| Error::io(display.as_str(), &e))?;
    info!(bytes = buffer.len(), "File read successfully");

    let result = parse_input(Input::from_bytes(&buffer).with_filename(&display), config);
    debug!(ok = result.is_ok(), "Parsing completed");
    result
}
