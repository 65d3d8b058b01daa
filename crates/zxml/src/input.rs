//! Input abstraction for different sources

use crate::error::{Error, ErrorKind, Pos, Result};

/// A complete text buffer handed to the parser
#[derive(Clone, Debug)]
pub struct Input<'a> {
    source: &'a [u8],
    filename: Option<&'a str>,
}

impl<'a> Input<'a> {
    /// Create from byte slice
    pub const fn from_bytes(source: &'a [u8]) -> Self {
        Self {
            source,
            filename: None,
        }
    }

    /// Create from string
    pub const fn from_str(source: &'a str) -> Self {
        Self {
            source: source.as_bytes(),
            filename: None,
        }
    }

    /// Set filename for diagnostics
    pub const fn with_filename(mut self, filename: &'a str) -> Self {
        self.filename = Some(filename);
        self
    }

    pub const fn as_bytes(&self) -> &'a [u8] {
        self.source
    }

    /// Borrow the buffer as text, rejecting invalid UTF-8 at the first bad byte
    pub fn as_str(&self) -> Result<&'a str> {
        std::str::from_utf8(self.source).map_err(|e| {
            let offset = e.valid_up_to();
            let consumed = self.source.get(..offset).unwrap_or_default();
            let line = consumed.iter().filter(|&&b| b == b'\n').count() + 1;
            let col = consumed.iter().rev().take_while(|&&b| b != b'\n').count() + 1;
            Error::at(
                ErrorKind::InvalidUtf8,
                Pos::new(
                    offset,
                    u32::try_from(line).unwrap_or(u32::MAX),
                    u32::try_from(col).unwrap_or(u32::MAX),
                ),
            )
        })
    }

    pub const fn filename(&self) -> Option<&'a str> {
        self.filename
    }

    /// Get length in bytes
    pub const fn len(&self) -> usize {
        self.source.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.source.is_empty()
    }
}

impl<'a> From<&'a str> for Input<'a> {
    fn from(s: &'a str) -> Self {
        Self::from_str(s)
    }
}

impl<'a> From<&'a [u8]> for Input<'a> {
    fn from(b: &'a [u8]) -> Self {
        Self::from_bytes(b)
    }
}
