//! Parser configuration

/// How end-tag names are checked against the element they close
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EndTagMode {
    /// Any end tag closes the innermost open element
    #[default]
    Lenient,
    /// The end-tag name must equal the innermost open element's tag
    Strict,
}

/// Configuration for the parser
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Maximum element nesting depth (0 means unlimited)
    pub max_depth: u16,
    /// Maximum input size in bytes (0 means unlimited)
    pub max_size: usize,
    pub end_tags: EndTagMode,
    /// Keep elements still open at end of input instead of failing
    pub allow_unclosed: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_depth: 256,
            max_size: 10 * 1024 * 1024, // 10 MB default
            end_tags: EndTagMode::Lenient,
            allow_unclosed: false,
        }
    }
}

impl Config {
    /// Create a new config with unlimited depth and size
    pub const fn unlimited() -> Self {
        Self {
            max_depth: 0,
            max_size: 0,
            end_tags: EndTagMode::Lenient,
            allow_unclosed: false,
        }
    }

    /// Create a new config with specific limits
    pub const fn new(max_depth: u16, max_size: usize) -> Self {
        Self {
            max_depth,
            max_size,
            end_tags: EndTagMode::Lenient,
            allow_unclosed: false,
        }
    }

    pub const fn with_end_tags(mut self, mode: EndTagMode) -> Self {
        self.end_tags = mode;
        self
    }

    pub const fn with_allow_unclosed(mut self, allow: bool) -> Self {
        self.allow_unclosed = allow;
        self
    }

    pub const fn with_max_depth(mut self, max_depth: u16) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub const fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }

    pub(crate) fn depth_exceeded(&self, depth: usize) -> bool {
        self.max_depth != 0 && depth > usize::from(self.max_depth)
    }

    pub(crate) fn size_exceeded(&self, size: usize) -> bool {
        self.max_size != 0 && size > self.max_size
    }
}
