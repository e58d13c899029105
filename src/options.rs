use crate::constants::{DEFAULT_CAPACITY, DEFAULT_INDENT, DEFAULT_MAX_DEPTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    Spaces(usize),
}

impl Indent {
    pub fn spaces(count: usize) -> Self {
        Indent::Spaces(count)
    }

    pub fn get_spaces(self) -> usize {
        let Indent::Spaces(count) = self;
        count
    }

    pub fn is_compact(self) -> bool {
        self.get_spaces() == 0
    }
}

impl Default for Indent {
    fn default() -> Self {
        Indent::Spaces(DEFAULT_INDENT)
    }
}

/// Rendering settings.
///
/// By default a backslash in a string and the character after it are written
/// unchanged, which matches strings kept verbatim by the parser. Set
/// `escape_backslashes` when strings hold decoded text.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub indent: Indent,
    pub escape_backslashes: bool,
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_indent(mut self, indent: Indent) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_escape_backslashes(mut self, escape_backslashes: bool) -> Self {
        self.escape_backslashes = escape_backslashes;
        self
    }
}

#[derive(Debug, Clone)]
pub struct ParseOptions {
    pub max_depth: usize,
    pub object_capacity: usize,
    pub decode_escapes: bool,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_object_capacity(mut self, object_capacity: usize) -> Self {
        self.object_capacity = object_capacity;
        self
    }

    pub fn with_decode_escapes(mut self, decode_escapes: bool) -> Self {
        self.decode_escapes = decode_escapes;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            object_capacity: DEFAULT_CAPACITY,
            decode_escapes: false,
        }
    }
}
