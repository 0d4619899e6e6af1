//! Tree loading options

use encoding_rs::Encoding;

/// Options for building a [`DocumentTree`](super::DocumentTree).
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    /// Decode runs of `\'xx` escapes with the tree encoding and merge them
    /// into the surrounding text nodes instead of keeping Control nodes.
    pub merge_special_characters: bool,
    /// Encoding to use regardless of any `\ansicpg` keyword in the input.
    pub encoding: Option<&'static Encoding>,
}

impl LoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn merge_special_characters(mut self, merge: bool) -> Self {
        self.merge_special_characters = merge;
        self
    }

    pub fn with_encoding(mut self, encoding: &'static Encoding) -> Self {
        self.encoding = Some(encoding);
        self
    }
}
