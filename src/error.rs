//! Error types for tree construction, navigation and serialization.

use text_size::TextSize;
use thiserror::Error;

/// Errors raised by the RTF tree.
///
/// Structural failures (`OutOfRange`, `NoParent`) are always surfaced to the
/// caller. The tolerant attach operations (`append_child`, `insert_child`)
/// never produce an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RtfError {
    /// A child index that does not name an existing position.
    #[error("child index {index} out of range (node has {len} children)")]
    OutOfRange { index: usize, len: usize },

    /// A sibling operation on a node that is not attached to a parent.
    #[error("node has no parent")]
    NoParent,

    /// A character that the tree encoding cannot represent.
    #[error("character {ch:?} cannot be encoded as {encoding}")]
    Unencodable { ch: char, encoding: &'static str },

    /// A `\'` control whose parameter is not a byte value (0 to 255).
    #[error("hex escape parameter {value} is not a byte")]
    InvalidByte { value: i32 },

    /// Malformed input at the tokenizer level.
    #[error("lex error at offset {}: {message}", u32::from(*offset))]
    Lex { offset: TextSize, message: String },

    /// A group end with no matching group start.
    #[error("unbalanced group end at offset {}", u32::from(*offset))]
    UnbalancedGroup { offset: TextSize },
}

impl RtfError {
    /// Create an out-of-range error for a child list of length `len`.
    pub fn out_of_range(index: usize, len: usize) -> Self {
        Self::OutOfRange { index, len }
    }

    /// Create a lexer error.
    pub fn lex(offset: TextSize, message: impl Into<String>) -> Self {
        Self::Lex {
            offset,
            message: message.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type RtfResult<T> = Result<T, RtfError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            RtfError::out_of_range(5, 2).to_string(),
            "child index 5 out of range (node has 2 children)"
        );
        assert_eq!(RtfError::NoParent.to_string(), "node has no parent");
        assert_eq!(
            RtfError::lex(TextSize::from(7), "dangling backslash").to_string(),
            "lex error at offset 7: dangling backslash"
        );
    }
}
