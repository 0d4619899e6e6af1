//! Flat token records consumed by the tree builder.

use smol_str::SmolStr;
use text_size::TextSize;

/// The role of a token in the flat stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenKind {
    /// `{`
    GroupStart,
    /// `}`
    GroupEnd,
    /// `\word` with an optional numeric parameter
    Keyword,
    /// `\` followed by a single non-letter character (`\'xx` carries the byte)
    Control,
    /// Literal text
    Text,
}

/// A token with its kind, key, optional parameter and source offset.
///
/// `parameter` is only meaningful when `has_parameter` is set. Tokens built
/// by hand (outside the [`Lexer`](super::Lexer)) carry offset zero unless
/// [`Token::at`] is used.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    pub kind: TokenKind,
    pub key: SmolStr,
    pub has_parameter: bool,
    pub parameter: i32,
    pub offset: TextSize,
}

impl Token {
    pub fn new(kind: TokenKind, key: impl Into<SmolStr>, has_parameter: bool, parameter: i32) -> Self {
        Self {
            kind,
            key: key.into(),
            has_parameter,
            parameter,
            offset: TextSize::new(0),
        }
    }

    pub fn group_start() -> Self {
        Self::new(TokenKind::GroupStart, "", false, 0)
    }

    pub fn group_end() -> Self {
        Self::new(TokenKind::GroupEnd, "", false, 0)
    }

    pub fn keyword(key: impl Into<SmolStr>, parameter: Option<i32>) -> Self {
        Self::new(
            TokenKind::Keyword,
            key,
            parameter.is_some(),
            parameter.unwrap_or_default(),
        )
    }

    pub fn control(key: impl Into<SmolStr>, parameter: Option<i32>) -> Self {
        Self::new(
            TokenKind::Control,
            key,
            parameter.is_some(),
            parameter.unwrap_or_default(),
        )
    }

    pub fn text(text: impl Into<SmolStr>) -> Self {
        Self::new(TokenKind::Text, text, false, 0)
    }

    /// Set the source offset of this token.
    pub fn at(mut self, offset: TextSize) -> Self {
        self.offset = offset;
        self
    }

    /// The parameter, if the token carries one.
    pub fn param(&self) -> Option<i32> {
        self.has_parameter.then_some(self.parameter)
    }
}
