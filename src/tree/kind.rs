//! Node kinds

use crate::parser::TokenKind;
use std::fmt;

/// The structural role of a tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeKind {
    /// Synthetic document root; renders nothing itself.
    Root,
    /// `{ ... }` scope.
    Group,
    /// `\word` with an optional numeric parameter.
    Keyword,
    /// `\` plus one character, `\'xx` carrying a byte.
    Control,
    /// Literal text.
    Text,
}

impl NodeKind {
    /// The node kind a token becomes, or `None` for a group end.
    pub fn from_token_kind(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::GroupStart => Some(Self::Group),
            TokenKind::GroupEnd => None,
            TokenKind::Keyword => Some(Self::Keyword),
            TokenKind::Control => Some(Self::Control),
            TokenKind::Text => Some(Self::Text),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Root => "Root",
            Self::Group => "Group",
            Self::Keyword => "Keyword",
            Self::Control => "Control",
            Self::Text => "Text",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
