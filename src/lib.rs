//! # rtftree-base
//!
//! Core library for RTF tokenizing, document trees, tree search and RTF
//! serialization.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! tree      → DocumentTree, RtfNode, NodeList, search, serializer
//!   ↓
//! parser    → Logos lexer, Token stream
//!   ↓
//! encoding  → Code page lookup, \'xx escapes
//!   ↓
//! error     → RtfError
//! ```

/// Error type shared by every module
pub mod error;

/// Code pages and byte escapes
pub mod encoding;

/// Parser: Logos lexer producing the flat token stream
pub mod parser;

/// Tree: nodes, navigation, mutation, search and serialization
pub mod tree;

pub use error::{RtfError, RtfResult};
pub use parser::{Lexer, Token, TokenKind, tokenize};
pub use tree::{DocumentTree, LoadOptions, NodeKind, NodeList, NodeMatch, RtfNode};

// Re-export so callers can name encodings without a direct dependency
pub use encoding_rs;
