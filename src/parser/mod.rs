//! RTF tokenizer
//!
//! The lexer is the only producer of [`Token`]s inside this crate; trees can
//! equally be built from a token stream produced elsewhere (see
//! [`DocumentTree::from_tokens`](crate::tree::DocumentTree::from_tokens)).

mod lexer;
mod token;

pub use lexer::{Lexer, tokenize};
pub use token::{Token, TokenKind};
