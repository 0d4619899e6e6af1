//! Logos-based lexer for RTF
//!
//! Turns RTF source into a flat stream of [`Token`]s. Line breaks outside
//! control words are insignificant and skipped.

use super::token::{Token, TokenKind};
use crate::error::{RtfError, RtfResult};
use logos::Logos;
use text_size::TextSize;

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = RtfResult<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let text = self.inner.slice();
        let offset = TextSize::new(self.inner.span().start as u32);

        let token = match logos_token {
            Ok(t) => to_token(t, text, offset),
            Err(()) => Err(RtfError::lex(offset, describe_error(text))),
        };

        Some(token.map(|t| t.at(offset)))
    }
}

/// Tokenize an entire string, stopping at the first error.
pub fn tokenize(input: &str) -> RtfResult<Vec<Token>> {
    Lexer::new(input).collect()
}

/// Logos token enum - payloads are recovered from the slice in [`to_token`]
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[\r\n]+")]
enum LogosToken {
    #[token("{")]
    GroupStart,

    #[token("}")]
    GroupEnd,

    // The single trailing space is the keyword delimiter and is not content.
    #[regex(r"\\[a-zA-Z]+(-?[0-9]+)? ?")]
    Keyword,

    #[regex(r"\\'[0-9a-fA-F][0-9a-fA-F]")]
    HexControl,

    #[regex(r"\\\r?\n")]
    EscapedNewline,

    #[regex(r"\\[^a-zA-Z'\r\n]")]
    Control,

    #[regex(r"[^\\{}\r\n]+")]
    Text,
}

fn to_token(token: LogosToken, text: &str, offset: TextSize) -> RtfResult<Token> {
    match token {
        LogosToken::GroupStart => Ok(Token::group_start()),
        LogosToken::GroupEnd => Ok(Token::group_end()),
        LogosToken::Keyword => {
            let body = text[1..].strip_suffix(' ').unwrap_or(&text[1..]);
            let split = body
                .find(|c: char| c == '-' || c.is_ascii_digit())
                .unwrap_or(body.len());
            let (name, digits) = body.split_at(split);
            if digits.is_empty() {
                return Ok(Token::keyword(name, None));
            }
            let parameter = digits.parse::<i32>().map_err(|_| {
                RtfError::lex(offset, format!("parameter {digits} of \\{name} is out of range"))
            })?;
            Ok(Token::keyword(name, Some(parameter)))
        }
        LogosToken::HexControl => {
            let byte = u8::from_str_radix(&text[2..4], 16)
                .map_err(|_| RtfError::lex(offset, format!("invalid hex escape {text}")))?;
            Ok(Token::control("'", Some(i32::from(byte))))
        }
        // A backslash before a line break is an alias for \par.
        LogosToken::EscapedNewline => Ok(Token::keyword("par", None)),
        LogosToken::Control => Ok(Token::new(TokenKind::Control, &text[1..], false, 0)),
        LogosToken::Text => Ok(Token::text(text)),
    }
}

fn describe_error(text: &str) -> String {
    if text.starts_with("\\'") {
        "expected two hex digits after \\'".to_string()
    } else if text == "\\" {
        "dangling backslash".to_string()
    } else {
        format!("unexpected input {text:?}")
    }
}
