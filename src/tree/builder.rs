//! Token stream → tree construction.

use super::document::DocumentTree;
use super::kind::NodeKind;
use super::node::RtfNode;
use super::options::LoadOptions;
use crate::encoding::{decode_bytes, encoding_for_codepage};
use crate::error::{RtfError, RtfResult};
use crate::parser::{Token, TokenKind};

/// Incremental tree builder fed one token at a time.
pub(crate) struct TreeBuilder {
    tree: DocumentTree,
    current: RtfNode,
    depth: usize,
    merge_special_characters: bool,
    fixed_encoding: bool,
    /// `\'xx` bytes waiting to be decoded into text.
    pending: Vec<u8>,
    tokens: usize,
    nodes: usize,
}

impl TreeBuilder {
    pub(crate) fn new(options: &LoadOptions) -> Self {
        let tree = match options.encoding {
            Some(encoding) => DocumentTree::with_encoding(encoding),
            None => DocumentTree::new(),
        };
        tracing::debug!(
            merge_special_characters = options.merge_special_characters,
            encoding = tree.encoding().name(),
            "building RTF tree"
        );
        Self {
            current: tree.root(),
            tree,
            depth: 0,
            merge_special_characters: options.merge_special_characters,
            fixed_encoding: options.encoding.is_some(),
            pending: Vec::new(),
            tokens: 0,
            nodes: 0,
        }
    }

    pub(crate) fn push(&mut self, token: Token) -> RtfResult<()> {
        self.tokens += 1;

        let is_hex_escape = token.kind == TokenKind::Control && token.key.as_str() == "'";
        if self.merge_special_characters && is_hex_escape {
            if let Some(byte) = token.param().and_then(|p| u8::try_from(p).ok()) {
                self.pending.push(byte);
                return Ok(());
            }
        }
        self.flush_pending();

        match token.kind {
            TokenKind::GroupStart => {
                let group = RtfNode::group();
                self.append(group.clone());
                self.current = group;
                self.depth += 1;
                tracing::trace!(depth = self.depth, "open group");
            }
            TokenKind::GroupEnd => {
                if self.depth == 0 {
                    return Err(RtfError::UnbalancedGroup {
                        offset: token.offset,
                    });
                }
                self.current = self.current.parent().ok_or(RtfError::UnbalancedGroup {
                    offset: token.offset,
                })?;
                self.depth -= 1;
                tracing::trace!(depth = self.depth, "close group");
            }
            TokenKind::Text => self.append_text(&token.key),
            TokenKind::Keyword | TokenKind::Control => {
                if token.kind == TokenKind::Keyword && token.key.as_str() == "ansicpg" {
                    self.apply_codepage(token.param());
                }
                if let Some(node) = RtfNode::from_token(&token) {
                    self.append(node);
                }
            }
        }
        Ok(())
    }

    pub(crate) fn finish(mut self) -> DocumentTree {
        self.flush_pending();
        if self.depth > 0 {
            tracing::warn!(open = self.depth, "unterminated groups closed at end of input");
        }
        if self.tree.root().child_count() > 1 {
            tracing::warn!(
                top_level = self.tree.root().child_count(),
                "content found outside the top-level group"
            );
        }
        tracing::debug!(tokens = self.tokens, nodes = self.nodes, "finished RTF tree");
        self.tree
    }

    fn append(&mut self, node: RtfNode) {
        self.nodes += 1;
        self.current.append_child(node);
    }

    /// Adjacent text merges into one node.
    fn append_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        match self.current.last_child() {
            Some(last) if last.kind() == NodeKind::Text => {
                let merged = format!("{}{text}", &*last.key());
                last.set_key(merged);
            }
            _ => self.append(RtfNode::text(text)),
        }
    }

    fn flush_pending(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let bytes = std::mem::take(&mut self.pending);
        let Some(text) = decode_bytes(&bytes, self.tree.encoding()) else {
            tracing::debug!(
                bytes = bytes.len(),
                encoding = self.tree.encoding().name(),
                "malformed byte run kept as hex escapes"
            );
            for byte in bytes {
                self.append(RtfNode::control("'", Some(i32::from(byte))));
            }
            return;
        };

        // Decoded `\`, `{` and `}` would be written back unescaped.
        let mut rest = text.as_str();
        while let Some(at) = rest.find(['\\', '{', '}']) {
            self.append_text(&rest[..at]);
            let symbol = &rest[at..at + 1];
            self.append(RtfNode::control(symbol, None));
            rest = &rest[at + 1..];
        }
        self.append_text(rest);
    }

    fn apply_codepage(&mut self, codepage: Option<i32>) {
        if self.fixed_encoding {
            return;
        }
        let Some(codepage) = codepage else {
            return;
        };
        match encoding_for_codepage(codepage) {
            Some(encoding) => {
                tracing::debug!(codepage, encoding = encoding.name(), "document code page");
                self.tree.set_encoding(encoding);
            }
            None => tracing::warn!(codepage, "unknown code page, keeping current encoding"),
        }
    }
}
