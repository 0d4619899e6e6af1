//! The document tree: owner of the synthetic root and of the encoding.

use super::builder::TreeBuilder;
use super::kind::NodeKind;
use super::node::RtfNode;
use super::options::LoadOptions;
use crate::encoding::default_encoding;
use crate::error::RtfResult;
use crate::parser::{Lexer, Token};
use encoding_rs::Encoding;
use std::cell::Cell;
use std::fmt;
use std::rc::{Rc, Weak};

/// An RTF document as a tree of [`RtfNode`]s.
///
/// The tree owns a synthetic [`NodeKind::Root`] node whose single child (for
/// well-formed input) is the top-level group. `DocumentTree` is a handle;
/// clones refer to the same tree.
#[derive(Clone)]
pub struct DocumentTree(pub(crate) Rc<TreeData>);

pub(crate) struct TreeData {
    root: RtfNode,
    encoding: Cell<&'static Encoding>,
}

impl DocumentTree {
    /// An empty tree (root only) using the default encoding.
    pub fn new() -> Self {
        Self::with_encoding(default_encoding())
    }

    pub fn with_encoding(encoding: &'static Encoding) -> Self {
        let data = Rc::new_cyclic(|tree: &Weak<TreeData>| {
            let root = RtfNode::new(NodeKind::Root);
            *root.0.root.borrow_mut() = Rc::downgrade(&root.0);
            *root.0.tree.borrow_mut() = tree.clone();
            TreeData {
                root,
                encoding: Cell::new(encoding),
            }
        });
        Self(data)
    }

    /// Tokenize and build `text` with default options.
    pub fn parse(text: &str) -> RtfResult<Self> {
        Self::parse_with(text, &LoadOptions::default())
    }

    pub fn parse_with(text: &str, options: &LoadOptions) -> RtfResult<Self> {
        let mut builder = TreeBuilder::new(options);
        for token in Lexer::new(text) {
            builder.push(token?)?;
        }
        Ok(builder.finish())
    }

    /// Build a tree from a token stream produced elsewhere.
    pub fn from_tokens<I>(tokens: I, options: &LoadOptions) -> RtfResult<Self>
    where
        I: IntoIterator<Item = Token>,
    {
        let mut builder = TreeBuilder::new(options);
        for token in tokens {
            builder.push(token)?;
        }
        Ok(builder.finish())
    }

    /// The synthetic root node.
    pub fn root(&self) -> RtfNode {
        self.0.root.clone()
    }

    /// The top-level group, i.e. the real document root.
    pub fn main_group(&self) -> Option<RtfNode> {
        self.0.root.select_single_child_node(NodeKind::Group)
    }

    pub fn encoding(&self) -> &'static Encoding {
        self.0.encoding.get()
    }

    pub fn set_encoding(&self, encoding: &'static Encoding) {
        self.0.encoding.set(encoding);
    }

    /// Render the whole document.
    pub fn to_rtf(&self) -> RtfResult<String> {
        self.0.root.to_rtf_with(self.encoding())
    }

    pub fn ptr_eq(&self, other: &DocumentTree) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Default for DocumentTree {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DocumentTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentTree")
            .field("encoding", &self.encoding().name())
            .field("root", &self.0.root)
            .finish()
    }
}

/// Indented dump of the tree, one node per line.
impl fmt::Display for DocumentTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_outline(f, &self.0.root, 0)
    }
}

fn write_outline(f: &mut fmt::Formatter<'_>, node: &RtfNode, depth: usize) -> fmt::Result {
    let indent = "  ".repeat(depth);
    match node.kind() {
        NodeKind::Root | NodeKind::Group => writeln!(f, "{indent}{}", node.kind())?,
        kind => match node.param() {
            Some(parameter) => writeln!(f, "{indent}{kind}: {} {parameter}", &*node.key())?,
            None => writeln!(f, "{indent}{kind}: {}", &*node.key())?,
        },
    }
    for child in node.children().iter() {
        write_outline(f, child, depth + 1)?;
    }
    Ok(())
}
