//! Shared tree fixtures for the integration tests.

#![allow(dead_code)]

use rtftree::{DocumentTree, RtfNode};

/// A small but complete document.
pub const HELLO_DOCUMENT: &str = r"{\rtf1\ansi\ansicpg1252\deff0{\fonttbl{\f0 Arial;}}\f0\fs24 Hello \b world\b0 !\par}";

/// `Root → Group → [\rtf1, "Hello"]`
pub fn hello_tree() -> DocumentTree {
    let tree = DocumentTree::new();
    let group = RtfNode::group();
    group.append_child(RtfNode::keyword("rtf", Some(1)));
    group.append_child(RtfNode::text("Hello"));
    tree.root().append_child(group);
    tree
}

/// A group with `\b` at depth one, two and three, separated by text.
///
/// ```text
/// {\b one{\i\b two{\b three}}}
/// ```
pub fn nested_bold_tree() -> DocumentTree {
    let tree = DocumentTree::new();
    let top = RtfNode::group();
    top.append_child(RtfNode::keyword("b", None));
    top.append_child(RtfNode::text("one"));

    let middle = RtfNode::group();
    middle.append_child(RtfNode::keyword("i", None));
    middle.append_child(RtfNode::keyword("b", None));
    middle.append_child(RtfNode::text("two"));

    let inner = RtfNode::group();
    inner.append_child(RtfNode::keyword("b", None));
    inner.append_child(RtfNode::text("three"));

    middle.append_child(inner);
    top.append_child(middle);
    tree.root().append_child(top);
    tree
}

/// Keys of a node's direct children.
pub fn child_keys(node: &RtfNode) -> Vec<String> {
    node.child_nodes().iter().map(|n| n.key().to_string()).collect()
}

/// Every node below `node`, pre-order.
pub fn preorder(node: &RtfNode) -> Vec<RtfNode> {
    let mut out = Vec::new();
    for child in node.child_nodes().iter() {
        out.push(child.clone());
        out.extend(preorder(&child));
    }
    out
}
