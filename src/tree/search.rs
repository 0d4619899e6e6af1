//! Pre-order search over a node's subtree.
//!
//! Every query accepts anything convertible into a [`NodeMatch`]: a `&str`
//! key, a [`NodeKind`], or a `(key, parameter)` pair.

use super::kind::NodeKind;
use super::node::RtfNode;
use super::node_list::NodeList;
use crate::error::RtfResult;

/// A node predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeMatch<'a> {
    /// Key equality.
    Key(&'a str),
    /// Kind equality.
    Kind(NodeKind),
    /// Key equality and a parameter equal to the given value. Nodes without
    /// a parameter never match.
    KeyParameter(&'a str, i32),
}

impl NodeMatch<'_> {
    pub fn matches(&self, node: &RtfNode) -> bool {
        match *self {
            NodeMatch::Key(key) => node.key_is(key),
            NodeMatch::Kind(kind) => node.kind() == kind,
            NodeMatch::KeyParameter(key, parameter) => {
                node.key_is(key) && node.param() == Some(parameter)
            }
        }
    }
}

impl<'a> From<&'a str> for NodeMatch<'a> {
    fn from(key: &'a str) -> Self {
        NodeMatch::Key(key)
    }
}

impl From<NodeKind> for NodeMatch<'_> {
    fn from(kind: NodeKind) -> Self {
        NodeMatch::Kind(kind)
    }
}

impl<'a> From<(&'a str, i32)> for NodeMatch<'a> {
    fn from((key, parameter): (&'a str, i32)) -> Self {
        NodeMatch::KeyParameter(key, parameter)
    }
}

impl RtfNode {
    /// First direct child matching `pred`.
    pub fn select_single_child_node<'a>(&self, pred: impl Into<NodeMatch<'a>>) -> Option<RtfNode> {
        let pred = pred.into();
        self.children().iter().find(|child| pred.matches(child)).cloned()
    }

    /// First match in document order anywhere below `self`.
    pub fn select_single_node<'a>(&self, pred: impl Into<NodeMatch<'a>>) -> Option<RtfNode> {
        find_first(self, &pred.into())
    }

    /// Every match below `self`, in document order.
    pub fn select_nodes<'a>(&self, pred: impl Into<NodeMatch<'a>>) -> NodeList {
        collect_matches(self, &pred.into())
    }

    /// Every matching direct child, in order.
    pub fn select_child_nodes<'a>(&self, pred: impl Into<NodeMatch<'a>>) -> NodeList {
        let pred = pred.into();
        self.children()
            .iter()
            .filter(|child| pred.matches(child))
            .cloned()
            .collect()
    }

    /// First later sibling matching `pred`, scanning forward only.
    pub fn select_sibling<'a>(&self, pred: impl Into<NodeMatch<'a>>) -> RtfResult<Option<RtfNode>> {
        let pred = pred.into();
        let siblings = self.sibling_list()?;
        let Some(start) = siblings.index_of(self) else {
            return Ok(None);
        };
        let nodes = siblings.borrow();
        Ok(nodes[start + 1..]
            .iter()
            .find(|sibling| pred.matches(sibling))
            .cloned())
    }

    /// First direct child with the given key.
    pub fn child_by_key(&self, key: &str) -> Option<RtfNode> {
        self.select_single_child_node(key)
    }
}

fn find_first(node: &RtfNode, pred: &NodeMatch<'_>) -> Option<RtfNode> {
    for child in node.children().iter() {
        if pred.matches(child) {
            return Some(child.clone());
        }
        if let Some(found) = find_first(child, pred) {
            return Some(found);
        }
    }
    None
}

fn collect_matches(node: &RtfNode, pred: &NodeMatch<'_>) -> NodeList {
    let found = NodeList::new();
    for child in node.children().iter() {
        if pred.matches(child) {
            found.push(child.clone());
        }
        found.extend_from(&collect_matches(child, pred));
    }
    found
}
