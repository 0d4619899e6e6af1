//! Tree nodes: construction, attach/detach, cloning and navigation.
//!
//! Ownership runs strictly from parent to children. The `parent`, document
//! root and owning tree links are [`Weak`] and never keep anything alive.

use super::document::{DocumentTree, TreeData};
use super::kind::NodeKind;
use super::node_list::NodeList;
use crate::error::{RtfError, RtfResult};
use crate::parser::Token;
use smol_str::SmolStr;
use std::cell::{Cell, Ref, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

/// A handle to a node of an RTF document tree.
///
/// Cloning an `RtfNode` clones the handle, not the node; use
/// [`clone_node`](Self::clone_node) to copy a node. Equality is identity.
#[derive(Clone)]
pub struct RtfNode(pub(crate) Rc<NodeData>);

pub(crate) struct NodeData {
    kind: Cell<NodeKind>,
    key: RefCell<SmolStr>,
    has_parameter: Cell<bool>,
    parameter: Cell<i32>,
    children: NodeList,
    parent: RefCell<Weak<NodeData>>,
    pub(crate) root: RefCell<Weak<NodeData>>,
    pub(crate) tree: RefCell<Weak<TreeData>>,
}

impl RtfNode {
    // ========================================================================
    // Construction
    // ========================================================================

    /// A detached node of the given kind with an empty key.
    pub fn new(kind: NodeKind) -> Self {
        Self::from_parts(kind, "", false, 0)
    }

    pub fn from_parts(
        kind: NodeKind,
        key: impl Into<SmolStr>,
        has_parameter: bool,
        parameter: i32,
    ) -> Self {
        Self::with_children(kind, key.into(), has_parameter, parameter, NodeList::new())
    }

    fn with_children(
        kind: NodeKind,
        key: SmolStr,
        has_parameter: bool,
        parameter: i32,
        children: NodeList,
    ) -> Self {
        Self(Rc::new(NodeData {
            kind: Cell::new(kind),
            key: RefCell::new(key),
            has_parameter: Cell::new(has_parameter),
            parameter: Cell::new(parameter),
            children,
            parent: RefCell::new(Weak::new()),
            root: RefCell::new(Weak::new()),
            tree: RefCell::new(Weak::new()),
        }))
    }

    pub fn group() -> Self {
        Self::new(NodeKind::Group)
    }

    pub fn keyword(key: impl Into<SmolStr>, parameter: Option<i32>) -> Self {
        Self::from_parts(
            NodeKind::Keyword,
            key,
            parameter.is_some(),
            parameter.unwrap_or_default(),
        )
    }

    /// A control symbol. Only the `'` control renders its parameter, which
    /// must then be a byte value; anything else fails at serialization.
    pub fn control(key: impl Into<SmolStr>, parameter: Option<i32>) -> Self {
        Self::from_parts(
            NodeKind::Control,
            key,
            parameter.is_some(),
            parameter.unwrap_or_default(),
        )
    }

    pub fn text(text: impl Into<SmolStr>) -> Self {
        Self::from_parts(NodeKind::Text, text, false, 0)
    }

    /// The node a token becomes; group ends have no node.
    pub fn from_token(token: &Token) -> Option<Self> {
        let kind = NodeKind::from_token_kind(token.kind)?;
        Some(Self::from_parts(
            kind,
            token.key.clone(),
            token.has_parameter,
            token.parameter,
        ))
    }

    // ========================================================================
    // Fields
    // ========================================================================

    pub fn kind(&self) -> NodeKind {
        self.0.kind.get()
    }

    pub fn set_kind(&self, kind: NodeKind) {
        self.0.kind.set(kind);
    }

    /// Keyword name, control character or literal text.
    pub fn key(&self) -> Ref<'_, str> {
        Ref::map(self.0.key.borrow(), |key| key.as_str())
    }

    pub fn set_key(&self, key: impl Into<SmolStr>) {
        *self.0.key.borrow_mut() = key.into();
    }

    pub fn has_parameter(&self) -> bool {
        self.0.has_parameter.get()
    }

    pub fn set_has_parameter(&self, has_parameter: bool) {
        self.0.has_parameter.set(has_parameter);
    }

    /// Raw parameter value; only meaningful when [`has_parameter`](Self::has_parameter) is set.
    pub fn parameter(&self) -> i32 {
        self.0.parameter.get()
    }

    pub fn set_parameter(&self, parameter: i32) {
        self.0.parameter.set(parameter);
    }

    /// The parameter, if the node carries one.
    pub fn param(&self) -> Option<i32> {
        self.has_parameter().then(|| self.parameter())
    }

    pub(crate) fn key_is(&self, key: &str) -> bool {
        self.0.key.borrow().as_str() == key
    }

    // ========================================================================
    // Links
    // ========================================================================

    pub fn parent(&self) -> Option<RtfNode> {
        self.0.parent.borrow().upgrade().map(RtfNode)
    }

    /// The synthetic root of the tree this node was last attached into.
    pub fn root_node(&self) -> Option<RtfNode> {
        self.0.root.borrow().upgrade().map(RtfNode)
    }

    /// The tree this node was last attached into.
    pub fn tree(&self) -> Option<DocumentTree> {
        self.0.tree.borrow().upgrade().map(DocumentTree)
    }

    /// The child list handle. Mutating it directly bypasses back-reference
    /// propagation; prefer [`append_child`](Self::append_child).
    pub fn child_nodes(&self) -> NodeList {
        self.0.children.clone()
    }

    pub(crate) fn children(&self) -> Ref<'_, Vec<RtfNode>> {
        self.0.children.borrow()
    }

    /// Identity comparison.
    pub fn ptr_eq(&self, other: &RtfNode) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Append `node` as the last child. `None` is a no-op.
    ///
    /// The node's parent becomes `self` and the document root and owning tree
    /// of `self` are copied into the node's whole subtree.
    pub fn append_child(&self, node: impl Into<Option<RtfNode>>) {
        if let Some(node) = node.into() {
            self.attach(&node);
            self.0.children.push(node);
        }
    }

    /// Insert `node` at `index` in `[0, child_count]`. A `None` node or an
    /// index past the end is silently ignored.
    pub fn insert_child(&self, index: usize, node: impl Into<Option<RtfNode>>) {
        let Some(node) = node.into() else {
            return;
        };
        if index > self.0.children.len() {
            return;
        }
        self.attach(&node);
        self.0.children.insert(index, node);
    }

    /// Remove and return the child at `index`.
    ///
    /// The removed subtree keeps its parent, root and tree links.
    pub fn remove_child_at(&self, index: usize) -> RtfResult<RtfNode> {
        let len = self.0.children.len();
        self.0
            .children
            .remove(index)
            .ok_or_else(|| RtfError::out_of_range(index, len))
    }

    /// Remove `node` from the direct children of `self`.
    pub fn remove_child(&self, node: &RtfNode) -> RtfResult<()> {
        let len = self.0.children.len();
        let index = self
            .0
            .children
            .index_of(node)
            .ok_or_else(|| RtfError::out_of_range(len, len))?;
        self.remove_child_at(index).map(|_| ())
    }

    fn attach(&self, node: &RtfNode) {
        *node.0.parent.borrow_mut() = Rc::downgrade(&self.0);
        let root = self.0.root.borrow().clone();
        let tree = self.0.tree.borrow().clone();
        propagate_links(node, &root, &tree);
    }

    /// Copy this node.
    ///
    /// The copy has the same kind, key, parameter, parent, document root and
    /// owning tree, but is not a child of anything.
    ///
    /// With `clone_children == false` the copy **shares this node's child
    /// list**: appending to or removing from either node's children is seen
    /// by both. Callers rely on this; it is not an accident of the
    /// implementation. With `clone_children == true` the whole subtree is
    /// copied and the copied children are parented to the copy.
    pub fn clone_node(&self, clone_children: bool) -> RtfNode {
        let children = if clone_children {
            NodeList::new()
        } else {
            self.0.children.clone()
        };
        let copy = Self::with_children(
            self.kind(),
            self.0.key.borrow().clone(),
            self.has_parameter(),
            self.parameter(),
            children,
        );
        *copy.0.parent.borrow_mut() = self.0.parent.borrow().clone();
        *copy.0.root.borrow_mut() = self.0.root.borrow().clone();
        *copy.0.tree.borrow_mut() = self.0.tree.borrow().clone();

        if clone_children {
            for child in self.children().iter() {
                let child_copy = child.clone_node(true);
                *child_copy.0.parent.borrow_mut() = Rc::downgrade(&copy.0);
                copy.0.children.push(child_copy);
            }
        }
        copy
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    pub fn has_child_nodes(&self) -> bool {
        !self.0.children.is_empty()
    }

    pub fn child_count(&self) -> usize {
        self.0.children.len()
    }

    pub fn child(&self, index: usize) -> Option<RtfNode> {
        self.0.children.get(index)
    }

    pub fn first_child(&self) -> Option<RtfNode> {
        self.0.children.first()
    }

    pub fn last_child(&self) -> Option<RtfNode> {
        self.0.children.last()
    }

    /// The sibling after this node, `Ok(None)` if this is the last child.
    pub fn next_sibling(&self) -> RtfResult<Option<RtfNode>> {
        let siblings = self.sibling_list()?;
        Ok(siblings
            .index_of(self)
            .and_then(|index| siblings.get(index + 1)))
    }

    /// The sibling before this node, `Ok(None)` if this is the first child.
    pub fn previous_sibling(&self) -> RtfResult<Option<RtfNode>> {
        let siblings = self.sibling_list()?;
        Ok(siblings
            .index_of(self)
            .and_then(|index| index.checked_sub(1))
            .and_then(|index| siblings.get(index)))
    }

    pub(crate) fn sibling_list(&self) -> RtfResult<NodeList> {
        self.parent()
            .map(|parent| parent.child_nodes())
            .ok_or(RtfError::NoParent)
    }
}

fn propagate_links(node: &RtfNode, root: &Weak<NodeData>, tree: &Weak<TreeData>) {
    *node.0.root.borrow_mut() = root.clone();
    *node.0.tree.borrow_mut() = tree.clone();
    for child in node.children().iter() {
        propagate_links(child, root, tree);
    }
}

impl PartialEq for RtfNode {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for RtfNode {}

impl fmt::Debug for RtfNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RtfNode")
            .field("kind", &self.kind())
            .field("key", &&*self.key())
            .field("has_parameter", &self.has_parameter())
            .field("parameter", &self.parameter())
            .field("children", &self.child_count())
            .finish()
    }
}

/// `[kind, key, has_parameter, parameter]`
impl fmt::Display for RtfNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}, {}, {}]",
            self.kind(),
            &*self.key(),
            self.has_parameter(),
            self.parameter()
        )
    }
}
