//! Ordered, shared list of node handles.

use super::node::RtfNode;
use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

/// An ordered, index-addressable list of nodes.
///
/// `NodeList` is a handle: cloning it yields a second handle to the **same**
/// list, so a mutation through either is visible through both. This is how
/// [`RtfNode::clone_node(false)`](RtfNode::clone_node) shares its children
/// with the original node. Search operations return fresh, unowned lists.
///
/// Membership tests and [`index_of`](Self::index_of) compare nodes by
/// identity, not by content.
#[derive(Clone, Default)]
pub struct NodeList(Rc<RefCell<Vec<RtfNode>>>);

impl NodeList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// The node at `index`, if any.
    pub fn get(&self, index: usize) -> Option<RtfNode> {
        self.0.borrow().get(index).cloned()
    }

    pub fn first(&self) -> Option<RtfNode> {
        self.0.borrow().first().cloned()
    }

    pub fn last(&self) -> Option<RtfNode> {
        self.0.borrow().last().cloned()
    }

    /// Position of `node` in this list, by identity.
    pub fn index_of(&self, node: &RtfNode) -> Option<usize> {
        self.0.borrow().iter().position(|n| n.ptr_eq(node))
    }

    pub fn contains(&self, node: &RtfNode) -> bool {
        self.index_of(node).is_some()
    }

    pub fn push(&self, node: RtfNode) {
        self.0.borrow_mut().push(node);
    }

    /// Insert at `index`; callers guarantee `index <= len`.
    pub(crate) fn insert(&self, index: usize, node: RtfNode) {
        self.0.borrow_mut().insert(index, node);
    }

    /// Remove and return the node at `index`, if it exists.
    pub(crate) fn remove(&self, index: usize) -> Option<RtfNode> {
        let mut nodes = self.0.borrow_mut();
        (index < nodes.len()).then(|| nodes.remove(index))
    }

    /// Append every node of `other`, in order.
    ///
    /// The nodes are shared, not copied, and their back-references are left
    /// untouched; this is how search results are merged.
    pub fn extend_from(&self, other: &NodeList) {
        let nodes = other.to_vec();
        self.0.borrow_mut().extend(nodes);
    }

    /// A snapshot of the current contents.
    pub fn to_vec(&self) -> Vec<RtfNode> {
        self.0.borrow().clone()
    }

    /// Iterate over a snapshot of the current contents.
    pub fn iter(&self) -> std::vec::IntoIter<RtfNode> {
        self.to_vec().into_iter()
    }

    /// Whether both handles refer to the same list.
    pub fn ptr_eq(&self, other: &NodeList) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn borrow(&self) -> Ref<'_, Vec<RtfNode>> {
        self.0.borrow()
    }
}

impl FromIterator<RtfNode> for NodeList {
    fn from_iter<I: IntoIterator<Item = RtfNode>>(iter: I) -> Self {
        Self(Rc::new(RefCell::new(iter.into_iter().collect())))
    }
}

impl IntoIterator for &NodeList {
    type Item = RtfNode;
    type IntoIter = std::vec::IntoIter<RtfNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Debug for NodeList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.borrow().iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_index_of() {
        let list = NodeList::new();
        let a = RtfNode::text("a");
        let b = RtfNode::text("b");
        list.push(a.clone());
        list.push(b.clone());

        assert_eq!(list.len(), 2);
        assert_eq!(list.index_of(&a), Some(0));
        assert_eq!(list.index_of(&b), Some(1));
        assert_eq!(list.index_of(&RtfNode::text("a")), None);
    }

    #[test]
    fn test_insert_and_remove() {
        let list: NodeList = [RtfNode::text("a"), RtfNode::text("c")].into_iter().collect();
        let b = RtfNode::text("b");
        list.insert(1, b.clone());
        assert_eq!(list.get(1), Some(b.clone()));

        let removed = list.remove(1).unwrap();
        assert!(removed.ptr_eq(&b));
        assert!(list.remove(5).is_none());
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_clone_shares_storage() {
        let list = NodeList::new();
        let alias = list.clone();
        alias.push(RtfNode::text("x"));
        assert_eq!(list.len(), 1);
        assert!(list.ptr_eq(&alias));
    }

    #[test]
    fn test_extend_from_self() {
        let list: NodeList = [RtfNode::text("a")].into_iter().collect();
        list.extend_from(&list.clone());
        assert_eq!(list.len(), 2);
        assert!(list.get(0).unwrap().ptr_eq(&list.get(1).unwrap()));
    }
}
