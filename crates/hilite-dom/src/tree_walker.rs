//! TreeWalker
//!
//! Filtered pre-order traversal of a subtree. The walker borrows the tree,
//! so callers that mutate what they visit collect the results first.

use crate::{DomTree, NodeId, NodeType};

/// What types of nodes to show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WhatToShow(u32);

impl WhatToShow {
    pub const ALL: WhatToShow = WhatToShow(0xFFFFFFFF);
    pub const ELEMENT: WhatToShow = WhatToShow(0x1);
    pub const TEXT: WhatToShow = WhatToShow(0x4);
    pub const COMMENT: WhatToShow = WhatToShow(0x80);
    pub const DOCUMENT: WhatToShow = WhatToShow(0x100);
    pub const DOCUMENT_TYPE: WhatToShow = WhatToShow(0x200);
    pub const DOCUMENT_FRAGMENT: WhatToShow = WhatToShow(0x400);

    /// Check if a node type is shown
    pub fn includes(self, node_type: NodeType) -> bool {
        let flag = match node_type {
            NodeType::Element => Self::ELEMENT.0,
            NodeType::Text => Self::TEXT.0,
            NodeType::Comment => Self::COMMENT.0,
            NodeType::Document => Self::DOCUMENT.0,
            NodeType::DocumentType => Self::DOCUMENT_TYPE.0,
            NodeType::DocumentFragment => Self::DOCUMENT_FRAGMENT.0,
        };
        (self.0 & flag) != 0
    }

    /// Union of two WhatToShow filters
    pub fn or(self, other: WhatToShow) -> WhatToShow {
        WhatToShow(self.0 | other.0)
    }
}

impl Default for WhatToShow {
    fn default() -> Self {
        Self::ALL
    }
}

/// Node filter result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterResult {
    /// Yield the node and descend
    Accept,
    /// Skip the node and its whole subtree
    Reject,
    /// Skip the node but still visit its children
    Skip,
}

/// Node filter for custom filtering
pub trait NodeFilter {
    fn accept_node(&self, tree: &DomTree, node: NodeId) -> FilterResult;
}

impl<F> NodeFilter for F
where
    F: Fn(&DomTree, NodeId) -> FilterResult,
{
    fn accept_node(&self, tree: &DomTree, node: NodeId) -> FilterResult {
        self(tree, node)
    }
}

/// Lazy filtered walk over the subtree under `root`
pub struct TreeWalker<'a, F> {
    tree: &'a DomTree,
    root: NodeId,
    what_to_show: WhatToShow,
    filter: F,
    pending: Option<NodeId>,
}

impl<'a, F: NodeFilter> TreeWalker<'a, F> {
    /// Walk the descendants of `root`
    pub fn new(tree: &'a DomTree, root: NodeId, what_to_show: WhatToShow, filter: F) -> Self {
        let first = tree.get(root).map(|n| n.first_child).filter(|c| c.is_valid());
        Self {
            tree,
            root,
            what_to_show,
            filter,
            pending: first,
        }
    }

    /// Walk `root` itself as well as its descendants
    pub fn inclusive(tree: &'a DomTree, root: NodeId, what_to_show: WhatToShow, filter: F) -> Self {
        let mut walker = Self::new(tree, root, what_to_show, filter);
        walker.pending = tree.get(root).map(|_| root);
        walker
    }

    /// Root of the walk
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Advance to the next accepted node
    pub fn next_node(&mut self) -> Option<NodeId> {
        loop {
            let node = self.pending?;
            let result = self.classify(node);
            self.pending = match result {
                FilterResult::Reject => self.tree.next_skipping_children(node, self.root),
                _ => self.tree.next_in_preorder(node, self.root),
            };
            if result == FilterResult::Accept {
                return Some(node);
            }
        }
    }

    /// Drain the walker into a list, so the tree can be mutated afterwards
    pub fn collect_nodes(self) -> Vec<NodeId> {
        self.collect()
    }

    fn classify(&self, node: NodeId) -> FilterResult {
        let shown = self
            .tree
            .get(node)
            .is_some_and(|n| self.what_to_show.includes(n.node_type()));
        if shown {
            self.filter.accept_node(self.tree, node)
        } else {
            FilterResult::Skip
        }
    }
}

impl<F: NodeFilter> Iterator for TreeWalker<'_, F> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        self.next_node()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accept_all(_: &DomTree, _: NodeId) -> FilterResult {
        FilterResult::Accept
    }

    fn sample() -> (DomTree, NodeId, NodeId, NodeId, NodeId) {
        // <div>one<b>two</b></div>
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        let one = tree.create_text("one");
        let b = tree.create_element("b");
        let two = tree.create_text("two");
        tree.append_child(tree.root(), div).unwrap();
        tree.append_child(div, one).unwrap();
        tree.append_child(div, b).unwrap();
        tree.append_child(b, two).unwrap();
        (tree, div, one, b, two)
    }

    #[test]
    fn test_what_to_show() {
        let show = WhatToShow::ELEMENT.or(WhatToShow::TEXT);
        assert!(show.includes(NodeType::Element));
        assert!(show.includes(NodeType::Text));
        assert!(!show.includes(NodeType::Comment));
        assert!(WhatToShow::default().includes(NodeType::Comment));
    }

    #[test]
    fn test_text_walk() {
        let (tree, div, one, _, two) = sample();
        let texts = TreeWalker::new(&tree, div, WhatToShow::TEXT, accept_all).collect_nodes();
        assert_eq!(texts, vec![one, two]);

        let mut walker = TreeWalker::new(&tree, div, WhatToShow::TEXT, accept_all);
        assert_eq!(walker.next_node(), Some(one));
        assert_eq!(walker.next_node(), Some(two));
        assert_eq!(walker.next_node(), None);
    }

    #[test]
    fn test_reject_skips_subtree() {
        let (tree, div, one, b, _) = sample();
        let filter = |t: &DomTree, n: NodeId| {
            if t.is_element_named(n, "b") {
                FilterResult::Reject
            } else {
                FilterResult::Accept
            }
        };
        let nodes: Vec<_> = TreeWalker::new(&tree, div, WhatToShow::ALL, filter).collect();
        assert_eq!(nodes, vec![one]);
        assert!(!nodes.contains(&b));
    }

    #[test]
    fn test_skip_descends() {
        let (tree, div, _, b, _) = sample();
        let filter = |t: &DomTree, n: NodeId| {
            if t.is_element_named(n, "b") {
                FilterResult::Accept
            } else {
                FilterResult::Skip
            }
        };
        let nodes: Vec<_> = TreeWalker::inclusive(&tree, div, WhatToShow::ELEMENT, filter).collect();
        assert_eq!(nodes, vec![b]);
    }

    #[test]
    fn test_inclusive_root() {
        let (tree, _, _, b, two) = sample();
        let nodes: Vec<_> = TreeWalker::inclusive(&tree, b, WhatToShow::ALL, accept_all).collect();
        assert_eq!(nodes, vec![b, two]);

        let leaf: Vec<_> = TreeWalker::inclusive(&tree, two, WhatToShow::TEXT, accept_all).collect();
        assert_eq!(leaf, vec![two]);
    }
}
