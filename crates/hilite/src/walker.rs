//! Range-scoped collection of the nodes a pass works on
//!
//! Annotation wants text nodes, removal wants marker elements. Both skip
//! editing hosts and containers whose text is not page prose. Results are
//! collected up front so the caller can rewrite the tree freely.

use hilite_dom::{DomTree, FilterResult, NodeId, Range, TreeWalker, WhatToShow};

/// Elements whose text is never highlighted
pub const EXCLUDED_CONTAINERS: &[&str] = &[
    "script", "style", "noscript", "textarea", "input", "select", "template",
];

/// What a walk is looking for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkMode {
    /// Text nodes that still need markers
    Annotate,
    /// Existing markers
    Remove,
}

/// Range-scoped walk over one subtree
#[derive(Debug, Clone, Copy)]
pub struct RangeWalker<'a> {
    range: &'a Range,
    marker_class: &'a str,
}

impl<'a> RangeWalker<'a> {
    pub fn new(range: &'a Range, marker_class: &'a str) -> Self {
        Self {
            range,
            marker_class,
        }
    }

    /// Nodes under `root` (inclusive) the pass should touch, in tree order
    pub fn collect(&self, tree: &DomTree, root: NodeId, mode: WalkMode) -> Vec<NodeId> {
        let show = match mode {
            WalkMode::Annotate => WhatToShow::ELEMENT.or(WhatToShow::TEXT),
            WalkMode::Remove => WhatToShow::ELEMENT,
        };
        let filter = |tree: &DomTree, node: NodeId| self.classify(tree, node, mode);
        let nodes = TreeWalker::inclusive(tree, root, show, filter).collect_nodes();
        tracing::trace!(?root, ?mode, count = nodes.len(), "collected range nodes");
        nodes
    }

    fn classify(&self, tree: &DomTree, node: NodeId, mode: WalkMode) -> FilterResult {
        if let Some(text) = tree.text(node) {
            return self.classify_text(tree, node, text);
        }

        if self.is_excluded_container(tree, node) {
            return FilterResult::Reject;
        }
        if !tree.has_class(node, self.marker_class) {
            return FilterResult::Skip;
        }
        match mode {
            // Sentences already inside a marker stay as they are
            WalkMode::Annotate => FilterResult::Reject,
            WalkMode::Remove if self.range.intersects_node(tree, node) => FilterResult::Accept,
            WalkMode::Remove => FilterResult::Skip,
        }
    }

    fn classify_text(&self, tree: &DomTree, node: NodeId, text: &str) -> FilterResult {
        if text.trim().is_empty() {
            return FilterResult::Reject;
        }
        let blocked = tree.ancestors(node).any(|a| {
            self.is_excluded_container(tree, a) || tree.has_class(a, self.marker_class)
        });
        if blocked || !self.range.intersects_node(tree, node) {
            return FilterResult::Reject;
        }
        FilterResult::Accept
    }

    fn is_excluded_container(&self, tree: &DomTree, node: NodeId) -> bool {
        tree.tag_name(node)
            .is_some_and(|tag| EXCLUDED_CONTAINERS.contains(&tag))
            || tree.is_editable(node)
    }
}
