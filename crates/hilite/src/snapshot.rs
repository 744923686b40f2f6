//! Style snapshots
//!
//! A marker replaces a bare text node, so it has to carry the look the
//! text had inherited from its container. The snapshot is the container's
//! computed style over the fixed set in `PropertyId::COMPUTED`.

use hilite_css::{PropertyId, StyleResolver};
use hilite_dom::{DomTree, NodeId};

/// Computed style of one element, in snapshot order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleSnapshot {
    entries: Vec<(PropertyId, String)>,
}

impl StyleSnapshot {
    /// Capture the computed style of `element`
    pub fn capture(resolver: &StyleResolver, tree: &DomTree, element: NodeId) -> Self {
        let computed = resolver.compute_style(tree, element);
        Self {
            entries: computed
                .iter()
                .map(|(id, value)| (id, value.to_string()))
                .collect(),
        }
    }

    pub fn get(&self, id: PropertyId) -> Option<&str> {
        self.entries
            .iter()
            .find(|(p, _)| *p == id)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PropertyId, &str)> {
        self.entries.iter().map(|(id, v)| (*id, v.as_str()))
    }
}
