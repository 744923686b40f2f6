//! hilite DOM - Document Object Model
//!
//! Arena-based document tree with the pieces a text annotator needs:
//! ranges and selections, filtered tree walking, shadow roots, embedded
//! frames and UI event dispatch.

mod classlist;
mod document;
mod error;
mod events;
mod interner;
mod node;
mod range;
mod shadow;
mod tree;
mod tree_walker;

pub use classlist::ClassList;
pub use document::{Document, Frame};
pub use error::{DomError, DomResult};
pub use events::{EventHandler, EventType, UiEvent};
pub use interner::{InternedString, StringInterner};
pub use node::{Attribute, ElementData, Node, NodeData, NodeType};
pub use range::{BoundaryPoint, PositionComparison, Range, Selection};
pub use shadow::{ShadowRoot, ShadowRootMode};
pub use tree::{Ancestors, Children, Descendants, DomTree, TreeId};
pub use tree_walker::{FilterResult, NodeFilter, TreeWalker, WhatToShow};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root node ID
    pub const ROOT: NodeId = NodeId(0);
    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Whether this ID points at a node
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Raw arena index
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}
