//! Range and Selection API
//!
//! Range represents a contiguous part of one tree. Selection represents
//! the user's current selection as a list of ranges.
//!
//! Offsets are character offsets for text nodes and child indices for
//! containers. Every comparison needs the tree, so the range remembers
//! which arena and which root (document or shadow root) it belongs to.

use std::cmp::Ordering;

use crate::{DomError, DomResult, DomTree, NodeData, NodeId, TreeId};

/// Range boundary point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundaryPoint {
    /// The container node
    pub node: NodeId,
    /// Offset within the container
    pub offset: u32,
}

impl BoundaryPoint {
    pub fn new(node: NodeId, offset: u32) -> Self {
        Self { node, offset }
    }
}

/// Position of a point relative to a range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionComparison {
    Before,
    Equal,
    After,
}

/// Range - a contiguous part of a tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Range {
    tree: TreeId,
    root: NodeId,
    start: BoundaryPoint,
    end: BoundaryPoint,
    common_ancestor: NodeId,
}

impl Range {
    /// Create a collapsed range at a point
    pub fn collapsed_at(tree: &DomTree, node: NodeId, offset: u32) -> DomResult<Self> {
        Self::between(tree, node, offset, node, offset)
    }

    /// Create a range between two points. A backwards pair is normalized
    /// so that start never follows end.
    pub fn between(
        tree: &DomTree,
        start_container: NodeId,
        start_offset: u32,
        end_container: NodeId,
        end_offset: u32,
    ) -> DomResult<Self> {
        let mut start = BoundaryPoint::new(start_container, start_offset);
        let mut end = BoundaryPoint::new(end_container, end_offset);
        Self::check_point(tree, start)?;
        Self::check_point(tree, end)?;

        let root = tree.root_of(start.node);
        if tree.root_of(end.node) != root {
            return Err(DomError::WrongDocument);
        }
        if tree.compare_points(start, end) == Some(Ordering::Greater) {
            std::mem::swap(&mut start, &mut end);
        }
        let common_ancestor = tree
            .common_ancestor(start.node, end.node)
            .ok_or(DomError::WrongDocument)?;

        Ok(Self {
            tree: tree.id(),
            root,
            start,
            end,
            common_ancestor,
        })
    }

    /// Range covering the contents of a node
    pub fn select_node_contents(tree: &DomTree, node: NodeId) -> DomResult<Self> {
        Self::between(tree, node, 0, node, tree.node_length(node))
    }

    fn check_point(tree: &DomTree, point: BoundaryPoint) -> DomResult<()> {
        let node = tree.get(point.node).ok_or(DomError::NotFound(point.node))?;
        if matches!(node.data, NodeData::Doctype { .. }) {
            return Err(DomError::InvalidNodeType);
        }
        let length = tree.node_length(point.node);
        if point.offset > length {
            return Err(DomError::IndexSize {
                offset: point.offset,
                length,
            });
        }
        Ok(())
    }

    // --- Getters ---

    /// Start boundary point
    pub fn start(&self) -> BoundaryPoint {
        self.start
    }

    /// End boundary point
    pub fn end(&self) -> BoundaryPoint {
        self.end
    }

    /// Get the start container
    pub fn start_container(&self) -> NodeId {
        self.start.node
    }

    /// Get the start offset
    pub fn start_offset(&self) -> u32 {
        self.start.offset
    }

    /// Get the end container
    pub fn end_container(&self) -> NodeId {
        self.end.node
    }

    /// Get the end offset
    pub fn end_offset(&self) -> u32 {
        self.end.offset
    }

    /// Check if the range is collapsed
    pub fn collapsed(&self) -> bool {
        self.start == self.end
    }

    /// Get the common ancestor container
    pub fn common_ancestor_container(&self) -> NodeId {
        self.common_ancestor
    }

    /// Root of the tree the range lives in
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Arena the range lives in
    pub fn tree_id(&self) -> TreeId {
        self.tree
    }

    // --- Comparison ---

    fn same_tree(&self, tree: &DomTree, node: NodeId) -> bool {
        tree.id() == self.tree && tree.get(node).is_some() && tree.root_of(node) == self.root
    }

    /// Compare a point to the range
    pub fn compare_point(
        &self,
        tree: &DomTree,
        node: NodeId,
        offset: u32,
    ) -> DomResult<PositionComparison> {
        if !self.same_tree(tree, node) {
            return Err(DomError::WrongDocument);
        }
        let point = BoundaryPoint::new(node, offset);
        Self::check_point(tree, point)?;

        if tree.compare_points(point, self.start) == Some(Ordering::Less) {
            Ok(PositionComparison::Before)
        } else if tree.compare_points(point, self.end) == Some(Ordering::Greater) {
            Ok(PositionComparison::After)
        } else {
            Ok(PositionComparison::Equal)
        }
    }

    /// Whether any part of `node` lies inside the range. Nodes from another
    /// tree or another root never intersect.
    pub fn intersects_node(&self, tree: &DomTree, node: NodeId) -> bool {
        if !self.same_tree(tree, node) {
            return false;
        }
        let Some(parent) = tree.parent(node) else {
            return true;
        };
        let offset = tree.index_of(node);
        let before_end =
            tree.compare_points(BoundaryPoint::new(parent, offset), self.end) == Some(Ordering::Less);
        let after_start = tree.compare_points(BoundaryPoint::new(parent, offset + 1), self.start)
            == Some(Ordering::Greater);
        before_end && after_start
    }

    /// Text covered by the range
    pub fn text(&self, tree: &DomTree) -> String {
        let mut out = String::new();
        for id in std::iter::once(self.common_ancestor).chain(tree.descendants(self.common_ancestor)) {
            let Some(text) = tree.text(id) else {
                continue;
            };
            if !self.intersects_node(tree, id) {
                continue;
            }
            let len = text.chars().count();
            let from = if id == self.start.node { self.start.offset as usize } else { 0 };
            let to = if id == self.end.node { self.end.offset as usize } else { len };
            out.extend(text.chars().skip(from).take(to.saturating_sub(from)));
        }
        out
    }
}

/// Selection - the current selection in a document
#[derive(Debug, Clone, Default)]
pub struct Selection {
    /// Ranges in the selection (usually one)
    ranges: Vec<Range>,
}

impl Selection {
    /// Create a new empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Selection holding one range
    pub fn from_range(range: Range) -> Self {
        let mut selection = Self::new();
        selection.add_range(range);
        selection
    }

    /// Check if selection is collapsed (or empty)
    pub fn is_collapsed(&self) -> bool {
        self.ranges.first().is_none_or(|r| r.collapsed())
    }

    /// Get the number of ranges
    pub fn range_count(&self) -> usize {
        self.ranges.len()
    }

    /// Get a range by index
    pub fn get_range_at(&self, index: usize) -> Option<&Range> {
        self.ranges.get(index)
    }

    /// Add a range to the selection
    pub fn add_range(&mut self, range: Range) {
        self.ranges.push(range);
    }

    /// Remove all ranges
    pub fn remove_all_ranges(&mut self) {
        self.ranges.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph() -> (DomTree, NodeId, NodeId, NodeId) {
        let mut tree = DomTree::new();
        let p = tree.create_element("p");
        let a = tree.create_text("First part. ");
        let b = tree.create_text("Second part.");
        tree.append_child(tree.root(), p).unwrap();
        tree.append_child(p, a).unwrap();
        tree.append_child(p, b).unwrap();
        (tree, p, a, b)
    }

    #[test]
    fn test_range_creation() {
        let (tree, _, a, _) = paragraph();
        let range = Range::collapsed_at(&tree, a, 5).unwrap();

        assert_eq!(range.start_container(), a);
        assert_eq!(range.start_offset(), 5);
        assert_eq!(range.end_offset(), 5);
        assert!(range.collapsed());
    }

    #[test]
    fn test_range_between_computes_ancestor() {
        let (tree, p, a, b) = paragraph();
        let range = Range::between(&tree, a, 6, b, 6).unwrap();

        assert!(!range.collapsed());
        assert_eq!(range.common_ancestor_container(), p);
        assert_eq!(range.text(&tree), "part. Second");
    }

    #[test]
    fn test_backwards_range_is_normalized() {
        let (tree, _, a, b) = paragraph();
        let range = Range::between(&tree, b, 3, a, 2).unwrap();
        assert_eq!(range.start_container(), a);
        assert_eq!(range.end_container(), b);
    }

    #[test]
    fn test_offset_out_of_bounds() {
        let (tree, _, a, _) = paragraph();
        assert!(matches!(
            Range::between(&tree, a, 0, a, 99),
            Err(DomError::IndexSize { .. })
        ));
    }

    #[test]
    fn test_intersects_node() {
        let (mut tree, p, a, b) = paragraph();
        let after = tree.create_element("p");
        tree.append_child(tree.root(), after).unwrap();

        let range = Range::between(&tree, a, 2, a, 4).unwrap();
        assert!(range.intersects_node(&tree, a));
        assert!(range.intersects_node(&tree, p));
        assert!(!range.intersects_node(&tree, b));
        assert!(!range.intersects_node(&tree, after));

        let other = DomTree::new();
        assert!(!range.intersects_node(&other, a));
    }

    #[test]
    fn test_compare_point() {
        let (tree, _, a, b) = paragraph();
        let range = Range::between(&tree, a, 2, a, 4).unwrap();
        assert_eq!(range.compare_point(&tree, a, 0), Ok(PositionComparison::Before));
        assert_eq!(range.compare_point(&tree, a, 3), Ok(PositionComparison::Equal));
        assert_eq!(range.compare_point(&tree, b, 0), Ok(PositionComparison::After));
    }

    #[test]
    fn test_selection_add_and_clear() {
        let (tree, _, a, _) = paragraph();
        let mut selection = Selection::new();
        assert!(selection.is_collapsed());

        selection.add_range(Range::between(&tree, a, 0, a, 5).unwrap());
        assert_eq!(selection.range_count(), 1);
        assert!(!selection.is_collapsed());

        selection.remove_all_ranges();
        assert_eq!(selection.range_count(), 0);
        assert!(selection.is_collapsed());
    }
}
