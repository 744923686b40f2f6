//! DOM Tree (arena-based allocation)
//!
//! Nodes are never freed: removing a node only unlinks it, so IDs stay
//! stable for the lifetime of the tree. Every structural mutation goes
//! through `link_before`/`unlink`, which keep the five sibling/parent
//! links consistent.

use std::cmp::Ordering;
use std::sync::atomic::{AtomicU32, Ordering as AtomicOrdering};

use crate::{
    BoundaryPoint, ClassList, DomError, DomResult, InternedString, Node, NodeData, NodeId,
    ShadowRoot, ShadowRootMode, StringInterner,
};

static NEXT_TREE_ID: AtomicU32 = AtomicU32::new(1);

/// Identity of a tree arena, so node IDs from two documents are never confused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TreeId(u32);

/// Arena-based DOM tree
#[derive(Debug)]
pub struct DomTree {
    id: TreeId,
    nodes: Vec<Node>,
    interner: StringInterner,
}

impl DomTree {
    /// Create a new tree holding only the document node
    pub fn new() -> Self {
        Self {
            id: TreeId(NEXT_TREE_ID.fetch_add(1, AtomicOrdering::Relaxed)),
            nodes: vec![Node::document()],
            interner: StringInterner::new(),
        }
    }

    /// Identity of this arena
    pub fn id(&self) -> TreeId {
        self.id
    }

    /// Document node
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    fn node(&self, id: NodeId) -> DomResult<&Node> {
        self.get(id).ok_or(DomError::NotFound(id))
    }

    fn node_mut(&mut self, id: NodeId) -> DomResult<&mut Node> {
        self.get_mut(id).ok_or(DomError::NotFound(id))
    }

    /// Number of nodes in the arena (attached or not)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// String interner
    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    /// Mutable string interner
    pub fn interner_mut(&mut self) -> &mut StringInterner {
        &mut self.interner
    }

    /// Resolve an interned string
    pub fn resolve(&self, s: InternedString) -> &str {
        self.interner.get(s)
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    // --- Creation ---

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let name = self.interner.intern(tag);
        self.push(Node::element(name))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(Node::text(text.to_string()))
    }

    /// Create a detached comment
    pub fn create_comment(&mut self, text: &str) -> NodeId {
        self.push(Node::comment(text.to_string()))
    }

    /// Create a detached doctype
    pub fn create_doctype(&mut self, name: &str) -> NodeId {
        self.push(Node::doctype(name.to_string()))
    }

    // --- Element helpers ---

    /// Tag name of an element
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        let elem = self.get(id)?.as_element()?;
        Some(self.resolve(elem.name))
    }

    /// Whether `id` is an element with the given tag
    pub fn is_element_named(&self, id: NodeId, tag: &str) -> bool {
        self.tag_name(id).is_some_and(|t| t.eq_ignore_ascii_case(tag))
    }

    /// Get an attribute value
    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        let elem = self.get(id)?.as_element()?;
        let name = self.interner.lookup(name)?;
        elem.get_attr(name)
    }

    /// Check attribute presence
    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.get_attribute(id, name).is_some()
    }

    /// Set an attribute on an element
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> DomResult<()> {
        let name = self.interner.intern(name);
        let elem = self
            .node_mut(id)?
            .as_element_mut()
            .ok_or(DomError::InvalidNodeType)?;
        elem.set_attr(name, value.to_string());
        Ok(())
    }

    /// Remove an attribute from an element
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> DomResult<Option<String>> {
        let Some(name) = self.interner.lookup(name) else {
            return Ok(None);
        };
        let elem = self
            .node_mut(id)?
            .as_element_mut()
            .ok_or(DomError::InvalidNodeType)?;
        Ok(elem.remove_attr(name))
    }

    /// Class tokens of an element
    pub fn class_list(&self, id: NodeId) -> ClassList {
        ClassList::parse(self.get_attribute(id, "class").unwrap_or(""))
    }

    /// Whether an element carries a class token
    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.get_attribute(id, "class")
            .is_some_and(|v| v.split_whitespace().any(|t| t == class))
    }

    /// Add a class token to an element
    pub fn add_class(&mut self, id: NodeId, class: &str) -> DomResult<()> {
        let mut list = self.class_list(id);
        if list.add(class) {
            self.set_attribute(id, "class", &list.to_string())?;
        }
        Ok(())
    }

    /// Remove a class token; the attribute goes away with its last token
    pub fn remove_class(&mut self, id: NodeId, class: &str) -> DomResult<()> {
        let mut list = self.class_list(id);
        if !list.remove(class) {
            return Ok(());
        }
        if list.is_empty() {
            self.remove_attribute(id, "class")?;
        } else {
            self.set_attribute(id, "class", &list.to_string())?;
        }
        Ok(())
    }

    /// Find elements under `root` (inclusive) carrying `class`, in document order
    pub fn elements_with_class(&self, root: NodeId, class: &str) -> Vec<NodeId> {
        std::iter::once(root)
            .chain(self.descendants(root))
            .filter(|&id| self.has_class(id, class))
            .collect()
    }

    /// Find elements under `root` (inclusive) with a tag name, in document order
    pub fn elements_by_tag(&self, root: NodeId, tag: &str) -> Vec<NodeId> {
        std::iter::once(root)
            .chain(self.descendants(root))
            .filter(|&id| self.is_element_named(id, tag))
            .collect()
    }

    // --- Text ---

    /// Character data of a text node
    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.get(id)?.as_text()
    }

    /// Replace the data of a text node
    pub fn set_text(&mut self, id: NodeId, content: &str) -> DomResult<()> {
        match &mut self.node_mut(id)?.data {
            NodeData::Text(t) => {
                *t = content.to_string();
                Ok(())
            }
            _ => Err(DomError::InvalidNodeType),
        }
    }

    /// Concatenated text of a node and its descendants
    pub fn text_content(&self, id: NodeId) -> String {
        let Some(node) = self.get(id) else {
            return String::new();
        };
        match &node.data {
            NodeData::Text(t) | NodeData::Comment(t) => t.clone(),
            NodeData::Doctype { .. } => String::new(),
            _ => self
                .descendants(id)
                .filter_map(|d| self.text(d))
                .collect(),
        }
    }

    /// Length used by boundary offsets: characters for character data,
    /// child count for containers
    pub fn node_length(&self, id: NodeId) -> u32 {
        match self.get(id).map(|n| &n.data) {
            Some(NodeData::Text(t)) | Some(NodeData::Comment(t)) => t.chars().count() as u32,
            Some(NodeData::Doctype { .. }) | None => 0,
            Some(_) => self.child_count(id),
        }
    }

    // --- Navigation ---

    /// Parent of a node
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).map(|n| n.parent).filter(|p| p.is_valid())
    }

    /// Children of a node
    pub fn children(&self, id: NodeId) -> Children<'_> {
        let next = self.get(id).map(|n| n.first_child).unwrap_or(NodeId::NONE);
        Children { tree: self, next }
    }

    /// Number of children
    pub fn child_count(&self, id: NodeId) -> u32 {
        self.children(id).count() as u32
    }

    /// Child at an index
    pub fn child_at(&self, id: NodeId, index: u32) -> Option<NodeId> {
        self.children(id).nth(index as usize)
    }

    /// Index of a node among its siblings
    pub fn index_of(&self, id: NodeId) -> u32 {
        let mut index = 0;
        let mut cur = self.get(id).map(|n| n.prev_sibling).unwrap_or(NodeId::NONE);
        while let Some(node) = self.get(cur) {
            index += 1;
            cur = node.prev_sibling;
        }
        index
    }

    /// Ancestors of a node, nearest first (excluding the node)
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.parent(id).unwrap_or(NodeId::NONE),
        }
    }

    /// Descendants of `root` in pre-order (excluding `root`)
    pub fn descendants(&self, root: NodeId) -> Descendants<'_> {
        let next = self.get(root).map(|n| n.first_child).unwrap_or(NodeId::NONE);
        Descendants {
            tree: self,
            root,
            next: next.is_valid().then_some(next),
        }
    }

    /// Next node after `node` in pre-order, without leaving `root`
    pub fn next_in_preorder(&self, node: NodeId, root: NodeId) -> Option<NodeId> {
        let first = self.get(node)?.first_child;
        if first.is_valid() {
            return Some(first);
        }
        self.next_skipping_children(node, root)
    }

    /// Next node after `node` in pre-order, skipping `node`'s subtree
    pub fn next_skipping_children(&self, node: NodeId, root: NodeId) -> Option<NodeId> {
        let mut cur = node;
        loop {
            if cur == root {
                return None;
            }
            let n = self.get(cur)?;
            if n.next_sibling.is_valid() {
                return Some(n.next_sibling);
            }
            if !n.parent.is_valid() {
                return None;
            }
            cur = n.parent;
        }
    }

    /// Root of the tree `id` belongs to: the document, a shadow root, or
    /// the top of a detached subtree
    pub fn root_of(&self, id: NodeId) -> NodeId {
        self.ancestors(id).last().unwrap_or(id)
    }

    /// Whether `ancestor` is `node` or one of its ancestors
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        node == ancestor || self.ancestors(node).any(|a| a == ancestor)
    }

    /// Nearest inclusive ancestor matching a predicate
    pub fn closest(&self, id: NodeId, pred: impl Fn(NodeId, &Node) -> bool) -> Option<NodeId> {
        std::iter::once(id)
            .chain(self.ancestors(id))
            .find(|&a| self.get(a).is_some_and(|n| pred(a, n)))
    }

    /// Whether a node sits inside an editing host. The nearest element with
    /// a `contenteditable` attribute decides; `"false"` turns editing off.
    pub fn is_editable(&self, id: NodeId) -> bool {
        std::iter::once(id)
            .chain(self.ancestors(id))
            .find_map(|a| self.get_attribute(a, "contenteditable"))
            .is_some_and(|v| !v.trim().eq_ignore_ascii_case("false"))
    }

    /// Whether a node is reachable from the document, through shadow hosts
    pub fn is_connected(&self, id: NodeId) -> bool {
        let root = self.root_of(id);
        if root == NodeId::ROOT {
            return true;
        }
        match self.get(root).and_then(|n| n.as_shadow_root()) {
            Some(shadow) => self.is_connected(shadow.host),
            None => false,
        }
    }

    // --- Mutation ---

    /// Append a child node
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        self.insert_before(parent, child, None)
    }

    /// Insert `child` before `reference` (or append when `None`)
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> DomResult<()> {
        self.check_insert(parent, child)?;
        let mut reference = reference.unwrap_or(NodeId::NONE);
        if reference.is_valid() && self.node(reference)?.parent != parent {
            return Err(DomError::NotAChild);
        }
        if reference == child {
            reference = self.node(child)?.next_sibling;
        }
        self.unlink(child);
        self.link_before(parent, child, reference);
        Ok(())
    }

    /// Remove a child node
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        if self.node(child)?.parent != parent {
            return Err(DomError::NotAChild);
        }
        self.unlink(child);
        Ok(())
    }

    /// Replace `old_child` with `new_child`
    pub fn replace_child(
        &mut self,
        parent: NodeId,
        new_child: NodeId,
        old_child: NodeId,
    ) -> DomResult<()> {
        if self.node(old_child)?.parent != parent {
            return Err(DomError::NotAChild);
        }
        if new_child == old_child {
            return Ok(());
        }
        self.insert_before(parent, new_child, Some(old_child))?;
        self.unlink(old_child);
        Ok(())
    }

    /// Detach a node from its parent, if any
    pub fn detach(&mut self, id: NodeId) {
        self.unlink(id);
    }

    fn check_insert(&self, parent: NodeId, child: NodeId) -> DomResult<()> {
        if !self.node(parent)?.is_container() {
            return Err(DomError::HierarchyRequest);
        }
        match self.node(child)?.data {
            NodeData::Document | NodeData::ShadowRoot(_) => {
                return Err(DomError::HierarchyRequest);
            }
            _ => {}
        }
        if self.is_inclusive_ancestor(child, parent) {
            return Err(DomError::HierarchyRequest);
        }
        Ok(())
    }

    fn unlink(&mut self, id: NodeId) {
        let Some(node) = self.get(id) else {
            return;
        };
        let (parent, prev, next) = (node.parent, node.prev_sibling, node.next_sibling);
        if !parent.is_valid() {
            return;
        }

        match self.get_mut(prev) {
            Some(p) => p.next_sibling = next,
            None => {
                if let Some(p) = self.get_mut(parent) {
                    p.first_child = next;
                }
            }
        }
        match self.get_mut(next) {
            Some(n) => n.prev_sibling = prev,
            None => {
                if let Some(p) = self.get_mut(parent) {
                    p.last_child = prev;
                }
            }
        }

        if let Some(node) = self.get_mut(id) {
            node.parent = NodeId::NONE;
            node.prev_sibling = NodeId::NONE;
            node.next_sibling = NodeId::NONE;
        }
    }

    fn link_before(&mut self, parent: NodeId, child: NodeId, reference: NodeId) {
        let prev = match self.get(reference) {
            Some(r) => r.prev_sibling,
            None => self.get(parent).map(|p| p.last_child).unwrap_or(NodeId::NONE),
        };

        if let Some(c) = self.get_mut(child) {
            c.parent = parent;
            c.prev_sibling = prev;
            c.next_sibling = reference;
        }
        match self.get_mut(prev) {
            Some(p) => p.next_sibling = child,
            None => {
                if let Some(p) = self.get_mut(parent) {
                    p.first_child = child;
                }
            }
        }
        match self.get_mut(reference) {
            Some(r) => r.prev_sibling = child,
            None => {
                if let Some(p) = self.get_mut(parent) {
                    p.last_child = child;
                }
            }
        }
    }

    // --- Shadow DOM ---

    /// Attach a shadow root to an element
    pub fn attach_shadow(&mut self, host: NodeId, mode: ShadowRootMode) -> DomResult<NodeId> {
        self.attach_shadow_root(ShadowRoot::new(host, mode))
    }

    /// Attach a prepared shadow root to its host
    pub fn attach_shadow_root(&mut self, shadow: ShadowRoot) -> DomResult<NodeId> {
        let host = shadow.host;
        let elem = self.node(host)?.as_element().ok_or(DomError::InvalidNodeType)?;
        if elem.shadow_root.is_some() {
            return Err(DomError::HierarchyRequest);
        }
        let root = self.push(Node::shadow_root(shadow));
        if let Some(elem) = self.get_mut(host).and_then(|n| n.as_element_mut()) {
            elem.shadow_root = Some(root);
        }
        Ok(root)
    }

    /// Shadow root attached to an element
    pub fn shadow_root(&self, host: NodeId) -> Option<NodeId> {
        self.get(host)?.as_element()?.shadow_root
    }

    /// Host of a shadow root
    pub fn shadow_host(&self, shadow: NodeId) -> Option<NodeId> {
        self.get(shadow)?.as_shadow_root().map(|s| s.host)
    }

    /// Every shadow root reachable from `root`, including roots nested
    /// inside other shadow trees, ordered by host position
    pub fn shadow_roots(&self, root: NodeId) -> Vec<NodeId> {
        let mut found = Vec::new();
        for id in std::iter::once(root).chain(self.descendants(root)) {
            if let Some(shadow) = self.shadow_root(id) {
                found.push(shadow);
                found.extend(self.shadow_roots(shadow));
            }
        }
        found
    }

    // --- Ordering ---

    fn inclusive_path(&self, id: NodeId) -> Vec<NodeId> {
        let mut path: Vec<NodeId> = std::iter::once(id).chain(self.ancestors(id)).collect();
        path.reverse();
        path
    }

    /// Tree order of two nodes; `None` when they live in different trees
    pub fn tree_order(&self, a: NodeId, b: NodeId) -> Option<Ordering> {
        if a == b {
            return Some(Ordering::Equal);
        }
        let pa = self.inclusive_path(a);
        let pb = self.inclusive_path(b);
        if pa.first() != pb.first() {
            return None;
        }
        let shared = pa.iter().zip(&pb).take_while(|(x, y)| x == y).count();
        match (pa.get(shared), pb.get(shared)) {
            (None, _) => Some(Ordering::Less),
            (_, None) => Some(Ordering::Greater),
            (Some(&x), Some(&y)) => Some(self.index_of(x).cmp(&self.index_of(y))),
        }
    }

    /// Position of boundary point `a` relative to `b`
    pub fn compare_points(&self, a: BoundaryPoint, b: BoundaryPoint) -> Option<Ordering> {
        if a.node == b.node {
            return Some(a.offset.cmp(&b.offset));
        }
        if self.tree_order(a.node, b.node)? == Ordering::Greater {
            return self.compare_points(b, a).map(Ordering::reverse);
        }
        if self.is_inclusive_ancestor(a.node, b.node) {
            let mut child = b.node;
            while let Some(parent) = self.parent(child) {
                if parent == a.node {
                    break;
                }
                child = parent;
            }
            if self.index_of(child) < a.offset {
                return Some(Ordering::Greater);
            }
        }
        Some(Ordering::Less)
    }

    /// Deepest node that is an inclusive ancestor of both
    pub fn common_ancestor(&self, a: NodeId, b: NodeId) -> Option<NodeId> {
        let pa = self.inclusive_path(a);
        std::iter::once(b)
            .chain(self.ancestors(b))
            .find(|x| pa.contains(x))
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over a node's children
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let node = self.tree.get(self.next)?;
        let current = self.next;
        self.next = node.next_sibling;
        Some(current)
    }
}

/// Iterator over a node's ancestors
pub struct Ancestors<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let node = self.tree.get(self.next)?;
        let current = self.next;
        self.next = node.parent;
        Some(current)
    }
}

/// Pre-order iterator over a subtree
pub struct Descendants<'a> {
    tree: &'a DomTree,
    root: NodeId,
    next: Option<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.next_in_preorder(current, self.root);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (DomTree, NodeId, NodeId, NodeId, NodeId) {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        let p1 = tree.create_element("p");
        let p2 = tree.create_element("p");
        let text = tree.create_text("Hello");
        tree.append_child(tree.root(), div).unwrap();
        tree.append_child(div, p1).unwrap();
        tree.append_child(div, p2).unwrap();
        tree.append_child(p2, text).unwrap();
        (tree, div, p1, p2, text)
    }

    #[test]
    fn test_structure() {
        let (tree, div, p1, p2, text) = sample();

        assert_eq!(tree.len(), 5);
        assert_eq!(tree.children(div).collect::<Vec<_>>(), vec![p1, p2]);
        assert_eq!(tree.parent(text), Some(p2));
        assert_eq!(tree.index_of(p2), 1);
        assert_eq!(tree.text_content(div), "Hello");
    }

    #[test]
    fn test_descendants_preorder() {
        let (tree, div, p1, p2, text) = sample();
        let order: Vec<_> = tree.descendants(tree.root()).collect();
        assert_eq!(order, vec![div, p1, p2, text]);
        assert_eq!(tree.descendants(p1).count(), 0);
    }

    #[test]
    fn test_insert_before_and_replace() {
        let (mut tree, div, p1, p2, _) = sample();
        let span = tree.create_element("span");
        tree.insert_before(div, span, Some(p2)).unwrap();
        assert_eq!(tree.children(div).collect::<Vec<_>>(), vec![p1, span, p2]);

        let em = tree.create_element("em");
        tree.replace_child(div, em, span).unwrap();
        assert_eq!(tree.children(div).collect::<Vec<_>>(), vec![p1, em, p2]);
        assert_eq!(tree.parent(span), None);
    }

    #[test]
    fn test_hierarchy_errors() {
        let (mut tree, div, p1, _, text) = sample();
        assert_eq!(tree.append_child(p1, div), Err(DomError::HierarchyRequest));
        assert_eq!(tree.append_child(text, p1), Err(DomError::HierarchyRequest));
        assert_eq!(tree.remove_child(p1, text), Err(DomError::NotAChild));
    }

    #[test]
    fn test_tree_order_and_points() {
        let (tree, div, p1, p2, text) = sample();
        assert_eq!(tree.tree_order(p1, text), Some(Ordering::Less));
        assert_eq!(tree.tree_order(text, div), Some(Ordering::Greater));

        // (div, 1) sits between p1 and p2
        let mid = BoundaryPoint::new(div, 1);
        assert_eq!(
            tree.compare_points(mid, BoundaryPoint::new(text, 0)),
            Some(Ordering::Less)
        );
        assert_eq!(
            tree.compare_points(BoundaryPoint::new(p1, 0), mid),
            Some(Ordering::Less)
        );
        assert_eq!(tree.common_ancestor(p1, text), Some(div));
    }

    #[test]
    fn test_class_helpers() {
        let (mut tree, div, p1, _, text) = sample();
        tree.add_class(div, "sentence-highlight").unwrap();
        tree.add_class(div, "sentence-highlight").unwrap();
        tree.add_class(div, "note").unwrap();
        assert_eq!(tree.get_attribute(div, "class"), Some("sentence-highlight note"));
        assert_eq!(tree.elements_with_class(tree.root(), "note"), vec![div]);

        tree.remove_class(div, "sentence-highlight").unwrap();
        tree.remove_class(div, "note").unwrap();
        assert!(!tree.has_attribute(div, "class"));
        tree.remove_class(p1, "absent").unwrap();
        assert_eq!(tree.add_class(text, "x"), Err(DomError::InvalidNodeType));
    }

    #[test]
    fn test_contenteditable_lookup() {
        let (mut tree, div, p1, p2, text) = sample();
        tree.set_attribute(div, "contenteditable", "").unwrap();
        tree.set_attribute(p2, "contenteditable", "false").unwrap();

        assert!(tree.is_editable(p1));
        assert!(!tree.is_editable(text));
        assert!(!tree.is_editable(tree.root()));
    }

    #[test]
    fn test_shadow_roots_are_separate_trees() {
        let (mut tree, div, _, _, text) = sample();
        let shadow = tree.attach_shadow(div, ShadowRootMode::Open).unwrap();
        let inner = tree.create_text("inside");
        tree.append_child(shadow, inner).unwrap();

        assert_eq!(tree.root_of(inner), shadow);
        assert!(tree.is_connected(inner));
        assert_eq!(tree.tree_order(inner, text), None);
        assert!(!tree.descendants(tree.root()).any(|n| n == inner));
        assert_eq!(tree.shadow_roots(tree.root()), vec![shadow]);
    }
}
