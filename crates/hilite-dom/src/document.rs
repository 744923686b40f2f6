//! Document - High-level document API
//!
//! Owns the tree, the embedded frames hanging off `<iframe>` hosts and the
//! listener registry used by event dispatch.

use std::collections::HashMap;
use std::fmt;

use crate::{DomError, DomResult, DomTree, EventHandler, EventType, NodeId, UiEvent};

/// Browsing context embedded by an `<iframe>`
#[derive(Debug)]
pub enum Frame {
    /// Same-origin content the engine may read and mutate
    Local(Box<Document>),
    /// Content from another origin; never accessible
    CrossOrigin { src: String },
}

struct Listener {
    event_type: EventType,
    handler: EventHandler,
}

/// HTML Document
pub struct Document {
    /// The DOM tree
    pub tree: DomTree,
    /// Document URL
    url: String,
    /// Cached reference to <html> element
    html_element: NodeId,
    /// Cached reference to <head> element
    head_element: NodeId,
    /// Cached reference to <body> element
    body_element: NodeId,
    /// Embedded frames keyed by their `<iframe>` element
    frames: HashMap<NodeId, Frame>,
    /// Event listeners keyed by target node
    listeners: HashMap<NodeId, Vec<Listener>>,
}

impl Document {
    /// Create a new document with an html/head/body skeleton
    pub fn new(url: &str) -> Self {
        let mut doc = Self::empty(url);
        let root = doc.tree.root();
        let html = doc.tree.create_element("html");
        let head = doc.tree.create_element("head");
        let body = doc.tree.create_element("body");

        // Freshly created containers always accept children
        let _ = doc.tree.append_child(root, html);
        let _ = doc.tree.append_child(html, head);
        let _ = doc.tree.append_child(html, body);

        doc.html_element = html;
        doc.head_element = head;
        doc.body_element = body;
        doc
    }

    /// Create an empty document (no structure)
    pub fn empty(url: &str) -> Self {
        Self {
            tree: DomTree::new(),
            url: url.to_string(),
            html_element: NodeId::NONE,
            head_element: NodeId::NONE,
            body_element: NodeId::NONE,
            frames: HashMap::new(),
            listeners: HashMap::new(),
        }
    }

    /// Wrap a tree that was built elsewhere (e.g. by a parser)
    pub fn from_tree(url: &str, tree: DomTree) -> Self {
        let mut doc = Self::empty(url);
        doc.tree = tree;
        doc.finalize();
        doc
    }

    /// Re-locate the html/head/body elements after the tree was built
    pub fn finalize(&mut self) {
        let root = self.tree.root();
        self.html_element = self
            .tree
            .children(root)
            .find(|&c| self.tree.is_element_named(c, "html"))
            .unwrap_or(NodeId::NONE);
        let html = self.html_element;
        let child_named = |tag: &str| {
            self.tree
                .children(html)
                .find(|&c| self.tree.is_element_named(c, tag))
                .unwrap_or(NodeId::NONE)
        };
        let head = child_named("head");
        let body = child_named("body");
        self.head_element = head;
        self.body_element = body;
    }

    /// Get document URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    /// Get <html> element
    pub fn document_element(&self) -> Option<NodeId> {
        self.html_element.is_valid().then_some(self.html_element)
    }

    /// Get <head> element
    pub fn head(&self) -> Option<NodeId> {
        self.head_element.is_valid().then_some(self.head_element)
    }

    /// Get <body> element
    pub fn body(&self) -> Option<NodeId> {
        self.body_element.is_valid().then_some(self.body_element)
    }

    /// Get document title
    pub fn title(&self) -> String {
        self.head()
            .and_then(|head| self.tree.elements_by_tag(head, "title").into_iter().next())
            .map(|title| self.tree.text_content(title).trim().to_string())
            .unwrap_or_default()
    }

    /// Get element by ID (light tree only)
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree
            .descendants(self.tree.root())
            .find(|&n| self.tree.get_attribute(n, "id") == Some(id))
    }

    /// Elements with a tag name in the light tree
    pub fn query_tag(&self, tag: &str) -> Vec<NodeId> {
        self.tree.elements_by_tag(self.tree.root(), tag)
    }

    /// Elements carrying a class in the light tree
    pub fn query_class(&self, class: &str) -> Vec<NodeId> {
        self.tree.elements_with_class(self.tree.root(), class)
    }

    // --- Frames ---

    /// Attach a browsing context to an `<iframe>` element
    pub fn set_frame(&mut self, host: NodeId, frame: Frame) -> DomResult<()> {
        if !self.tree.is_element_named(host, "iframe") {
            return Err(DomError::InvalidNodeType);
        }
        self.frames.insert(host, frame);
        Ok(())
    }

    /// Frame attached to a host
    pub fn frame(&self, host: NodeId) -> Option<&Frame> {
        self.frames.get(&host)
    }

    /// `<iframe>` elements of the light tree that carry a frame, in document order
    pub fn frame_hosts(&self) -> Vec<NodeId> {
        self.query_tag("iframe")
            .into_iter()
            .filter(|host| self.frames.contains_key(host))
            .collect()
    }

    /// Document of a same-origin frame
    pub fn content_document(&self, host: NodeId) -> DomResult<&Document> {
        match self.frames.get(&host) {
            Some(Frame::Local(doc)) => Ok(&**doc),
            Some(Frame::CrossOrigin { .. }) => Err(DomError::Security),
            None => Err(DomError::NotFound(host)),
        }
    }

    /// Mutable document of a same-origin frame
    pub fn content_document_mut(&mut self, host: NodeId) -> DomResult<&mut Document> {
        match self.frames.get_mut(&host) {
            Some(Frame::Local(doc)) => Ok(&mut **doc),
            Some(Frame::CrossOrigin { .. }) => Err(DomError::Security),
            None => Err(DomError::NotFound(host)),
        }
    }

    // --- Events ---

    /// Register a listener on a node
    pub fn add_event_listener(&mut self, target: NodeId, event_type: EventType, handler: EventHandler) {
        self.listeners
            .entry(target)
            .or_default()
            .push(Listener { event_type, handler });
    }

    /// Drop every listener registered on a node, returning how many were removed
    pub fn remove_event_listeners(&mut self, target: NodeId) -> usize {
        self.listeners.remove(&target).map_or(0, |l| l.len())
    }

    /// Number of listeners registered on a node
    pub fn listener_count(&self, target: NodeId) -> usize {
        self.listeners.get(&target).map_or(0, |l| l.len())
    }

    fn handlers_for(&self, node: NodeId, event_type: EventType) -> Vec<EventHandler> {
        self.listeners
            .get(&node)
            .map(|list| {
                list.iter()
                    .filter(|l| l.event_type == event_type)
                    .map(|l| l.handler.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Propagation path: the target, then (for bubbling events) its
    /// ancestors, crossing from each shadow root to its host
    fn event_path(&self, target: NodeId, bubbles: bool) -> Vec<NodeId> {
        let mut path = vec![target];
        if !bubbles {
            return path;
        }
        let mut cur = target;
        loop {
            let next = self.tree.parent(cur).or_else(|| self.tree.shadow_host(cur));
            match next {
                Some(n) => {
                    path.push(n);
                    cur = n;
                }
                None => break,
            }
        }
        path
    }

    /// Dispatch an event at a node. The path is fixed before any handler
    /// runs, so handlers may freely restructure the tree.
    pub fn dispatch_event(&mut self, target: NodeId, event_type: EventType) -> UiEvent {
        let mut event = UiEvent::new(event_type, target);
        let path = self.event_path(target, event.bubbles());

        for node in path {
            event.current_target = Some(node);
            for handler in self.handlers_for(node, event_type) {
                handler(self, &mut event);
            }
            if event.propagation_stopped() {
                break;
            }
        }
        event.current_target = None;

        tracing::trace!(
            event = event_type.as_str(),
            ?target,
            prevented = event.is_default_prevented(),
            "dispatched"
        );
        event
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("url", &self.url)
            .field("nodes", &self.tree.len())
            .field("frames", &self.frames)
            .field("listeners", &self.listeners.values().map(Vec::len).sum::<usize>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn test_document_skeleton() {
        let doc = Document::new("about:blank");
        let html = doc.document_element().unwrap();
        let body = doc.body().unwrap();
        assert_eq!(doc.tree.parent(body), Some(html));
        assert_eq!(doc.url(), "about:blank");
        assert!(Document::empty("x").body().is_none());
    }

    #[test]
    fn test_get_element_by_id() {
        let mut doc = Document::new("test");
        let body = doc.body().unwrap();
        let p = doc.tree.create_element("p");
        doc.tree.set_attribute(p, "id", "intro").unwrap();
        doc.tree.append_child(body, p).unwrap();

        assert_eq!(doc.get_element_by_id("intro"), Some(p));
        assert_eq!(doc.get_element_by_id("missing"), None);
        assert_eq!(doc.query_tag("p"), vec![p]);
    }

    #[test]
    fn test_frames() {
        let mut doc = Document::new("test");
        let body = doc.body().unwrap();
        let local = doc.tree.create_element("iframe");
        let remote = doc.tree.create_element("iframe");
        doc.tree.append_child(body, local).unwrap();
        doc.tree.append_child(body, remote).unwrap();
        doc.set_frame(local, Frame::Local(Box::new(Document::new("about:srcdoc"))))
            .unwrap();
        doc.set_frame(
            remote,
            Frame::CrossOrigin {
                src: "https://elsewhere.example/".into(),
            },
        )
        .unwrap();

        assert_eq!(doc.frame_hosts(), vec![local, remote]);
        assert!(doc.content_document_mut(local).is_ok());
        assert_eq!(
            doc.content_document_mut(remote).map(|_| ()),
            Err(DomError::Security)
        );
        let not_a_frame = Frame::CrossOrigin { src: String::new() };
        assert_eq!(doc.set_frame(body, not_a_frame), Err(DomError::InvalidNodeType));
    }

    #[test]
    fn test_click_bubbles_and_stops() {
        let mut doc = Document::new("test");
        let body = doc.body().unwrap();
        let span = doc.tree.create_element("span");
        let button = doc.tree.create_element("div");
        doc.tree.append_child(body, span).unwrap();
        doc.tree.append_child(span, button).unwrap();

        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = seen.clone();
        doc.add_event_listener(
            span,
            EventType::Click,
            Rc::new(move |_: &mut Document, e: &mut UiEvent| log.borrow_mut().push(e.current_target)),
        );
        let log = seen.clone();
        doc.add_event_listener(
            body,
            EventType::Click,
            Rc::new(move |_: &mut Document, e: &mut UiEvent| log.borrow_mut().push(e.current_target)),
        );

        doc.dispatch_event(button, EventType::Click);
        assert_eq!(*seen.borrow(), vec![Some(span), Some(body)]);

        seen.borrow_mut().clear();
        doc.add_event_listener(
            button,
            EventType::Click,
            Rc::new(|_: &mut Document, e: &mut UiEvent| e.stop_propagation()),
        );
        doc.dispatch_event(button, EventType::Click);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_handler_may_mutate_document() {
        let mut doc = Document::new("test");
        let body = doc.body().unwrap();
        let span = doc.tree.create_element("span");
        doc.tree.append_child(body, span).unwrap();
        doc.add_event_listener(
            span,
            EventType::Click,
            Rc::new(move |doc: &mut Document, _: &mut UiEvent| {
                doc.tree.detach(span);
                doc.remove_event_listeners(span);
            }),
        );

        let event = doc.dispatch_event(span, EventType::Click);
        assert!(!event.propagation_stopped());
        assert_eq!(doc.tree.parent(span), None);
        assert_eq!(doc.listener_count(span), 0);
    }

    #[test]
    fn test_pointer_events_stay_on_target() {
        let mut doc = Document::new("test");
        let body = doc.body().unwrap();
        let span = doc.tree.create_element("span");
        doc.tree.append_child(body, span).unwrap();

        let hits = Rc::new(RefCell::new(0));
        let count = hits.clone();
        doc.add_event_listener(
            body,
            EventType::PointerEnter,
            Rc::new(move |_: &mut Document, _: &mut UiEvent| *count.borrow_mut() += 1),
        );
        doc.dispatch_event(span, EventType::PointerEnter);
        assert_eq!(*hits.borrow(), 0);
    }
}
