//! HTML5 Parser implementation
//!
//! Uses html5ever's RcDom and converts it to our DOM format. Whitespace
//! text is kept so offsets into the parsed tree match the source text.
//! Declarative shadow roots (`<template shadowrootmode>`) are attached to
//! their parent, and every `<iframe>` gets a frame: `srcdoc` content is
//! parsed as a local document, `src` pointing anywhere but `about:blank`
//! is treated as cross-origin.

use hilite_dom::{Document, DomTree, Frame, NodeId, ShadowRoot, ShadowRootMode};
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

use crate::ParseError;

type Attributes = [html5ever::Attribute];

/// HTML5 parser
#[derive(Debug, Default)]
pub struct HtmlParser;

impl HtmlParser {
    /// Create a new HTML parser
    pub fn new() -> Self {
        Self
    }

    /// Parse HTML string into a Document
    pub fn parse(&self, html: &str) -> Result<Document, ParseError> {
        self.parse_with_url(html, "about:blank")
    }

    /// Parse HTML with a document URL
    pub fn parse_with_url(&self, html: &str, url: &str) -> Result<Document, ParseError> {
        tracing::debug!(url, "parsing HTML document");

        let dom = parse_document(RcDom::default(), Default::default())
            .from_utf8()
            .read_from(&mut html.as_bytes())?;

        let mut document = Document::empty(url);
        let mut frames = Vec::new();
        self.convert_children(&dom.document, document.tree_mut(), NodeId::ROOT, &mut frames)?;
        document.finalize();
        for (host, frame) in frames {
            document.set_frame(host, frame)?;
        }

        tracing::debug!(
            nodes = document.tree().len(),
            frames = document.frame_hosts().len(),
            "parsed document"
        );
        Ok(document)
    }

    fn convert_children(
        &self,
        handle: &Handle,
        tree: &mut DomTree,
        parent: NodeId,
        frames: &mut Vec<(NodeId, Frame)>,
    ) -> Result<(), ParseError> {
        for child in handle.children.borrow().iter() {
            self.convert_node(child, tree, parent, frames)?;
        }
        Ok(())
    }

    /// Convert an RcDom node to our DOM format
    fn convert_node(
        &self,
        handle: &Handle,
        tree: &mut DomTree,
        parent: NodeId,
        frames: &mut Vec<(NodeId, Frame)>,
    ) -> Result<(), ParseError> {
        match &handle.data {
            RcNodeData::Document => {
                self.convert_children(handle, tree, parent, frames)?;
            }
            RcNodeData::Doctype { name, .. } => {
                let id = tree.create_doctype(name);
                tree.append_child(parent, id)?;
            }
            RcNodeData::Text { contents } => {
                let id = tree.create_text(&contents.borrow());
                tree.append_child(parent, id)?;
            }
            RcNodeData::Comment { contents } => {
                let id = tree.create_comment(contents);
                tree.append_child(parent, id)?;
            }
            RcNodeData::Element {
                name,
                attrs,
                template_contents,
                ..
            } => {
                let attrs = attrs.borrow();
                let tag: &str = &name.local;
                let contents = template_contents.borrow();
                // Template children live in a separate fragment
                let source = contents.as_ref().unwrap_or(handle);

                if tag == "template"
                    && let Some(shadow) = self.declarative_shadow(tree, parent, &attrs)?
                {
                    return self.convert_children(source, tree, shadow, frames);
                }

                let id = tree.create_element(tag);
                for attr in attrs.iter() {
                    tree.set_attribute(id, &attr.name.local, &attr.value)?;
                }
                tree.append_child(parent, id)?;

                if tag == "iframe" {
                    frames.push((id, self.frame_for(&attrs)?));
                }
                self.convert_children(source, tree, id, frames)?;
            }
            RcNodeData::ProcessingInstruction { .. } => {}
        }
        Ok(())
    }

    /// Attach a shadow root for `<template shadowrootmode>` when the parent
    /// can host one; otherwise the template stays an ordinary element
    fn declarative_shadow(
        &self,
        tree: &mut DomTree,
        host: NodeId,
        attrs: &Attributes,
    ) -> Result<Option<NodeId>, ParseError> {
        let Some(mode) = attribute(attrs, "shadowrootmode").and_then(ShadowRootMode::from_attr)
        else {
            return Ok(None);
        };
        let can_host = tree.get(host).is_some_and(|n| n.is_element()) && tree.shadow_root(host).is_none();
        if !can_host {
            tracing::trace!(?host, "ignoring declarative shadow root");
            return Ok(None);
        }
        Ok(Some(tree.attach_shadow_root(ShadowRoot::declarative(host, mode))?))
    }

    /// Browsing context for an `<iframe>`
    fn frame_for(&self, attrs: &Attributes) -> Result<Frame, ParseError> {
        if let Some(srcdoc) = attribute(attrs, "srcdoc") {
            let inner = self.parse_with_url(srcdoc, "about:srcdoc")?;
            return Ok(Frame::Local(Box::new(inner)));
        }
        match attribute(attrs, "src").map(str::trim) {
            Some(src) if !src.is_empty() && !src.eq_ignore_ascii_case("about:blank") => {
                Ok(Frame::CrossOrigin {
                    src: src.to_string(),
                })
            }
            _ => Ok(Frame::Local(Box::new(Document::new("about:blank")))),
        }
    }
}

fn attribute<'a>(attrs: &'a Attributes, name: &str) -> Option<&'a str> {
    attrs
        .iter()
        .find(|a| &*a.name.local == name)
        .map(|a| &*a.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let html = "<html><head><title>Test</title></head><body><p>Hello</p></body></html>";
        let doc = HtmlParser::new().parse(html).unwrap();

        assert_eq!(doc.title(), "Test");
        let body = doc.body().unwrap();
        assert_eq!(doc.tree.text_content(body), "Hello");
    }

    #[test]
    fn test_keeps_whitespace_text() {
        let doc = HtmlParser::new()
            .parse("<body><p>One</p> <p>Two</p></body>")
            .unwrap();
        let body = doc.body().unwrap();
        assert_eq!(doc.tree.child_count(body), 3);
        assert_eq!(doc.tree.text_content(body), "One Two");
    }

    #[test]
    fn test_declarative_shadow_root() {
        let html = r#"<body><div id="host"><template shadowrootmode="open"><p>Inside</p></template>Light</div></body>"#;
        let doc = HtmlParser::new().parse(html).unwrap();
        let host = doc.get_element_by_id("host").unwrap();
        let shadow = doc.tree.shadow_root(host).unwrap();

        assert_eq!(doc.tree.text_content(shadow), "Inside");
        assert_eq!(doc.tree.text_content(host), "Light");
        assert!(doc.tree.elements_by_tag(host, "template").is_empty());
    }

    #[test]
    fn test_frames() {
        let html = r#"<body>
            <iframe id="local" srcdoc="<p>Framed text.</p>"></iframe>
            <iframe id="remote" src="https://elsewhere.example/"></iframe>
            <iframe id="blank"></iframe>
        </body>"#;
        let mut doc = HtmlParser::new().parse(html).unwrap();
        let local = doc.get_element_by_id("local").unwrap();
        let remote = doc.get_element_by_id("remote").unwrap();
        let blank = doc.get_element_by_id("blank").unwrap();

        assert_eq!(doc.frame_hosts(), vec![local, remote, blank]);
        let inner = doc.content_document_mut(local).unwrap();
        let inner_body = inner.body().unwrap();
        assert_eq!(inner.tree.text_content(inner_body), "Framed text.");
        assert!(doc.content_document_mut(remote).is_err());
        assert!(doc.content_document(blank).unwrap().body().is_some());
    }
}
