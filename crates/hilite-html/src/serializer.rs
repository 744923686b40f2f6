//! HTML Serialization (innerHTML/outerHTML)
//!
//! Shadow roots are written as declarative `<template shadowrootmode>`
//! children of their host. Same-origin frames that came from `srcdoc`
//! get their current content written back into that attribute, so edits
//! made inside a frame survive a round trip.

use hilite_dom::{Document, DomTree, Frame, NodeData, NodeId};

/// Void elements (self-closing, no end tag)
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Raw text elements (no escaping for content)
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// HTML serializer
#[derive(Debug, Default)]
pub struct HtmlSerializer;

impl HtmlSerializer {
    pub fn new() -> Self {
        Self
    }

    /// Serialize a whole document
    pub fn serialize_document(&self, document: &Document) -> String {
        let mut output = String::new();
        self.serialize_children(Some(document), &document.tree, document.tree.root(), &mut output);
        output
    }

    /// Serialize innerHTML of a node (children only)
    pub fn serialize_inner(&self, tree: &DomTree, node_id: NodeId) -> String {
        let mut output = String::new();
        self.serialize_children(None, tree, node_id, &mut output);
        output
    }

    /// Serialize outerHTML of a node (including the node itself)
    pub fn serialize_outer(&self, tree: &DomTree, node_id: NodeId) -> String {
        let mut output = String::new();
        self.serialize_node(None, tree, node_id, &mut output);
        output
    }

    /// Serialize a node and its descendants
    fn serialize_node(&self, document: Option<&Document>, tree: &DomTree, node_id: NodeId, output: &mut String) {
        let Some(node) = tree.get(node_id) else {
            return;
        };

        match &node.data {
            NodeData::Document | NodeData::ShadowRoot(_) => {
                self.serialize_children(document, tree, node_id, output);
            }
            NodeData::Element(elem) => {
                let tag = tree.resolve(elem.name);
                let is_void = VOID_ELEMENTS.contains(&tag);
                let is_raw = RAW_TEXT_ELEMENTS.contains(&tag);
                let srcdoc = document.and_then(|d| self.frame_source(d, node_id));

                // Start tag
                output.push('<');
                output.push_str(tag);
                for attr in elem.attrs.iter() {
                    let name = tree.resolve(attr.name);
                    let value = match (&srcdoc, name) {
                        (Some(frame_html), "srcdoc") => frame_html.as_str(),
                        _ => attr.value.as_str(),
                    };
                    output.push(' ');
                    output.push_str(name);
                    if !value.is_empty() {
                        output.push_str("=\"");
                        escape_attribute(value, output);
                        output.push('"');
                    }
                }

                if is_void {
                    output.push_str(" />");
                    return;
                }
                output.push('>');

                if let Some(shadow) = elem.shadow_root
                    && let Some(root) = tree.get(shadow).and_then(|n| n.as_shadow_root())
                {
                    output.push_str("<template shadowrootmode=\"");
                    output.push_str(root.mode.as_str());
                    output.push_str("\">");
                    self.serialize_children(document, tree, shadow, output);
                    output.push_str("</template>");
                }

                if is_raw {
                    self.serialize_children_raw(tree, node_id, output);
                } else {
                    self.serialize_children(document, tree, node_id, output);
                }

                output.push_str("</");
                output.push_str(tag);
                output.push('>');
            }
            NodeData::Text(text) => {
                escape_text(text, output);
            }
            NodeData::Comment(text) => {
                output.push_str("<!--");
                output.push_str(text);
                output.push_str("-->");
            }
            NodeData::Doctype { name } => {
                output.push_str("<!DOCTYPE ");
                output.push_str(name);
                output.push('>');
            }
        }
    }

    fn serialize_children(&self, document: Option<&Document>, tree: &DomTree, parent_id: NodeId, output: &mut String) {
        for child_id in tree.children(parent_id) {
            self.serialize_node(document, tree, child_id, output);
        }
    }

    fn serialize_children_raw(&self, tree: &DomTree, parent_id: NodeId, output: &mut String) {
        for child_id in tree.children(parent_id) {
            if let Some(text) = tree.text(child_id) {
                output.push_str(text);
            }
        }
    }

    /// Current HTML of a same-origin frame that was declared through `srcdoc`
    fn frame_source(&self, document: &Document, host: NodeId) -> Option<String> {
        if !document.tree.has_attribute(host, "srcdoc") {
            return None;
        }
        match document.frame(host)? {
            Frame::Local(inner) => Some(self.serialize_document(inner)),
            Frame::CrossOrigin { .. } => None,
        }
    }
}

/// Escape text content for HTML
fn escape_text(text: &str, output: &mut String) {
    for c in text.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '\u{a0}' => output.push_str("&nbsp;"),
            _ => output.push(c),
        }
    }
}

/// Escape attribute value
fn escape_attribute(text: &str, output: &mut String) {
    for c in text.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '"' => output.push_str("&quot;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '\u{a0}' => output.push_str("&nbsp;"),
            _ => output.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_outer() {
        let mut tree = DomTree::new();
        let p = tree.create_element("p");
        tree.set_attribute(p, "title", "a \"quote\"").unwrap();
        let text = tree.create_text("1 < 2 & 3");
        let br = tree.create_element("br");
        tree.append_child(p, text).unwrap();
        tree.append_child(p, br).unwrap();

        assert_eq!(
            HtmlSerializer::new().serialize_outer(&tree, p),
            "<p title=\"a &quot;quote&quot;\">1 &lt; 2 &amp; 3<br /></p>"
        );
    }

    #[test]
    fn test_raw_text_and_shadow() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        let style = tree.create_element("style");
        let css = tree.create_text("p > b { color: red }");
        tree.append_child(div, style).unwrap();
        tree.append_child(style, css).unwrap();
        let shadow = tree
            .attach_shadow(div, hilite_dom::ShadowRootMode::Closed)
            .unwrap();
        let inner = tree.create_text("hidden");
        tree.append_child(shadow, inner).unwrap();

        assert_eq!(
            HtmlSerializer::new().serialize_outer(&tree, div),
            "<div><template shadowrootmode=\"closed\">hidden</template><style>p > b { color: red }</style></div>"
        );
    }
}
