//! Annotation of one scope
//!
//! Every eligible text node is split into sentences and replaced by
//! `marker, separator, marker, separator, ...`. All reads (walk, styles,
//! sentences) happen before the first write.

use hilite_css::StyleResolver;
use hilite_dom::{Document, DomError, DomTree, NodeId, Range};

use crate::marker::MarkerBuilder;
use crate::palette::PassContext;
use crate::segment::split_sentences;
use crate::snapshot::StyleSnapshot;
use crate::walker::{RangeWalker, WalkMode};
use crate::{HighlightConfig, HighlightError};

/// Work planned for one text node
#[derive(Debug)]
struct WrapPlan {
    node: NodeId,
    sentences: Vec<String>,
    snapshot: StyleSnapshot,
}

/// Wraps the sentences of one scope
#[derive(Debug, Clone, Copy)]
pub struct Annotator<'a> {
    config: &'a HighlightConfig,
}

impl<'a> Annotator<'a> {
    pub fn new(config: &'a HighlightConfig) -> Self {
        Self { config }
    }

    /// Wrap every eligible text node under `root`, returning the number of
    /// markers created. A node that cannot be wrapped is left untouched.
    pub fn annotate_scope(
        &self,
        document: &mut Document,
        root: NodeId,
        range: &Range,
        pass: &mut PassContext,
    ) -> usize {
        let plans = self.plan(&document.tree, root, range);
        tracing::debug!(?root, url = document.url(), text_nodes = plans.len(), "annotating scope");

        let mut markers = 0;
        for plan in plans {
            match self.wrap(document, &plan, pass) {
                Ok(count) => markers += count,
                Err(err) => tracing::debug!(node = ?plan.node, error = %err, "text node skipped"),
            }
        }
        markers
    }

    fn plan(&self, tree: &DomTree, root: NodeId, range: &Range) -> Vec<WrapPlan> {
        let nodes = RangeWalker::new(range, &self.config.marker_class).collect(tree, root, WalkMode::Annotate);
        if nodes.is_empty() {
            return Vec::new();
        }

        let resolver = StyleResolver::for_tree(tree);
        nodes
            .into_iter()
            .filter_map(|node| {
                let container = tree.parent(node)?;
                let sentences = split_sentences(tree.text(node)?);
                Some(WrapPlan {
                    node,
                    sentences,
                    snapshot: StyleSnapshot::capture(&resolver, tree, container),
                })
            })
            .collect()
    }

    fn wrap(
        &self,
        document: &mut Document,
        plan: &WrapPlan,
        pass: &mut PassContext,
    ) -> Result<usize, HighlightError> {
        if plan.sentences.is_empty() {
            return Ok(0);
        }

        let builder = MarkerBuilder::new(self.config);
        let mut markers = Vec::with_capacity(plan.sentences.len());
        let mut replacement = Vec::with_capacity(plan.sentences.len() * 2);
        for sentence in &plan.sentences {
            let marker = builder.build(&mut document.tree, sentence, &plan.snapshot, pass)?;
            replacement.push(marker.element);
            replacement.push(document.tree.create_text(&self.config.separator));
            markers.push(marker);
        }

        replace_with(&mut document.tree, plan.node, &replacement)?;
        for marker in &markers {
            builder.attach_handlers(document, marker, pass.theme());
        }
        Ok(markers.len())
    }
}

/// Put `nodes` where `old` was, in order, and detach `old`
pub(crate) fn replace_with(tree: &mut DomTree, old: NodeId, nodes: &[NodeId]) -> Result<(), DomError> {
    let parent = tree.parent(old).ok_or(DomError::NotAChild)?;
    for &node in nodes {
        tree.insert_before(parent, node, Some(old))?;
    }
    tree.remove_child(parent, old)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Theme;
    use crate::marker::COLOR_ATTR;
    use crate::palette::Palette;

    #[test]
    fn test_wraps_each_sentence() {
        let mut doc = Document::new("test");
        let body = doc.body().unwrap();
        let p = doc.tree.create_element("p");
        let text = doc.tree.create_text("First one. Second one!");
        doc.tree.append_child(body, p).unwrap();
        doc.tree.append_child(p, text).unwrap();

        let config = HighlightConfig::default();
        let mut pass = PassContext::new(Palette::for_theme(&config, Theme::Light).unwrap(), Theme::Light);
        let range = Range::select_node_contents(&doc.tree, p).unwrap();
        let made = Annotator::new(&config).annotate_scope(&mut doc, p, &range, &mut pass);

        assert_eq!(made, 2);
        let children: Vec<NodeId> = doc.tree.children(p).collect();
        assert_eq!(children.len(), 4);
        assert!(doc.tree.has_class(children[0], "sentence-highlight"));
        assert_eq!(doc.tree.text(children[1]), Some(" "));
        assert_eq!(
            doc.tree.get_attribute(children[2], COLOR_ATTR),
            Some("rgba(212, 241, 244, 0.5)")
        );
        assert_eq!(doc.query_class("sentence-highlight").len(), 2);
        assert_eq!(doc.listener_count(children[0]), 2);
    }

    #[test]
    fn test_replace_with_needs_parent() {
        let mut tree = DomTree::new();
        let lone = tree.create_text("alone");
        assert_eq!(replace_with(&mut tree, lone, &[]), Err(DomError::NotAChild));
    }
}
