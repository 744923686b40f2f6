//! Highlight removal
//!
//! Markers wholly covered by the range are unwrapped. A marker holding one
//! of the range boundaries is split into up to three pieces: the parts
//! before and after the range stay highlighted in the marker's color, the
//! part inside becomes plain text.

use std::cmp::Ordering;

use hilite_css::StyleResolver;
use hilite_dom::{BoundaryPoint, Document, DomError, DomTree, NodeId, PositionComparison, Range};

use crate::HighlightConfig;
use crate::annotate::replace_with;
use crate::marker::{COLOR_ATTR, INDEX_ATTR};
use crate::walker::{RangeWalker, WalkMode};

/// What a clear pass did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClearReport {
    /// Markers replaced by their content
    pub unwrapped: usize,
    /// Markers split around a range boundary
    pub split: usize,
}

/// One piece of a split marker
#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Highlighted(String),
    Plain(String),
}

#[derive(Debug)]
enum Removal {
    Unwrap(NodeId),
    Split {
        marker: NodeId,
        pieces: Vec<Piece>,
        color: String,
        slot: Option<String>,
    },
}

/// Removes markers intersecting a range
#[derive(Debug, Clone, Copy)]
pub struct Remover<'a> {
    config: &'a HighlightConfig,
}

impl<'a> Remover<'a> {
    pub fn new(config: &'a HighlightConfig) -> Self {
        Self { config }
    }

    /// Clear the markers `range` touches in `document`
    pub fn remove(&self, document: &mut Document, range: &Range) -> ClearReport {
        let plans = self.plan(&document.tree, range);
        let mut report = ClearReport::default();

        for removal in plans {
            let result = match &removal {
                Removal::Unwrap(marker) => self.unwrap(document, *marker).map(|_| report.unwrapped += 1),
                Removal::Split {
                    marker,
                    pieces,
                    color,
                    slot,
                } => self
                    .split(document, *marker, pieces, color, slot.as_deref())
                    .map(|_| report.split += 1),
            };
            if let Err(err) = result {
                tracing::debug!(?removal, error = %err, "marker left in place");
            }
        }
        report
    }

    /// Outermost marker around the common ancestor, else the ancestor
    /// itself; a selection inside one marker still finds that marker
    fn scope_root(&self, tree: &DomTree, common: NodeId) -> NodeId {
        std::iter::once(common)
            .chain(tree.ancestors(common))
            .filter(|&a| tree.has_class(a, &self.config.marker_class))
            .last()
            .unwrap_or(common)
    }

    fn plan(&self, tree: &DomTree, range: &Range) -> Vec<Removal> {
        let root = self.scope_root(tree, range.common_ancestor_container());
        let markers = RangeWalker::new(range, &self.config.marker_class).collect(tree, root, WalkMode::Remove);
        tracing::debug!(?root, markers = markers.len(), "clearing scope");

        let mut resolver = None;
        markers
            .into_iter()
            .map(|marker| {
                let (holds_start, holds_end) = held_boundaries(tree, range, marker);
                if !holds_start && !holds_end {
                    return Removal::Unwrap(marker);
                }

                let texts = self.text_nodes(tree, marker);
                let content: String = texts.iter().filter_map(|&t| tree.text(t)).collect();
                let len = content.chars().count();
                let end = if holds_end { text_offset(tree, &texts, range.end()).min(len) } else { len };
                let start = if holds_start { text_offset(tree, &texts, range.start()).min(end) } else { 0 };

                let color = match tree.get_attribute(marker, COLOR_ATTR) {
                    Some(color) => color.to_string(),
                    None => resolver
                        .get_or_insert_with(|| StyleResolver::for_tree(tree))
                        .compute_style(tree, marker)
                        .background_color()
                        .to_string(),
                };

                Removal::Split {
                    marker,
                    pieces: split_pieces(&content, start, end),
                    color,
                    slot: tree.get_attribute(marker, INDEX_ATTR).map(str::to_string),
                }
            })
            .collect()
    }

    /// Sentence text nodes of a marker, leaving out its dismiss control
    fn text_nodes(&self, tree: &DomTree, marker: NodeId) -> Vec<NodeId> {
        tree.descendants(marker)
            .filter(|&n| tree.text(n).is_some())
            .filter(|&n| {
                !tree
                    .ancestors(n)
                    .take_while(|&a| a != marker)
                    .any(|a| tree.has_class(a, &self.config.dismiss_class))
            })
            .collect()
    }

    fn controls(&self, tree: &DomTree, marker: NodeId) -> Vec<NodeId> {
        tree.children(marker)
            .filter(|&c| tree.has_class(c, &self.config.dismiss_class))
            .collect()
    }

    fn unwrap(&self, document: &mut Document, marker: NodeId) -> Result<(), DomError> {
        let controls = self.controls(&document.tree, marker);
        let content: Vec<NodeId> = document
            .tree
            .children(marker)
            .filter(|c| !controls.contains(c))
            .collect();

        replace_with(&mut document.tree, marker, &content)?;
        self.forget(document, marker, &controls);
        Ok(())
    }

    fn split(
        &self,
        document: &mut Document,
        marker: NodeId,
        pieces: &[Piece],
        color: &str,
        slot: Option<&str>,
    ) -> Result<(), DomError> {
        let controls = self.controls(&document.tree, marker);
        let tree = &mut document.tree;
        let mut nodes = Vec::with_capacity(pieces.len());
        for piece in pieces {
            let node = match piece {
                Piece::Plain(text) => tree.create_text(text),
                Piece::Highlighted(text) => {
                    let span = tree.create_element("span");
                    tree.add_class(span, &self.config.marker_class)?;
                    tree.set_attribute(span, "style", &format!("background-color: {color};"))?;
                    tree.set_attribute(span, COLOR_ATTR, color)?;
                    if let Some(slot) = slot {
                        tree.set_attribute(span, INDEX_ATTR, slot)?;
                    }
                    let content = tree.create_text(text);
                    tree.append_child(span, content)?;
                    span
                }
            };
            nodes.push(node);
        }

        replace_with(tree, marker, &nodes)?;
        self.forget(document, marker, &controls);
        Ok(())
    }

    fn forget(&self, document: &mut Document, marker: NodeId, controls: &[NodeId]) {
        document.remove_event_listeners(marker);
        for &control in controls {
            document.remove_event_listeners(control);
        }
    }
}

/// Whether the range starts and ends inside `node`: the point just
/// before the node precedes the range, or the point just after it
/// follows the range
fn held_boundaries(tree: &DomTree, range: &Range, node: NodeId) -> (bool, bool) {
    let Some(parent) = tree.parent(node) else {
        return (false, false);
    };
    let index = tree.index_of(node);
    let holds_start = range.compare_point(tree, parent, index) == Ok(PositionComparison::Before);
    let holds_end = range.compare_point(tree, parent, index + 1) == Ok(PositionComparison::After);
    (holds_start, holds_end)
}

/// Character offset of `point` within the text of `texts`
fn text_offset(tree: &DomTree, texts: &[NodeId], point: BoundaryPoint) -> usize {
    let mut offset = 0;
    for &text in texts {
        let len = tree.text(text).map_or(0, |t| t.chars().count());
        if text == point.node {
            return offset + (point.offset as usize).min(len);
        }
        match tree.compare_points(BoundaryPoint::new(text, len as u32), point) {
            Some(Ordering::Less | Ordering::Equal) => offset += len,
            _ => break,
        }
    }
    offset
}

/// Cut `content` at two char offsets into non-empty pieces
fn split_pieces(content: &str, start: usize, end: usize) -> Vec<Piece> {
    let byte_at = |chars: usize| {
        content
            .char_indices()
            .nth(chars)
            .map_or(content.len(), |(i, _)| i)
    };
    let (start, end) = (byte_at(start), byte_at(end));

    let mut pieces = Vec::with_capacity(3);
    if start > 0 {
        pieces.push(Piece::Highlighted(content[..start].to_string()));
    }
    if end > start {
        pieces.push(Piece::Plain(content[start..end].to_string()));
    }
    if end < content.len() {
        pieces.push(Piece::Highlighted(content[end..].to_string()));
    }
    pieces
}
