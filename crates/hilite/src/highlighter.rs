//! Highlighter - entry point for annotate and clear

use hilite_dom::{Document, NodeId, Selection, TreeId};

use crate::annotate::Annotator;
use crate::palette::{Palette, PassContext};
use crate::remove::{ClearReport, Remover};
use crate::theme::{Theme, ThemeDetector};
use crate::{HighlightConfig, HighlightError};

/// What an annotation pass did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnnotateReport {
    /// The selection was empty; the document was not touched
    pub nothing_selected: bool,
    /// Theme the palette was picked for
    pub theme: Option<Theme>,
    /// Markers created across all scopes
    pub markers: usize,
    /// Scopes walked (main tree, frames, shadow roots)
    pub scopes: usize,
    /// Frames that could not be entered
    pub skipped_scopes: usize,
}

impl AnnotateReport {
    fn nothing_selected() -> Self {
        Self {
            nothing_selected: true,
            ..Self::default()
        }
    }
}

/// Sentence highlighter
#[derive(Debug, Clone, Default)]
pub struct Highlighter {
    config: HighlightConfig,
}

impl Highlighter {
    /// Create a highlighter with the given configuration
    pub fn new(config: HighlightConfig) -> Self {
        Self { config }
    }

    /// Get highlighter configuration
    pub fn config(&self) -> &HighlightConfig {
        &self.config
    }

    /// Wrap every sentence the selection touches.
    ///
    /// The main tree is walked under the range's common ancestor, then the
    /// body of every same-origin frame, then every shadow root. Only nodes
    /// the range actually covers are wrapped, so scopes the selection does
    /// not reach stay untouched. One color sequence runs through the whole
    /// pass.
    pub fn annotate(
        &self,
        document: &mut Document,
        selection: &Selection,
    ) -> Result<AnnotateReport, HighlightError> {
        let Some(range) = selection.get_range_at(0).filter(|r| !r.collapsed()).cloned() else {
            tracing::info!("nothing selected, nothing to annotate");
            return Ok(AnnotateReport::nothing_selected());
        };

        let theme = ThemeDetector::new(self.config.dark_threshold).detect(document);
        let mut pass = PassContext::new(Palette::for_theme(&self.config, theme)?, theme);
        let annotator = Annotator::new(&self.config);
        let mut report = AnnotateReport {
            theme: Some(theme),
            ..AnnotateReport::default()
        };

        if range.tree_id() == document.tree.id() {
            report.markers += annotator.annotate_scope(document, range.common_ancestor_container(), &range, &mut pass);
            report.scopes += 1;
        }

        for host in document.frame_hosts() {
            match document.content_document_mut(host) {
                Ok(frame) => {
                    let Some(body) = frame.body() else {
                        continue;
                    };
                    report.markers += annotator.annotate_scope(frame, body, &range, &mut pass);
                    report.scopes += 1;
                }
                Err(err) => {
                    tracing::debug!(?host, error = %err, "skipping inaccessible frame");
                    report.skipped_scopes += 1;
                }
            }
        }

        for shadow in document.tree.shadow_roots(document.tree.root()) {
            report.markers += annotator.annotate_scope(document, shadow, &range, &mut pass);
            report.scopes += 1;
        }

        tracing::info!(
            %theme,
            markers = report.markers,
            scopes = report.scopes,
            skipped = report.skipped_scopes,
            "annotated selection"
        );
        Ok(report)
    }

    /// Remove highlights inside the selection, splitting markers that
    /// straddle its edges, then clear the selection
    pub fn clear(
        &self,
        document: &mut Document,
        selection: &mut Selection,
    ) -> Result<ClearReport, HighlightError> {
        let Some(range) = selection.get_range_at(0).filter(|r| !r.collapsed()).cloned() else {
            return Err(HighlightError::NothingSelected);
        };

        let report = match document_for_tree(document, range.tree_id()) {
            Some(scope) => Remover::new(&self.config).remove(scope, &range),
            None => {
                tracing::debug!("selection belongs to no reachable document");
                ClearReport::default()
            }
        };
        selection.remove_all_ranges();

        tracing::info!(
            unwrapped = report.unwrapped,
            split = report.split,
            "cleared highlights"
        );
        Ok(report)
    }
}

/// The document (or same-origin frame document) owning a tree
fn document_for_tree(document: &mut Document, tree: TreeId) -> Option<&mut Document> {
    if document.tree.id() == tree {
        return Some(document);
    }
    let host: NodeId = document
        .frame_hosts()
        .into_iter()
        .find(|&h| document.content_document(h).is_ok_and(|d| d.tree.id() == tree))?;
    document.content_document_mut(host).ok()
}
