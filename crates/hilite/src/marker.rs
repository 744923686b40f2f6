//! Highlight markers
//!
//! A marker is a `span` holding one sentence plus a hidden dismiss control:
//!
//! ```text
//! <span class="sentence-highlight" style="..." data-highlight-color="..." data-highlight-index="N">
//!   sentence text
//!   <div class="dismiss-highlight" style="display: none; ...">×</div>
//! </span>
//! ```
//!
//! Markers are built detached; handlers are attached once the marker is
//! in the tree.

use std::rc::Rc;

use hilite_css::{StyleDeclaration, set_inline_style, set_style_property};
use hilite_dom::{Document, DomResult, DomTree, EventType, NodeId, UiEvent};

use crate::palette::{PassContext, Swatch};
use crate::snapshot::StyleSnapshot;
use crate::{HighlightConfig, HighlightError, Theme};

/// Attribute recording the exact palette color of a marker
pub const COLOR_ATTR: &str = "data-highlight-color";
/// Attribute recording the palette slot of a marker
pub const INDEX_ATTR: &str = "data-highlight-index";

const DARK_TEXT_SHADOW: &str = "0 1px 1px rgba(0,0,0,0.2)";
const HOVER_SHADOW: &str = "0 2px 4px rgba(0,0,0,0.1)";

/// Box presentation shared by every marker
const MARKER_LAYOUT: [(&str, &str); 6] = [
    ("position", "relative"),
    ("display", "inline"),
    ("padding", "0 4px"),
    ("margin", "0 2px"),
    ("border-radius", "4px"),
    ("transition", "all 0.2s ease"),
];

/// Dismiss control style; hidden until the marker is hovered
const CONTROL_STYLE: [(&str, &str); 15] = [
    ("display", "none"),
    ("position", "absolute"),
    ("top", "-8px"),
    ("right", "-8px"),
    ("width", "16px"),
    ("height", "16px"),
    ("line-height", "16px"),
    ("text-align", "center"),
    ("background", "rgba(128,128,128,0.2)"),
    ("color", "#666"),
    ("border-radius", "50%"),
    ("cursor", "pointer"),
    ("font-size", "12px"),
    ("z-index", "2147483647"),
    ("user-select", "none"),
];

const CONTROL_LABEL: &str = "×";

/// A freshly built marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    pub element: NodeId,
    pub control: NodeId,
    pub sentence: String,
    pub swatch: Swatch,
}

/// Builds markers and wires up their interactive behavior
#[derive(Debug, Clone, Copy)]
pub struct MarkerBuilder<'a> {
    config: &'a HighlightConfig,
}

impl<'a> MarkerBuilder<'a> {
    pub fn new(config: &'a HighlightConfig) -> Self {
        Self { config }
    }

    /// Build a detached marker for one sentence, taking the next pass color
    pub fn build(
        &self,
        tree: &mut DomTree,
        sentence: &str,
        snapshot: &StyleSnapshot,
        pass: &mut PassContext,
    ) -> Result<Marker, HighlightError> {
        let swatch = pass.next_swatch();
        let style = self.marker_style(snapshot, &swatch, pass.theme())?;

        let element = tree.create_element("span");
        set_inline_style(tree, element, &style)?;
        tree.set_attribute(element, COLOR_ATTR, &swatch.color)?;
        tree.set_attribute(element, INDEX_ATTR, &swatch.slot.to_string())?;
        tree.add_class(element, &self.config.marker_class)?;

        let text = tree.create_text(sentence);
        tree.append_child(element, text)?;
        let control = self.build_control(tree)?;
        tree.append_child(element, control)?;

        Ok(Marker {
            element,
            control,
            sentence: sentence.to_string(),
            swatch,
        })
    }

    fn marker_style(
        &self,
        snapshot: &StyleSnapshot,
        swatch: &Swatch,
        theme: Theme,
    ) -> Result<StyleDeclaration, HighlightError> {
        let mut style = StyleDeclaration::new();
        for (id, value) in snapshot.iter() {
            if let Err(err) = style.set_property(id.name(), value, true) {
                tracing::trace!(property = id.name(), value, error = %err, "snapshot property skipped");
            }
        }

        style.set_property("background-color", &swatch.color, true)?;
        if theme.is_dark() {
            style.set_property("color", &self.config.dark_text_color, true)?;
            style.set_property("text-shadow", DARK_TEXT_SHADOW, true)?;
        }
        for (name, value) in MARKER_LAYOUT {
            style.set_property(name, value, true)?;
        }
        Ok(style)
    }

    fn build_control(&self, tree: &mut DomTree) -> Result<NodeId, HighlightError> {
        let mut style = StyleDeclaration::new();
        for (name, value) in CONTROL_STYLE {
            style.set_property(name, value, false)?;
        }

        let control = tree.create_element("div");
        set_inline_style(tree, control, &style)?;
        tree.add_class(control, &self.config.dismiss_class)?;
        let label = tree.create_text(CONTROL_LABEL);
        tree.append_child(control, label)?;
        Ok(control)
    }

    /// Register hover and dismiss handlers for an attached marker
    pub fn attach_handlers(&self, document: &mut Document, marker: &Marker, theme: Theme) {
        let element = marker.element;
        let control = marker.control;
        let hover_filter = if theme.is_dark() {
            "brightness(1.2)"
        } else {
            "brightness(0.85)"
        };

        document.add_event_listener(
            element,
            EventType::PointerEnter,
            Rc::new(move |doc: &mut Document, _: &mut UiEvent| {
                apply_styles(
                    doc,
                    &[
                        (element, "filter", hover_filter, true),
                        (element, "box-shadow", HOVER_SHADOW, true),
                        (control, "display", "block", false),
                    ],
                );
            }),
        );

        document.add_event_listener(
            element,
            EventType::PointerLeave,
            Rc::new(move |doc: &mut Document, _: &mut UiEvent| {
                apply_styles(
                    doc,
                    &[
                        (element, "filter", "none", true),
                        (element, "box-shadow", "none", true),
                        (control, "display", "none", false),
                    ],
                );
            }),
        );

        let replacement = format!("{}{}", marker.sentence, self.config.separator);
        document.add_event_listener(
            control,
            EventType::Click,
            Rc::new(move |doc: &mut Document, event: &mut UiEvent| {
                event.stop_propagation();
                event.prevent_default();
                if let Err(err) = dismiss(doc, element, control, &replacement) {
                    tracing::debug!(?element, error = %err, "dismiss failed");
                }
            }),
        );
    }
}

/// Set each property on its own; a refused one does not stop the rest
fn apply_styles(doc: &mut Document, writes: &[(NodeId, &str, &str, bool)]) {
    for &(node, name, value, important) in writes {
        if let Err(err) = set_style_property(&mut doc.tree, node, name, value, important) {
            tracing::debug!(?node, property = name, error = %err, "style not applied");
        }
    }
}

/// Swap a marker for plain text; a detached marker is left alone
fn dismiss(doc: &mut Document, element: NodeId, control: NodeId, text: &str) -> DomResult<()> {
    let Some(parent) = doc.tree.parent(element) else {
        return Ok(());
    };
    let node = doc.tree.create_text(text);
    doc.tree.replace_child(parent, node, element)?;
    doc.remove_event_listeners(element);
    doc.remove_event_listeners(control);
    tracing::trace!(?element, "marker dismissed");
    Ok(())
}
