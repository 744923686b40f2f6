//! hilite
//!
//! Sentence highlighting over a live document tree.
//!
//! `annotate` splits the selected text into sentences and wraps each one
//! in a colored, dismissible marker that keeps the look of the text it
//! replaced. `clear` takes markers out again, splitting those that only
//! partly overlap the selection.
//!
//! # Example
//! ```rust,ignore
//! use hilite::{Highlighter, HighlightConfig};
//! use hilite::dom::{Range, Selection};
//!
//! let mut doc = hilite::html::parse("<p id=a>One. Two.</p>")?;
//! let p = doc.get_element_by_id("a").unwrap();
//! let range = Range::select_node_contents(&doc.tree, p)?;
//! let highlighter = Highlighter::new(HighlightConfig::default());
//! highlighter.annotate(&mut doc, &Selection::from_range(range))?;
//! ```

mod annotate;
mod config;
mod error;
mod highlighter;
mod marker;
mod palette;
mod remove;
mod segment;
mod snapshot;
mod theme;
mod walker;

pub use annotate::Annotator;
pub use config::{DARK_PALETTE, HighlightConfig, LIGHT_PALETTE};
pub use error::HighlightError;
pub use highlighter::{AnnotateReport, Highlighter};
pub use marker::{COLOR_ATTR, INDEX_ATTR, Marker, MarkerBuilder};
pub use palette::{Palette, PassContext, Swatch};
pub use remove::{ClearReport, Remover};
pub use segment::split_sentences;
pub use snapshot::StyleSnapshot;
pub use theme::{Theme, ThemeDetector};
pub use walker::{EXCLUDED_CONTAINERS, RangeWalker, WalkMode};

// Re-export sub-crates for advanced usage
pub use hilite_css as css;
pub use hilite_dom as dom;
pub use hilite_html as html;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
