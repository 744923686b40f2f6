//! Highlighter errors

use hilite_css::CssError;
use hilite_dom::DomError;

use crate::Theme;

/// Highlighter error
#[derive(Debug, thiserror::Error)]
pub enum HighlightError {
    /// Clearing needs a non-empty selection
    #[error("Please select text to clear highlights from.")]
    NothingSelected,

    #[error("No highlight colors configured for the {0} theme")]
    EmptyPalette(Theme),

    #[error("Invalid highlight color: {0}")]
    InvalidColor(String),

    #[error("Document error: {0}")]
    Dom(#[from] DomError),

    #[error("Style error: {0}")]
    Css(#[from] CssError),
}
