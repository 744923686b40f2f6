//! Highlighter Configuration

use serde::{Deserialize, Serialize};

use crate::Theme;

/// Light theme palette (translucent pastels)
pub const LIGHT_PALETTE: [&str; 5] = [
    "rgba(255, 229, 180, 0.5)", // Peach
    "rgba(212, 241, 244, 0.5)", // Light blue
    "rgba(230, 230, 250, 0.5)", // Lavender
    "rgba(255, 250, 205, 0.5)", // Lemon chiffon
    "rgba(245, 222, 179, 0.5)", // Wheat
];

/// Dark theme palette
pub const DARK_PALETTE: [&str; 5] = [
    "rgba(255, 140, 0, 0.3)",   // Dark orange
    "rgba(100, 149, 237, 0.3)", // Cornflower blue
    "rgba(147, 112, 219, 0.3)", // Medium purple
    "rgba(255, 215, 0, 0.3)",   // Gold
    "rgba(250, 128, 114, 0.3)", // Salmon
];

/// Highlighter configuration options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// Class carried by every marker element
    pub marker_class: String,

    /// Class of the dismiss control inside a marker
    pub dismiss_class: String,

    /// Colors cycled through on light pages
    pub light_palette: Vec<String>,

    /// Colors cycled through on dark pages
    pub dark_palette: Vec<String>,

    /// Backgrounds darker than this brightness count as dark
    pub dark_threshold: f32,

    /// Text color forced on markers of dark pages
    pub dark_text_color: String,

    /// Text inserted after every marker
    pub separator: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            marker_class: "sentence-highlight".to_string(),
            dismiss_class: "dismiss-highlight".to_string(),
            light_palette: LIGHT_PALETTE.iter().map(|c| c.to_string()).collect(),
            dark_palette: DARK_PALETTE.iter().map(|c| c.to_string()).collect(),
            dark_threshold: 128.0,
            dark_text_color: "#ffffff".to_string(),
            separator: " ".to_string(),
        }
    }
}

impl HighlightConfig {
    /// Palette for a theme
    pub fn palette(&self, theme: Theme) -> &[String] {
        match theme {
            Theme::Light => &self.light_palette,
            Theme::Dark => &self.dark_palette,
        }
    }
}
