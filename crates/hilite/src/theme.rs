//! Page theme detection
//!
//! The theme is read from the computed background of `<body>` (or the root
//! element when there is no body). Only the digit runs of the serialized
//! color are looked at: the first three are taken as red, green and blue.

use std::fmt;
use std::sync::LazyLock;

use hilite_css::{PropertyId, StyleResolver};
use hilite_dom::Document;
use regex::Regex;

static DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("valid digit run pattern"));

/// Light or dark page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Perceived brightness of a serialized color, `None` when fewer than
/// three numbers can be read from it
pub fn brightness(color: &str) -> Option<f32> {
    let mut channels = DIGIT_RUN
        .find_iter(color)
        .filter_map(|m| m.as_str().parse::<f32>().ok());
    let r = channels.next()?;
    let g = channels.next()?;
    let b = channels.next()?;
    Some(0.299 * r + 0.587 * g + 0.114 * b)
}

/// Classify a serialized background color
pub fn classify(background: &str, threshold: f32) -> Theme {
    match brightness(background) {
        Some(value) if value < threshold => Theme::Dark,
        _ => Theme::Light,
    }
}

/// Theme detector
#[derive(Debug, Clone, Copy)]
pub struct ThemeDetector {
    threshold: f32,
}

impl ThemeDetector {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    /// Theme of a document
    pub fn detect(&self, document: &Document) -> Theme {
        let Some(target) = document.body().or_else(|| document.document_element()) else {
            return Theme::Light;
        };
        let style = StyleResolver::for_tree(&document.tree).compute_style(&document.tree, target);
        let background = style.get(PropertyId::BackgroundColor);
        let theme = classify(background, self.threshold);
        tracing::debug!(background, %theme, "detected page theme");
        theme
    }
}

impl Default for ThemeDetector {
    fn default() -> Self {
        Self::new(128.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(classify("rgb(10, 10, 10)", 128.0), Theme::Dark);
        assert_eq!(classify("rgb(250, 250, 250)", 128.0), Theme::Light);
        assert_eq!(classify("transparent", 128.0), Theme::Light);
        assert_eq!(classify("rgba(0, 0, 0, 0)", 128.0), Theme::Dark);
        assert_eq!(classify("rgb(12, 34)", 128.0), Theme::Light);
    }

    #[test]
    fn test_brightness_weights() {
        assert_eq!(brightness("rgb(255, 255, 255)"), Some(255.0));
        let green = brightness("rgb(0, 100, 0)").unwrap();
        assert!((green - 58.7).abs() < 0.01);
    }

    #[test]
    fn test_detect_from_body() {
        let mut doc = Document::new("test");
        let body = doc.body().unwrap();
        let detector = ThemeDetector::default();
        assert_eq!(detector.detect(&doc), Theme::Light);

        doc.tree
            .set_attribute(body, "style", "background-color: rgb(10, 10, 10)")
            .unwrap();
        assert_eq!(detector.detect(&doc), Theme::Dark);

        // lightningcss prints this back as `indigo`
        doc.tree
            .set_attribute(body, "style", "background-color: #4b0082")
            .unwrap();
        assert_eq!(detector.detect(&doc), Theme::Dark);
    }
}
