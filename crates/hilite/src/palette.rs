//! Highlight palettes and the per-pass color cursor

use hilite_css::Color;

use crate::{HighlightConfig, HighlightError, Theme};

/// Ordered, non-empty list of highlight colors
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<String>,
}

impl Palette {
    /// Build a palette, rejecting empty lists and unreadable colors
    pub fn new(theme: Theme, colors: &[String]) -> Result<Self, HighlightError> {
        if colors.is_empty() {
            return Err(HighlightError::EmptyPalette(theme));
        }
        if let Some(bad) = colors.iter().find(|c| Color::parse(c).is_none()) {
            return Err(HighlightError::InvalidColor(bad.clone()));
        }
        Ok(Self {
            colors: colors.to_vec(),
        })
    }

    /// Palette configured for a theme
    pub fn for_theme(config: &HighlightConfig, theme: Theme) -> Result<Self, HighlightError> {
        Self::new(theme, config.palette(theme))
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color for a running index, wrapping around
    pub fn color_at(&self, index: usize) -> (usize, &str) {
        let slot = index % self.colors.len();
        (slot, &self.colors[slot])
    }
}

/// Color picked for one sentence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Swatch {
    /// Palette slot
    pub slot: usize,
    /// Exact palette color
    pub color: String,
}

/// State shared by every sentence of one annotation pass
#[derive(Debug, Clone)]
pub struct PassContext {
    palette: Palette,
    theme: Theme,
    index: usize,
}

impl PassContext {
    pub fn new(palette: Palette, theme: Theme) -> Self {
        Self {
            palette,
            theme,
            index: 0,
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Sentences colored so far
    pub fn index(&self) -> usize {
        self.index
    }

    /// Color of the next sentence; advances the cursor
    pub fn next_swatch(&mut self) -> Swatch {
        let (slot, color) = self.palette.color_at(self.index);
        let swatch = Swatch {
            slot,
            color: color.to_string(),
        };
        self.index += 1;
        swatch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycles_through_palette() {
        let config = HighlightConfig::default();
        let palette = Palette::for_theme(&config, Theme::Light).unwrap();
        let mut pass = PassContext::new(palette, Theme::Light);

        let slots: Vec<usize> = (0..7).map(|_| pass.next_swatch().slot).collect();
        assert_eq!(slots, vec![0, 1, 2, 3, 4, 0, 1]);
        assert_eq!(pass.index(), 7);
    }

    #[test]
    fn test_rejects_bad_palettes() {
        assert!(matches!(
            Palette::new(Theme::Dark, &[]),
            Err(HighlightError::EmptyPalette(Theme::Dark))
        ));
        assert!(matches!(
            Palette::new(Theme::Light, &["not a color".to_string()]),
            Err(HighlightError::InvalidColor(_))
        ));
    }
}
