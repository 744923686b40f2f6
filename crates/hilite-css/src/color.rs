//! CSS colors
//!
//! 8-bit RGBA. Parsing goes through lightningcss; serialization follows
//! the shape browsers report computed colors in.

use std::fmt;

use lightningcss::traits::Parse;
use lightningcss::values::color::{CssColor, RGBA};

/// CSS color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Color {
    pub const TRANSPARENT: Color = Color { r: 0, g: 0, b: 0, a: 0 };
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 255 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse any CSS color lightningcss understands: hex, named, `rgb()`,
    /// `hsl()`, `lab()` and the rest. `currentColor` and system colors have
    /// no fixed value and give `None`.
    pub fn parse(value: &str) -> Option<Self> {
        let color = CssColor::parse_string(value.trim()).ok()?;
        Self::from_css_color(&color)
    }

    /// Convert a parsed lightningcss color to 8-bit RGBA
    pub fn from_css_color(color: &CssColor) -> Option<Self> {
        let rgba = match color {
            CssColor::RGBA(rgba) => *rgba,
            CssColor::CurrentColor => return None,
            other => RGBA::try_from(other).ok()?,
        };
        Some(Self::rgba(rgba.red, rgba.green, rgba.blue, rgba.alpha))
    }

    /// Perceived brightness, 0.0 (black) to 255.0 (white)
    pub fn brightness(&self) -> f32 {
        0.299 * self.r as f32 + 0.587 * self.g as f32 + 0.114 * self.b as f32
    }

    /// Whether the color is fully transparent
    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }

    /// Alpha as a CSS number, with the shortest decimal that maps back to
    /// the same 8-bit value
    fn alpha_string(&self) -> String {
        let alpha = self.a as f32 / 255.0;
        let two = (alpha * 100.0).round() / 100.0;
        let rounded = if (two * 255.0).round() as u8 == self.a {
            two
        } else {
            (alpha * 1000.0).round() / 1000.0
        };
        format!("{rounded}")
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.a {
            0 => f.write_str("transparent"),
            255 => write!(f, "rgb({}, {}, {})", self.r, self.g, self.b),
            _ => write!(
                f,
                "rgba({}, {}, {}, {})",
                self.r,
                self.g,
                self.b,
                self.alpha_string()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex() {
        assert_eq!(Color::parse("#fff"), Some(Color::WHITE));
        assert_eq!(Color::parse("#0A0A0A"), Some(Color::rgb(10, 10, 10)));
        assert_eq!(Color::parse("#ffe5b480"), Some(Color::rgba(255, 229, 180, 128)));
        assert_eq!(Color::parse("#12"), None);
    }

    #[test]
    fn test_functions() {
        assert_eq!(Color::parse("rgb(10, 20, 30)"), Some(Color::rgb(10, 20, 30)));
        assert_eq!(
            Color::parse("rgba(255, 229, 180, 0.5)"),
            Some(Color::rgba(255, 229, 180, 128))
        );
        assert_eq!(Color::parse("rgb(0 0 0 / 20%)"), Some(Color::rgba(0, 0, 0, 51)));
        assert_eq!(Color::parse("rgb(1, 2)"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Color::rgb(1, 2, 3).to_string(), "rgb(1, 2, 3)");
        assert_eq!(Color::TRANSPARENT.to_string(), "transparent");
        assert_eq!(
            Color::parse("rgba(255, 140, 0, 0.3)").unwrap().to_string(),
            "rgba(255, 140, 0, 0.3)"
        );
        assert_eq!(
            Color::parse("rgba(255, 229, 180, 0.5)").unwrap().to_string(),
            "rgba(255, 229, 180, 0.5)"
        );
    }

    #[test]
    fn test_named_and_other_spaces() {
        assert_eq!(Color::parse("indigo"), Some(Color::rgb(0x4b, 0x00, 0x82)));
        assert_eq!(Color::parse("RebeccaPurple"), Some(Color::rgb(0x66, 0x33, 0x99)));
        assert_eq!(Color::parse("hsl(0, 100%, 50%)"), Some(Color::rgb(255, 0, 0)));
        assert_eq!(Color::parse("currentColor"), None);
        assert_eq!(Color::parse("not-a-color"), None);
    }

    #[test]
    fn test_brightness() {
        assert!(Color::rgb(10, 10, 10).brightness() < 128.0);
        assert!(Color::rgb(250, 250, 250).brightness() >= 128.0);
        assert_eq!(Color::parse("Transparent"), Some(Color::TRANSPARENT));
    }
}
