//! Computed Style
//!
//! Final values for the fixed property set, in a stable order. Colors are
//! normalized to `rgb()`/`rgba()`/`transparent`; everything else keeps
//! the cascaded value.

use std::collections::HashMap;

use crate::{Color, PropertyId};

/// Computed style for an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputedStyle {
    values: HashMap<PropertyId, String>,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self::initial()
    }
}

impl ComputedStyle {
    /// Style with every property at its initial value
    pub fn initial() -> Self {
        let values = PropertyId::COMPUTED
            .iter()
            .map(|&id| (id, id.initial_value().to_string()))
            .collect();
        Self { values }
    }

    /// Starting point for a child: inherited properties copied from the
    /// parent, the rest at their initial values
    pub fn inherit_from(parent: &ComputedStyle) -> Self {
        let values = PropertyId::COMPUTED
            .iter()
            .map(|&id| {
                let value = if id.is_inherited() {
                    parent.get(id).to_string()
                } else {
                    id.initial_value().to_string()
                };
                (id, value)
            })
            .collect();
        Self { values }
    }

    /// Value of a computed property
    pub fn get(&self, id: PropertyId) -> &str {
        self.values
            .get(&id)
            .map(String::as_str)
            .unwrap_or_else(|| id.initial_value())
    }

    /// Value by CSS name; `None` for properties outside the computed set
    pub fn get_property(&self, name: &str) -> Option<&str> {
        let id = PropertyId::from_name(name)?;
        self.values.get(&id).map(String::as_str)
    }

    /// Store a value. Properties outside the computed set are ignored.
    pub fn set(&mut self, id: PropertyId, value: &str) {
        if !PropertyId::COMPUTED.contains(&id) {
            return;
        }
        let value = value.trim();
        let normalized = if id.is_color() {
            Color::parse(value).map_or_else(|| value.to_string(), |c| c.to_string())
        } else if id == PropertyId::FontWeight {
            match value.to_ascii_lowercase().as_str() {
                "normal" => "400".to_string(),
                "bold" => "700".to_string(),
                _ => value.to_string(),
            }
        } else {
            value.to_string()
        };
        self.values.insert(id, normalized);
    }

    /// Properties and values in snapshot order
    pub fn iter(&self) -> impl Iterator<Item = (PropertyId, &str)> {
        PropertyId::COMPUTED.iter().map(|&id| (id, self.get(id)))
    }

    /// Text color
    pub fn color(&self) -> Color {
        Color::parse(self.get(PropertyId::Color)).unwrap_or_default()
    }

    /// Background color; anything unreadable counts as transparent
    pub fn background_color(&self) -> Color {
        Color::parse(self.get(PropertyId::BackgroundColor)).unwrap_or(Color::TRANSPARENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_values() {
        let style = ComputedStyle::initial();
        assert_eq!(style.get(PropertyId::Display), "inline");
        assert_eq!(style.get(PropertyId::BackgroundColor), "transparent");
        assert!(style.background_color().is_transparent());
        assert_eq!(style.iter().count(), PropertyId::COMPUTED.len());
    }

    #[test]
    fn test_inherit_from() {
        let mut parent = ComputedStyle::initial();
        parent.set(PropertyId::Color, "#ff0000");
        parent.set(PropertyId::BackgroundColor, "white");
        parent.set(PropertyId::FontWeight, "bold");

        let child = ComputedStyle::inherit_from(&parent);
        assert_eq!(child.get(PropertyId::Color), "rgb(255, 0, 0)");
        assert_eq!(child.get(PropertyId::FontWeight), "700");
        assert_eq!(child.get(PropertyId::BackgroundColor), "transparent");
    }

    #[test]
    fn test_ignores_untracked() {
        let mut style = ComputedStyle::initial();
        style.set(PropertyId::ZIndex, "3");
        assert_eq!(style.get_property("z-index"), None);
        assert_eq!(style.get_property("cursor"), Some("auto"));
    }
}
