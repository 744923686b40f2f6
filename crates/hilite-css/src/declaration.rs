//! Inline style declarations (CSSOM `element.style`)
//!
//! The `style` attribute is the source of truth. Reading parses it through
//! lightningcss; writing serializes the whole block back in one go.

use hilite_dom::{DomTree, NodeId};
use lightningcss::declaration::DeclarationBlock;
use lightningcss::properties::Property;
use lightningcss::printer::PrinterOptions;
use lightningcss::stylesheet::ParserOptions;

use crate::{CssError, PropertyId};

const CSS_WIDE_KEYWORDS: &[&str] = &["inherit", "initial", "unset", "revert"];

/// CSS declaration (property: value)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub property: String,
    pub value: String,
    pub important: bool,
}

/// Ordered declaration block
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleDeclaration {
    entries: Vec<Declaration>,
}

impl StyleDeclaration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a declaration list. Declarations lightningcss cannot read are
    /// dropped; the rest are kept in source order.
    pub fn parse(css: &str) -> Self {
        if css.trim().is_empty() {
            return Self::new();
        }
        match DeclarationBlock::parse_string(css, ParserOptions::default()) {
            Ok(block) => Self {
                entries: convert_block(&block),
            },
            Err(err) => {
                tracing::trace!(error = ?err, "style block rejected, parsing declarations one by one");
                let entries = css
                    .split(';')
                    .filter(|chunk| !chunk.trim().is_empty())
                    .filter_map(|chunk| DeclarationBlock::parse_string(chunk, ParserOptions::default()).ok())
                    .flat_map(|block| convert_block(&block))
                    .collect();
                Self { entries }
            }
        }
    }

    /// Number of declarations
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Declarations in order
    pub fn iter(&self) -> impl Iterator<Item = &Declaration> {
        self.entries.iter()
    }

    fn find(&self, name: &str) -> Option<&Declaration> {
        let name = name.trim();
        self.entries
            .iter()
            .find(|d| d.property.eq_ignore_ascii_case(name))
    }

    /// Value of a property, if declared
    pub fn get_property(&self, name: &str) -> Option<&str> {
        self.find(name).map(|d| d.value.as_str())
    }

    /// `"important"` for important declarations, `""` otherwise
    pub fn get_priority(&self, name: &str) -> &'static str {
        match self.find(name) {
            Some(d) if d.important => "important",
            _ => "",
        }
    }

    /// Set a property. Unknown properties and values that do not parse are
    /// refused and leave the block unchanged. An existing declaration keeps
    /// its position.
    pub fn set_property(&mut self, name: &str, value: &str, important: bool) -> Result<(), CssError> {
        let id = PropertyId::from_name(name)
            .ok_or_else(|| CssError::UnknownProperty(name.trim().to_string()))?;
        let value = value.trim();
        validate_value(id, value)?;

        let declaration = Declaration {
            property: id.name().to_string(),
            value: value.to_string(),
            important,
        };
        match self.entries.iter_mut().find(|d| d.property == id.name()) {
            Some(existing) => *existing = declaration,
            None => self.entries.push(declaration),
        }
        Ok(())
    }

    /// Remove a property, returning its old value
    pub fn remove_property(&mut self, name: &str) -> Option<String> {
        let name = name.trim();
        let pos = self
            .entries
            .iter()
            .position(|d| d.property.eq_ignore_ascii_case(name))?;
        Some(self.entries.remove(pos).value)
    }

    /// Serialize as a `style` attribute value
    pub fn to_css_string(&self) -> String {
        self.entries
            .iter()
            .map(|d| {
                let priority = if d.important { " !important" } else { "" };
                format!("{}: {}{};", d.property, d.value, priority)
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl std::fmt::Display for StyleDeclaration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_css_string())
    }
}

fn validate_value(id: PropertyId, value: &str) -> Result<(), CssError> {
    let invalid = || CssError::InvalidValue {
        property: id.name().to_string(),
        value: value.to_string(),
    };
    if value.is_empty() || value.contains(';') || value.contains('!') {
        return Err(invalid());
    }
    if CSS_WIDE_KEYWORDS.iter().any(|k| value.eq_ignore_ascii_case(k)) {
        return Ok(());
    }
    // lightningcss has no `none` branch for shadow lists and reports it
    // unparsed; a property's initial value is always valid
    if value.eq_ignore_ascii_case(id.initial_value()) {
        return Ok(());
    }

    let source = format!("{}: {}", id.name(), value);
    let block = DeclarationBlock::parse_string(&source, ParserOptions::default()).map_err(|_| invalid())?;
    let mut parsed = block
        .declarations
        .iter()
        .chain(block.important_declarations.iter())
        .peekable();
    if parsed.peek().is_none() {
        return Err(invalid());
    }
    // lightningcss falls back to an unparsed token list for known
    // properties whose value it cannot read
    if parsed.any(|p| matches!(p, Property::Unparsed(_))) {
        return Err(invalid());
    }
    Ok(())
}

/// Convert a lightningcss block into plain declarations
pub(crate) fn convert_block(block: &DeclarationBlock) -> Vec<Declaration> {
    let normal = block.declarations.iter().map(|p| (p, false));
    let important = block.important_declarations.iter().map(|p| (p, true));
    normal
        .chain(important)
        .filter_map(|(property, important)| convert_property(property, important))
        .collect()
}

fn convert_property(property: &Property, important: bool) -> Option<Declaration> {
    let value = property.value_to_css_string(PrinterOptions::default()).ok()?;
    Some(Declaration {
        property: property.property_id().name().to_string(),
        value,
        important,
    })
}

// --- Element binding ---

/// Inline style of an element
pub fn inline_style(tree: &DomTree, node: NodeId) -> StyleDeclaration {
    tree.get_attribute(node, "style")
        .map(StyleDeclaration::parse)
        .unwrap_or_default()
}

/// Replace an element's inline style
pub fn set_inline_style(tree: &mut DomTree, node: NodeId, style: &StyleDeclaration) -> Result<(), CssError> {
    if style.is_empty() {
        tree.remove_attribute(node, "style")?;
    } else {
        tree.set_attribute(node, "style", &style.to_css_string())?;
    }
    Ok(())
}

/// Set one property on an element's inline style
pub fn set_style_property(
    tree: &mut DomTree,
    node: NodeId,
    name: &str,
    value: &str,
    important: bool,
) -> Result<(), CssError> {
    let mut style = inline_style(tree, node);
    style.set_property(name, value, important)?;
    set_inline_style(tree, node, &style)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;

    #[test]
    fn test_set_and_serialize() {
        let mut style = StyleDeclaration::new();
        style.set_property("background-color", "rgba(255, 229, 180, 0.5)", true).unwrap();
        style.set_property("padding", "0 4px", true).unwrap();

        assert_eq!(style.get_property("background-color"), Some("rgba(255, 229, 180, 0.5)"));
        assert_eq!(style.get_priority("padding"), "important");
        assert_eq!(
            style.to_css_string(),
            "background-color: rgba(255, 229, 180, 0.5) !important; padding: 0 4px !important;"
        );
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut style = StyleDeclaration::new();
        style.set_property("color", "red", false).unwrap();
        style.set_property("display", "inline", false).unwrap();
        style.set_property("color", "blue", true).unwrap();

        let names: Vec<_> = style.iter().map(|d| d.property.as_str()).collect();
        assert_eq!(names, vec!["color", "display"]);
        assert_eq!(style.get_property("color"), Some("blue"));
    }

    #[test]
    fn test_refuses_unknown_and_invalid() {
        let mut style = StyleDeclaration::new();
        assert!(matches!(
            style.set_property("not-a-property", "1", false),
            Err(CssError::UnknownProperty(_))
        ));
        assert!(matches!(
            style.set_property("color", "red; display: none", false),
            Err(CssError::InvalidValue { .. })
        ));
        assert!(matches!(
            style.set_property("opacity", "", false),
            Err(CssError::InvalidValue { .. })
        ));
        assert!(style.is_empty());
    }

    #[test]
    fn test_shadow_none_is_accepted() {
        let mut style = StyleDeclaration::new();
        style.set_property("box-shadow", "0 2px 4px rgba(0,0,0,0.1)", true).unwrap();
        style.set_property("box-shadow", "none", true).unwrap();
        style.set_property("text-shadow", "None", false).unwrap();
        style.set_property("filter", "none", true).unwrap();

        assert_eq!(style.get_property("box-shadow"), Some("none"));
        assert_eq!(style.len(), 3);
        assert!(matches!(
            style.set_property("box-shadow", "nonsense", true),
            Err(CssError::InvalidValue { .. })
        ));

        let reread = StyleDeclaration::parse(&style.to_css_string());
        assert_eq!(reread.get_property("box-shadow"), Some("none"));
        assert_eq!(reread.get_priority("box-shadow"), "important");
    }

    #[test]
    fn test_parse_attribute() {
        let style = StyleDeclaration::parse("color: red; background-color: #0a0a0a !important");
        assert_eq!(style.len(), 2);
        assert_eq!(
            style.get_property("color").and_then(Color::parse),
            Some(Color::rgb(255, 0, 0))
        );
        assert_eq!(style.get_priority("background-color"), "important");
        assert_eq!(
            style.get_property("background-color").and_then(Color::parse),
            Some(Color::rgb(10, 10, 10))
        );
    }

    #[test]
    fn test_element_binding() {
        let mut tree = DomTree::new();
        let span = tree.create_element("span");
        set_style_property(&mut tree, span, "display", "none", false).unwrap();
        assert_eq!(inline_style(&tree, span).get_property("display"), Some("none"));

        set_inline_style(&mut tree, span, &StyleDeclaration::new()).unwrap();
        assert!(!tree.has_attribute(span, "style"));
    }
}
