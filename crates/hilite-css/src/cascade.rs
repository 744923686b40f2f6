//! Style Cascade & Resolver
//!
//! Computes the final styles for DOM elements by:
//! 1. Matching selectors against elements
//! 2. Sorting by importance, origin, specificity and source order
//! 3. Applying the winners on top of the inherited parent style
//!
//! Author sheets are scoped to the tree root they were found in: the
//! document's `<style>` elements never style shadow content and a shadow
//! root's sheets never leak out.

use hilite_dom::{DomTree, NodeId};

use crate::{
    ComputedStyle, Declaration, PropertyId, Specificity, Stylesheet, inline_style, parse_stylesheet,
    Color,
};

/// Browser default styles
const UA_CSS: &str = "
html, body, div, p, section, article, header, footer, nav, aside, main,
ul, ol, h1, h2, h3, h4, h5, h6, blockquote, pre, form, figure { display: block }
li { display: list-item }
table { display: table }
head, script, style, noscript, template, title, meta, link { display: none }
b, strong, th, h1, h2, h3, h4, h5, h6 { font-weight: bold }
i, em, cite { font-style: italic }
a { color: #0000ee; text-decoration: underline; cursor: pointer }
u { text-decoration: underline }
code, pre { font-family: monospace }
pre { white-space: pre }
";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Origin {
    UserAgent,
    Author,
    Inline,
}

/// Sort key: later entries win
type CascadeKey = (bool, Origin, Specificity, usize);

/// Style resolver - computes styles for DOM elements
#[derive(Debug)]
pub struct StyleResolver {
    /// User agent stylesheet (browser defaults)
    ua_styles: Stylesheet,
    /// Author stylesheets with the tree root they apply to
    author_styles: Vec<(NodeId, Stylesheet)>,
}

impl StyleResolver {
    pub fn new() -> Self {
        let ua_styles = parse_stylesheet(UA_CSS).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "default stylesheet rejected");
            Stylesheet::new()
        });
        Self {
            ua_styles,
            author_styles: Vec::new(),
        }
    }

    /// Resolver loaded with every `<style>` element of a tree: the
    /// document's own and those inside each shadow root
    pub fn for_tree(tree: &DomTree) -> Self {
        let mut resolver = Self::new();
        let scopes = std::iter::once(tree.root()).chain(tree.shadow_roots(tree.root()));
        for scope in scopes {
            for style in tree.elements_by_tag(scope, "style") {
                let css = tree.text_content(style);
                match parse_stylesheet(&css) {
                    Ok(sheet) => resolver.add_scoped_stylesheet(scope, sheet),
                    Err(err) => tracing::debug!(error = %err, ?style, "skipping unparsable <style>"),
                }
            }
        }
        resolver
    }

    /// Add an author stylesheet for the document tree
    pub fn add_stylesheet(&mut self, stylesheet: Stylesheet) {
        self.author_styles.push((NodeId::ROOT, stylesheet));
    }

    /// Add an author stylesheet that applies under one tree root
    pub fn add_scoped_stylesheet(&mut self, scope: NodeId, stylesheet: Stylesheet) {
        self.author_styles.push((scope, stylesheet));
    }

    /// Compute the style of a node. Non-element nodes take the style of
    /// the element they inherit from.
    pub fn compute_style(&self, tree: &DomTree, node: NodeId) -> ComputedStyle {
        let parent = tree.parent(node).or_else(|| tree.shadow_host(node));
        let parent_style = parent.map(|p| self.compute_style(tree, p));

        if !tree.get(node).is_some_and(|n| n.is_element()) {
            return parent_style.unwrap_or_default();
        }

        let mut style = parent_style
            .as_ref()
            .map_or_else(ComputedStyle::initial, ComputedStyle::inherit_from);

        let inline = inline_style(tree, node);
        let mut matches: Vec<(&Declaration, CascadeKey)> = Vec::new();
        let mut order = 0;

        self.collect_matches(tree, node, &self.ua_styles, Origin::UserAgent, &mut order, &mut matches);
        let scope = tree.root_of(node);
        for (sheet_scope, sheet) in &self.author_styles {
            if *sheet_scope == scope {
                self.collect_matches(tree, node, sheet, Origin::Author, &mut order, &mut matches);
            }
        }
        for decl in inline.iter() {
            order += 1;
            matches.push((decl, (decl.important, Origin::Inline, Specificity::default(), order)));
        }

        matches.sort_by_key(|(_, key)| *key);

        for (decl, _) in matches {
            apply_declaration(&mut style, parent_style.as_ref(), decl);
        }
        style
    }

    fn collect_matches<'a>(
        &self,
        tree: &DomTree,
        node: NodeId,
        stylesheet: &'a Stylesheet,
        origin: Origin,
        order: &mut usize,
        matches: &mut Vec<(&'a Declaration, CascadeKey)>,
    ) {
        for rule in &stylesheet.rules {
            let best = rule
                .selectors
                .iter()
                .filter(|s| s.matches(tree, node))
                .map(|s| s.specificity)
                .max();
            let Some(specificity) = best else {
                continue;
            };
            for decl in &rule.declarations {
                *order += 1;
                matches.push((decl, (decl.important, origin, specificity, *order)));
            }
        }
    }
}

impl Default for StyleResolver {
    fn default() -> Self {
        Self::new()
    }
}

fn apply_declaration(style: &mut ComputedStyle, parent: Option<&ComputedStyle>, decl: &Declaration) {
    let Some(id) = PropertyId::from_name(&decl.property) else {
        return;
    };
    if id == PropertyId::Background {
        let color = background_color_of(&decl.value);
        style.set(PropertyId::BackgroundColor, &color.to_string());
        return;
    }

    let inherited = || {
        parent
            .map(|p| p.get(id).to_string())
            .unwrap_or_else(|| id.initial_value().to_string())
    };
    let value = match decl.value.trim().to_ascii_lowercase().as_str() {
        "inherit" => inherited(),
        "initial" => id.initial_value().to_string(),
        "unset" | "revert" if id.is_inherited() => inherited(),
        "unset" | "revert" => id.initial_value().to_string(),
        _ => decl.value.clone(),
    };
    style.set(id, &value);
}

/// Color layer of a `background` shorthand; a shorthand without one resets
/// the color to transparent
fn background_color_of(value: &str) -> Color {
    let mut depth = 0usize;
    let mut start = 0;
    let mut tokens = Vec::new();
    for (i, c) in value.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if c.is_whitespace() && depth == 0 => {
                tokens.push(&value[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    tokens.push(&value[start..]);
    tokens
        .into_iter()
        .filter(|t| !t.is_empty())
        .find_map(Color::parse)
        .unwrap_or(Color::TRANSPARENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::set_style_property;

    fn page() -> (DomTree, NodeId, NodeId, NodeId) {
        // <html><body><p class="lead">text</p></body></html>
        let mut tree = DomTree::new();
        let html = tree.create_element("html");
        let body = tree.create_element("body");
        let p = tree.create_element("p");
        tree.set_attribute(p, "class", "lead").unwrap();
        let text = tree.create_text("text");
        tree.append_child(tree.root(), html).unwrap();
        tree.append_child(html, body).unwrap();
        tree.append_child(body, p).unwrap();
        tree.append_child(p, text).unwrap();
        (tree, body, p, text)
    }

    #[test]
    fn test_ua_defaults() {
        let (tree, body, p, _) = page();
        let resolver = StyleResolver::new();
        assert_eq!(resolver.compute_style(&tree, p).get(PropertyId::Display), "block");
        assert!(resolver.compute_style(&tree, body).background_color().is_transparent());
    }

    #[test]
    fn test_specificity_and_inheritance() {
        let (tree, _, p, text) = page();
        let mut resolver = StyleResolver::new();
        resolver.add_stylesheet(
            parse_stylesheet("body { color: blue; font-family: Georgia } p.lead { color: red } p { color: green }").unwrap(),
        );

        let style = resolver.compute_style(&tree, p);
        assert_eq!(style.color(), Color::rgb(255, 0, 0));
        assert_eq!(style.get(PropertyId::FontFamily), "Georgia");
        assert_eq!(resolver.compute_style(&tree, text), style);
    }

    #[test]
    fn test_inline_and_important() {
        let (mut tree, _, p, _) = page();
        let mut resolver = StyleResolver::new();
        resolver.add_stylesheet(parse_stylesheet("p { color: green !important; background: #0a0a0a }").unwrap());
        set_style_property(&mut tree, p, "color", "red", false).unwrap();

        let style = resolver.compute_style(&tree, p);
        assert_eq!(style.color(), Color::rgb(0, 128, 0));
        assert_eq!(style.background_color(), Color::rgb(10, 10, 10));

        set_style_property(&mut tree, p, "color", "red", true).unwrap();
        assert_eq!(resolver.compute_style(&tree, p).color(), Color::rgb(255, 0, 0));
    }

    #[test]
    fn test_inherit_keyword() {
        let (mut tree, body, p, _) = page();
        set_style_property(&mut tree, body, "background-color", "rgb(250, 250, 250)", false).unwrap();
        set_style_property(&mut tree, p, "background-color", "inherit", false).unwrap();

        let resolver = StyleResolver::new();
        assert_eq!(
            resolver.compute_style(&tree, p).background_color(),
            Color::rgb(250, 250, 250)
        );
    }

    #[test]
    fn test_style_elements_are_scoped() {
        let (mut tree, body, p, _) = page();
        let style = tree.create_element("style");
        let css = tree.create_text("p { color: red }");
        tree.append_child(body, style).unwrap();
        tree.append_child(style, css).unwrap();

        let host = tree.create_element("div");
        tree.append_child(body, host).unwrap();
        let shadow = tree.attach_shadow(host, hilite_dom::ShadowRootMode::Open).unwrap();
        let inner = tree.create_element("p");
        tree.append_child(shadow, inner).unwrap();

        let resolver = StyleResolver::for_tree(&tree);
        assert_eq!(resolver.compute_style(&tree, p).color(), Color::rgb(255, 0, 0));
        assert_eq!(resolver.compute_style(&tree, inner).color(), Color::BLACK);
    }

    #[test]
    fn test_background_shorthand() {
        assert_eq!(background_color_of("none"), Color::TRANSPARENT);
        assert_eq!(
            background_color_of("url(x.png) no-repeat rgba(0, 0, 0, 0.2)"),
            Color::rgba(0, 0, 0, 51)
        );
    }
}
