//! Selector matching
//!
//! Supports type, class, id and universal selectors, compounds of those,
//! and descendant/child combinators. Matching never crosses a tree root,
//! so document rules do not reach into shadow trees.

use hilite_dom::{DomTree, NodeId};

/// Selector specificity (a, b, c)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Specificity(pub u32, pub u32, pub u32);

/// Combinator between compounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    Descendant,
    Child,
}

/// Simple selectors matching one element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Compound {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
}

impl Compound {
    fn parse(text: &str) -> Option<Self> {
        let mut compound = Compound::default();
        let mut rest = text;

        let tag_end = rest.find(['.', '#']).unwrap_or(rest.len());
        let tag = &rest[..tag_end];
        if !tag.is_empty() && tag != "*" {
            if !is_ident(tag) {
                return None;
            }
            compound.tag = Some(tag.to_ascii_lowercase());
        }
        rest = &rest[tag_end..];

        while let Some(marker) = rest.chars().next() {
            let body = &rest[1..];
            let end = body.find(['.', '#']).unwrap_or(body.len());
            let name = &body[..end];
            if !is_ident(name) {
                return None;
            }
            match marker {
                '.' => compound.classes.push(name.to_string()),
                '#' => compound.id = Some(name.to_string()),
                _ => return None,
            }
            rest = &body[end..];
        }
        Some(compound)
    }

    fn specificity(&self) -> Specificity {
        Specificity(
            self.id.is_some() as u32,
            self.classes.len() as u32,
            self.tag.is_some() as u32,
        )
    }

    fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        if tree.get(node).is_none_or(|n| !n.is_element()) {
            return false;
        }
        if let Some(tag) = &self.tag
            && !tree.is_element_named(node, tag)
        {
            return false;
        }
        if let Some(id) = &self.id
            && tree.get_attribute(node, "id") != Some(id.as_str())
        {
            return false;
        }
        self.classes.iter().all(|c| tree.has_class(node, c))
    }
}

fn is_ident(s: &str) -> bool {
    !s.is_empty()
        && s.chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
}

/// A complex selector, stored right-to-left for matching
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    pub text: String,
    pub specificity: Specificity,
    /// Subject compound first, each paired with the combinator that
    /// links it to the next compound on its left
    parts: Vec<(Compound, Option<Combinator>)>,
}

impl Selector {
    /// Parse a selector. Returns `None` for syntax outside the supported
    /// subset (attributes, pseudo-classes, sibling combinators).
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() || text.contains([':', '[', '+', '~', ',', '(']) {
            return None;
        }

        let spaced = text.replace('>', " > ");
        let mut compounds: Vec<Compound> = Vec::new();
        let mut combinators: Vec<Combinator> = Vec::new();
        let mut pending = None;
        for token in spaced.split_whitespace() {
            if token == ">" {
                if compounds.is_empty() || pending.is_some() {
                    return None;
                }
                pending = Some(Combinator::Child);
                continue;
            }
            if !compounds.is_empty() {
                combinators.push(pending.take().unwrap_or(Combinator::Descendant));
            }
            compounds.push(Compound::parse(token)?);
        }
        if compounds.is_empty() || pending.is_some() {
            return None;
        }

        let specificity = compounds.iter().fold(Specificity::default(), |acc, c| {
            let s = c.specificity();
            Specificity(acc.0 + s.0, acc.1 + s.1, acc.2 + s.2)
        });

        // combinators[i] links compounds[i] to compounds[i + 1]
        let parts = compounds
            .into_iter()
            .enumerate()
            .rev()
            .map(|(i, compound)| (compound, i.checked_sub(1).map(|j| combinators[j])))
            .collect();

        Some(Self {
            text: text.to_string(),
            specificity,
            parts,
        })
    }

    /// Whether the selector matches an element
    pub fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        self.matches_from(tree, node, 0)
    }

    fn matches_from(&self, tree: &DomTree, node: NodeId, index: usize) -> bool {
        let Some((compound, combinator)) = self.parts.get(index) else {
            return true;
        };
        if !compound.matches(tree, node) {
            return false;
        }
        match combinator {
            None => true,
            Some(Combinator::Child) => tree
                .parent(node)
                .is_some_and(|p| self.matches_from(tree, p, index + 1)),
            Some(Combinator::Descendant) => tree
                .ancestors(node)
                .any(|a| self.matches_from(tree, a, index + 1)),
        }
    }
}
