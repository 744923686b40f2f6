//! Selection arguments
//!
//! `#id` selects the contents of an element. `#id:start..end` selects a
//! character span of the element's first text node. Elements are looked
//! up in the document first, then in its same-origin frames.

use std::str::FromStr;

use hilite::dom::{Document, DomError, NodeId, Range, Selection};

/// Errors from a `--select` argument
#[derive(Debug, thiserror::Error)]
pub enum SelectError {
    #[error("Selection must start with '#': {0}")]
    MissingHash(String),

    #[error("Selection names no element id")]
    EmptyId,

    #[error("Bad character span '{0}', expected START..END")]
    BadSpan(String),

    #[error("No element with id '{0}'")]
    UnknownId(String),

    #[error("Element '{0}' has no text to select")]
    NoText(String),

    #[error("Cannot select '{id}': {source}")]
    Range { id: String, source: DomError },
}

/// Parsed `--select` value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSpec {
    pub id: String,
    pub span: Option<(u32, u32)>,
}

impl FromStr for SelectionSpec {
    type Err = SelectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let body = s
            .trim()
            .strip_prefix('#')
            .ok_or_else(|| SelectError::MissingHash(s.to_string()))?;

        let (id, span) = match body.rsplit_once(':') {
            Some((id, span)) if span.contains("..") => (id, Some(parse_span(span)?)),
            _ => (body, None),
        };
        if id.is_empty() {
            return Err(SelectError::EmptyId);
        }
        Ok(Self {
            id: id.to_string(),
            span,
        })
    }
}

fn parse_span(span: &str) -> Result<(u32, u32), SelectError> {
    let bad = || SelectError::BadSpan(span.to_string());
    let (start, end) = span.split_once("..").ok_or_else(bad)?;
    let start = start.trim().parse().map_err(|_| bad())?;
    let end = end.trim().parse().map_err(|_| bad())?;
    Ok((start, end))
}

impl SelectionSpec {
    /// Turn the argument into a selection over `document`
    pub fn resolve(&self, document: &Document) -> Result<Selection, SelectError> {
        let (scope, element) = find_element(document, &self.id)
            .ok_or_else(|| SelectError::UnknownId(self.id.clone()))?;
        let tree = &scope.tree;

        let range = match self.span {
            None => Range::select_node_contents(tree, element),
            Some((start, end)) => {
                let text = std::iter::once(element)
                    .chain(tree.descendants(element))
                    .find(|&n| tree.text(n).is_some())
                    .ok_or_else(|| SelectError::NoText(self.id.clone()))?;
                Range::between(tree, text, start, text, end)
            }
        }
        .map_err(|source| SelectError::Range {
            id: self.id.clone(),
            source,
        })?;

        tracing::debug!(id = %self.id, url = scope.url(), "resolved selection");
        Ok(Selection::from_range(range))
    }
}

fn find_element<'d>(document: &'d Document, id: &str) -> Option<(&'d Document, NodeId)> {
    if let Some(element) = document.get_element_by_id(id) {
        return Some((document, element));
    }
    document
        .frame_hosts()
        .into_iter()
        .filter_map(|host| document.content_document(host).ok())
        .find_map(|frame| frame.get_element_by_id(id).map(|element| (frame, element)))
}
