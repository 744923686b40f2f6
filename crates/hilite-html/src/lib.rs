//! hilite HTML front-end
//!
//! Parses HTML into a `hilite_dom::Document` through html5ever and writes
//! documents back out as HTML.

mod parser;
mod serializer;

pub use parser::HtmlParser;
pub use serializer::HtmlSerializer;

use hilite_dom::{Document, DomError};

/// Parse an HTML string into a document
pub fn parse(html: &str) -> Result<Document, ParseError> {
    HtmlParser::new().parse(html)
}

/// Serialize a whole document, frames and shadow roots included
pub fn serialize(document: &Document) -> String {
    HtmlSerializer::new().serialize_document(document)
}

/// Parse error
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Failed to read HTML input: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not build document tree: {0}")]
    Dom(#[from] DomError),
}
