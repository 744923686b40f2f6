//! hilite CSS & Style System
//!
//! CSS parsing, inline style declarations and the cascade that produces
//! computed styles for the document tree.

mod cascade;
mod color;
mod computed;
mod declaration;
mod error;
mod parser;
mod properties;
mod selectors;

pub use cascade::StyleResolver;
pub use color::Color;
pub use computed::ComputedStyle;
pub use declaration::{
    Declaration, StyleDeclaration, inline_style, set_inline_style, set_style_property,
};
pub use error::CssError;
pub use parser::{CssParser, Rule, Stylesheet, parse_stylesheet};
pub use properties::PropertyId;
pub use selectors::{Combinator, Compound, Selector, Specificity};
