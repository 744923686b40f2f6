//! CSS errors

/// CSS parsing error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CssError {
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: u32, message: String },
    #[error("Unsupported property '{0}'")]
    UnknownProperty(String),
    #[error("Invalid value '{value}' for property '{property}'")]
    InvalidValue { property: String, value: String },
    #[error(transparent)]
    Dom(#[from] hilite_dom::DomError),
}
