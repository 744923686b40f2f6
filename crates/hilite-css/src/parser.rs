//! CSS Parser using lightningcss
//!
//! Parses stylesheets into rules the cascade can match. Selectors are
//! printed back by lightningcss and re-read into the supported subset;
//! rules whose selectors all fall outside it are dropped.

use lightningcss::printer::PrinterOptions;
use lightningcss::rules::CssRule;
use lightningcss::stylesheet::{ParserOptions, StyleSheet};
use lightningcss::traits::ToCss;

use crate::declaration::convert_block;
use crate::{CssError, Declaration, Selector};

/// Parsed stylesheet
#[derive(Debug, Clone, Default)]
pub struct Stylesheet {
    pub rules: Vec<Rule>,
}

impl Stylesheet {
    pub fn new() -> Self {
        Self::default()
    }
}

/// CSS rule
#[derive(Debug, Clone)]
pub struct Rule {
    pub selectors: Vec<Selector>,
    pub declarations: Vec<Declaration>,
}

/// CSS Parser
#[derive(Debug, Default)]
pub struct CssParser;

impl CssParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a CSS stylesheet
    pub fn parse(&self, css: &str) -> Result<Stylesheet, CssError> {
        let stylesheet = StyleSheet::parse(css, ParserOptions::default()).map_err(|e| {
            CssError::ParseError {
                line: e.loc.as_ref().map_or(0, |l| l.line + 1),
                message: e.kind.to_string(),
            }
        })?;

        let mut result = Stylesheet::new();
        for rule in stylesheet.rules.0.iter() {
            if let Some(converted) = self.convert_rule(rule) {
                result.rules.push(converted);
            }
        }
        Ok(result)
    }

    fn convert_rule(&self, rule: &CssRule) -> Option<Rule> {
        match rule {
            CssRule::Style(style_rule) => {
                let selectors: Vec<Selector> = style_rule
                    .selectors
                    .0
                    .iter()
                    .filter_map(|sel| {
                        let text = sel.to_css_string(PrinterOptions::default()).ok()?;
                        let parsed = Selector::parse(&text);
                        if parsed.is_none() {
                            tracing::trace!(selector = %text, "unsupported selector skipped");
                        }
                        parsed
                    })
                    .collect();
                if selectors.is_empty() {
                    return None;
                }
                Some(Rule {
                    selectors,
                    declarations: convert_block(&style_rule.declarations),
                })
            }
            // At-rules (media queries, keyframes, ...) never apply
            _ => None,
        }
    }
}

/// Parse a CSS stylesheet
pub fn parse_stylesheet(css: &str) -> Result<Stylesheet, CssError> {
    CssParser::new().parse(css)
}
