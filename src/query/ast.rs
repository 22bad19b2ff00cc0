//! Parsed representation of a query.

use std::fmt;

use super::filter::Filter;

/// The selector of a single query part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Specifier {
    /// Empty text: step up to the parent element
    Parent,
    /// `*`: all direct children
    Children,
    /// `**`: the element itself followed by all of its descendants
    Descendants,
    /// Any other text: a mapping key or sequence index
    Literal(String),
}

impl Specifier {
    /// Classifies the raw text of a part.
    pub fn from_text(text: String) -> Self {
        match text.as_str() {
            "" => Specifier::Parent,
            "*" => Specifier::Children,
            "**" => Specifier::Descendants,
            _ => Specifier::Literal(text),
        }
    }
}

impl fmt::Display for Specifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Specifier::Parent => Ok(()),
            Specifier::Children => write!(f, "*"),
            Specifier::Descendants => write!(f, "**"),
            Specifier::Literal(text) => write_literal(f, text),
        }
    }
}

/// Writes literal text so that it parses back to the same literal.
pub(crate) fn write_literal(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    for ch in text.chars() {
        if matches!(ch, '.' | '=' | '~' | '!' | '\\' | '"') {
            write!(f, "\\")?;
        }
        write!(f, "{}", ch)?;
    }
    Ok(())
}

/// One dot-separated part of a query: a specifier and its filters.
#[derive(Debug, Clone)]
pub struct QueryPart {
    pub specifier: Specifier,
    /// Filters that must all match for a selected element to be kept.
    pub filters: Vec<Filter>,
}

impl QueryPart {
    pub fn new(specifier: Specifier, filters: Vec<Filter>) -> Self {
        Self { specifier, filters }
    }
}

impl fmt::Display for QueryPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.specifier)?;
        for filter in &self.filters {
            write!(f, "{}", filter)?;
        }
        Ok(())
    }
}

/// Renders parts back into query text, joined with dots.
pub fn display_parts(parts: &[QueryPart]) -> String {
    parts
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(".")
}
