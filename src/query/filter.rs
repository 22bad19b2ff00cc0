//! Value predicates attached to query parts.

use std::fmt;

use regex::Regex;

use super::ast::write_literal;
use crate::document::node::Value;

/// A predicate evaluated against a single value.
#[derive(Debug, Clone)]
pub enum Filter {
    /// `=text`: the value is the string `text`, or a number equal to `text`
    /// parsed as a float.
    Equality(String),
    /// `~pattern`: the value is a string containing a match of the pattern.
    Regex(Regex),
    /// `!filter`: negation of the inner filter.
    Invert(Box<Filter>),
}

impl Filter {
    /// Returns true if `value` satisfies this filter.
    ///
    /// # Example
    ///
    /// ```
    /// use uniquery::document::node::Value;
    /// use uniquery::query::filter::Filter;
    ///
    /// let zero = Filter::Equality("0".to_string());
    /// assert!(zero.matches(&Value::Number(0.0)));
    /// assert!(zero.matches(&Value::String("0".to_string())));
    /// assert!(!zero.matches(&Value::Bool(false)));
    /// ```
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Filter::Equality(text) => match value {
                Value::String(s) => s == text,
                Value::Number(n) => text.parse::<f64>().is_ok_and(|parsed| parsed == *n),
                _ => false,
            },
            Filter::Regex(regex) => value.as_str().is_some_and(|s| regex.is_match(s)),
            Filter::Invert(inner) => !inner.matches(value),
        }
    }
}

/// Returns true if `value` satisfies every filter, stopping at the first miss.
pub fn matches_all(filters: &[Filter], value: &Value) -> bool {
    filters.iter().all(|filter| filter.matches(value))
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::Equality(text) => {
                write!(f, "=")?;
                write_literal(f, text)
            }
            Filter::Regex(regex) => {
                write!(f, "~")?;
                write_literal(f, regex.as_str())
            }
            Filter::Invert(inner) => write!(f, "!{}", inner),
        }
    }
}
