//! Query language for selecting values from decoded documents.
//!
//! # Syntax
//!
//! - `name` - Mapping key, or sequence index when the text is a number
//! - `*` - All direct children
//! - `**` - The current node and all of its descendants, in pre-order
//! - an empty part, as in `a..b` - Step back to the parent
//! - `=text` - Keep only strings equal to `text` or numbers equal to it
//! - `~pattern` - Keep only strings matching the regular expression
//! - `!filter` - Negate the following filter
//! - `\c` escapes a character, `"..."` quotes a span
//!
//! # Examples
//!
//! ```
//! // *.debt=0..name        names of everyone without debt
//! // *.name!~" Doe$"       every name not ending in " Doe"
//! // **.href~item..title   titles of all nodes whose href mentions "item"
//! // on.*~push             YAML `true:` key matched by its `on` spelling
//! ```

pub mod ast;
pub mod element;
pub mod error;
pub mod evaluator;
pub mod filter;
pub mod parser;
pub mod result;

pub use ast::{QueryPart, Specifier};
pub use error::{Error, EvaluationError, ParseError};
pub use evaluator::{Evaluator, DEFAULT_MAX_DEPTH};
pub use filter::Filter;
pub use parser::Parser;
pub use result::{select, Match, ResultMode, ResultSet};

use crate::document::tree::Document;

/// Parses and evaluates the query `text` against `doc` in one step.
///
/// # Example
///
/// ```
/// use uniquery::document::parser::parse_json;
/// use uniquery::document::node::Value;
/// use uniquery::query::{query, ResultMode};
///
/// let doc = parse_json(r#"{"child": 123}"#).unwrap();
/// let results = query(&doc, "child", ResultMode::Ordered).unwrap();
/// assert_eq!(results.values(), vec![&Value::Number(123.0)]);
/// ```
pub fn query<'a>(doc: &'a Document, text: &str, mode: ResultMode) -> Result<ResultSet<'a>, Error> {
    let parts = Parser::parse(text)?;
    Ok(select(doc, &parts, mode, DEFAULT_MAX_DEPTH)?)
}
