//! Query string parser.
//!
//! A query is a sequence of parts separated by `.`. Each part starts with its
//! specifier text and may be followed by any number of filters:
//!
//! - `=text` equality
//! - `~pattern` regular expression
//! - `!filter` negation of the filter that follows
//!
//! Inside specifier and filter text, `\` escapes the next character and
//! `"` toggles a quoted span in which `.`, `=`, `~` and `!` are literal.

use regex::Regex;

use super::ast::{QueryPart, Specifier};
use super::error::ParseError;
use super::filter::Filter;

const ESCAPE: char = '\\';
const QUOTE: char = '"';
const SEPARATOR: char = '.';
const EQUALITY: char = '=';
const REGEX: char = '~';
const INVERT: char = '!';

/// Parser for query strings.
pub struct Parser {
    input: Vec<char>,
    position: usize,
}

impl Parser {
    /// Creates a new parser for the given query string.
    pub fn new(query: &str) -> Self {
        Self {
            input: query.chars().collect(),
            position: 0,
        }
    }

    /// Parses the query string into its parts.
    ///
    /// The empty query parses to no parts at all, which selects the root.
    ///
    /// # Example
    ///
    /// ```
    /// use uniquery::query::ast::Specifier;
    /// use uniquery::query::parser::Parser;
    ///
    /// let parts = Parser::parse("*.debt=0..name").unwrap();
    /// assert_eq!(parts.len(), 4);
    /// assert_eq!(parts[0].specifier, Specifier::Children);
    /// assert_eq!(parts[1].filters.len(), 1);
    /// assert_eq!(parts[2].specifier, Specifier::Parent);
    /// ```
    pub fn parse(query: &str) -> Result<Vec<QueryPart>, ParseError> {
        let mut parser = Parser::new(query);
        parser.parse_query()
    }

    fn parse_query(&mut self) -> Result<Vec<QueryPart>, ParseError> {
        let mut parts = Vec::new();

        while !self.is_eof() {
            let specifier = self.parse_text()?;

            let mut filters = Vec::new();
            while let Some(filter) = self.parse_filter()? {
                filters.push(filter);
            }

            parts.push(QueryPart::new(Specifier::from_text(specifier), filters));

            // Skip the separator that ended this part.
            self.next();
        }

        Ok(parts)
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Returns the current character and advances past it.
    fn next(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;
        Some(ch)
    }

    fn is_eof(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Reads literal text up to the next unescaped, unquoted meta-character.
    fn parse_text(&mut self) -> Result<String, ParseError> {
        let mut text = String::new();
        let mut escaped_at = None;
        let mut quoted_at = None;

        while let Some(ch) = self.peek() {
            if escaped_at.is_some() {
                text.push(ch);
                escaped_at = None;
            } else if quoted_at.is_some() {
                if ch == QUOTE {
                    quoted_at = None;
                } else {
                    text.push(ch);
                }
            } else {
                match ch {
                    SEPARATOR | EQUALITY | REGEX | INVERT => return Ok(text),
                    ESCAPE => escaped_at = Some(self.position),
                    QUOTE => quoted_at = Some(self.position),
                    _ => text.push(ch),
                }
            }
            self.position += 1;
        }

        if let Some(position) = escaped_at {
            return Err(ParseError::UnterminatedEscape { position });
        }
        if let Some(position) = quoted_at {
            return Err(ParseError::UnterminatedQuote { position });
        }
        Ok(text)
    }

    /// Parses one filter clause, or returns `None` at a separator or the end.
    fn parse_filter(&mut self) -> Result<Option<Filter>, ParseError> {
        let position = self.position;
        let prefix = match self.peek() {
            None | Some(SEPARATOR) => return Ok(None),
            Some(ch) => ch,
        };

        match prefix {
            EQUALITY => {
                self.next();
                Ok(Some(Filter::Equality(self.parse_text()?)))
            }
            REGEX => {
                self.next();
                let pattern = self.parse_text()?;
                let regex = Regex::new(&pattern).map_err(|source| ParseError::InvalidRegex {
                    position,
                    pattern,
                    source,
                })?;
                Ok(Some(Filter::Regex(regex)))
            }
            INVERT => {
                self.next();
                match self.parse_filter()? {
                    Some(inner) => Ok(Some(Filter::Invert(Box::new(inner)))),
                    None => Err(match self.peek() {
                        Some(found) => ParseError::UnexpectedFilterPrefix {
                            position: self.position,
                            found,
                        },
                        None => ParseError::UnexpectedEnd {
                            position: self.position,
                        },
                    }),
                }
            }
            found => Err(ParseError::UnexpectedFilterPrefix { position, found }),
        }
    }
}

/// Parses a query string. Shorthand for [`Parser::parse`].
pub fn parse(query: &str) -> Result<Vec<QueryPart>, ParseError> {
    Parser::parse(query)
}
