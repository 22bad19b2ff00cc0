//! Error types for query parsing and evaluation.

use thiserror::Error;

/// Errors that can occur while parsing a query string.
///
/// Positions are character offsets into the query.
#[derive(Debug, Clone, Error)]
pub enum ParseError {
    #[error("unexpected end of query at position {position}: trailing escape")]
    UnterminatedEscape { position: usize },

    #[error("unexpected end of query at position {position}: unterminated quote")]
    UnterminatedQuote { position: usize },

    #[error("unexpected end of query at position {position}: expected a filter")]
    UnexpectedEnd { position: usize },

    #[error("unexpected filter prefix '{found}' at position {position}")]
    UnexpectedFilterPrefix { position: usize, found: char },

    #[error("invalid regex '{pattern}' at position {position}: {source}")]
    InvalidRegex {
        position: usize,
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Errors that abort an evaluation.
///
/// Missing keys, out-of-range indices and similar misses are not errors;
/// they simply select nothing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluationError {
    #[error("query recursion exceeded the maximum depth of {limit}")]
    DepthExceeded { limit: usize },
}

/// Any error produced by the query layer.
#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
}
