//! Query execution front end.
//!
//! The runner ties the pieces together: it decodes input text, parses the
//! query, evaluates it and hands back the results. Verbosity is an explicit
//! option here; the evaluator itself never logs.
//!
//! # Example
//!
//! ```
//! use uniquery::runner::Runner;
//!
//! let runner = Runner::default();
//! let names = runner
//!     .run_json("*.debt=0..name", r#"[{"name": "Ann", "debt": 0}, {"name": "Bob", "debt": 5}]"#)
//!     .unwrap();
//! assert_eq!(names, vec![serde_json::json!("Ann")]);
//! ```

use log::{debug, info};
use thiserror::Error;

use crate::document::export::{to_json, to_yaml};
use crate::document::parser::{decode, DecodeError, InputFormat};
use crate::document::tree::Document;
use crate::query::ast::{display_parts, QueryPart};
use crate::query::evaluator::DEFAULT_MAX_DEPTH;
use crate::query::result::{select, ResultMode, ResultSet};
use crate::query::{self, Parser};

/// Errors returned by the runner.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Query(#[from] query::Error),
}

impl From<query::ParseError> for RunError {
    fn from(err: query::ParseError) -> Self {
        RunError::Query(err.into())
    }
}

impl From<query::EvaluationError> for RunError {
    fn from(err: query::EvaluationError) -> Self {
        RunError::Query(err.into())
    }
}

/// Options controlling a [`Runner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunnerOptions {
    /// Log the parsed query before evaluating it
    pub verbose: bool,
    /// Maximum recursion depth of an evaluation
    pub max_depth: usize,
}

impl Default for RunnerOptions {
    fn default() -> Self {
        Self {
            verbose: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Parses and evaluates queries against documents.
#[derive(Debug, Clone, Default)]
pub struct Runner {
    options: RunnerOptions,
}

impl Runner {
    pub fn new(options: RunnerOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RunnerOptions {
        &self.options
    }

    /// Parses a query, logging the result when verbose.
    pub fn parse(&self, query: &str) -> Result<Vec<QueryPart>, RunError> {
        let parts = Parser::parse(query)?;
        if self.options.verbose {
            info!("Parsed query: {:?} ({} parts)", display_parts(&parts), parts.len());
            for (index, part) in parts.iter().enumerate() {
                info!("  part {}: {:?}", index, part);
            }
        }
        Ok(parts)
    }

    /// Runs `query` against `doc`, collecting results per `mode`.
    pub fn run_with_mode<'a>(
        &self,
        query: &str,
        doc: &'a Document,
        mode: ResultMode,
    ) -> Result<ResultSet<'a>, RunError> {
        let parts = self.parse(query)?;
        let results = select(doc, &parts, mode, self.options.max_depth)?;
        debug!("Query {:?} selected {} values", query, results.len());
        for found in results.iter() {
            debug!("  {} at {:?}", found.value.kind(), found.path);
        }
        Ok(results)
    }

    /// Runs `query` against `doc`, returning results in traversal order.
    pub fn run<'a>(&self, query: &str, doc: &'a Document) -> Result<ResultSet<'a>, RunError> {
        self.run_with_mode(query, doc, ResultMode::Ordered)
    }

    /// Runs `query` against `doc`, keeping one result per canonical path.
    pub fn run_deduplicated<'a>(
        &self,
        query: &str,
        doc: &'a Document,
    ) -> Result<ResultSet<'a>, RunError> {
        self.run_with_mode(query, doc, ResultMode::Deduplicated)
    }

    /// Decodes `text` and runs `query` against it.
    ///
    /// The results are converted to owned JSON values, since the decoded
    /// document does not outlive this call.
    pub fn run_text(
        &self,
        query: &str,
        text: &str,
        format: InputFormat,
    ) -> Result<Vec<serde_json::Value>, RunError> {
        // Parse first so a malformed query fails before any decoding work.
        let parts = self.parse(query)?;
        let doc = decode(text, format)?;
        let results = select(&doc, &parts, ResultMode::Ordered, self.options.max_depth)?;
        Ok(results.iter().map(|m| to_json(&doc, m.node)).collect())
    }

    /// Decodes JSON `text` and runs `query` against it.
    pub fn run_json(&self, query: &str, text: &str) -> Result<Vec<serde_json::Value>, RunError> {
        self.run_text(query, text, InputFormat::Json)
    }

    /// Decodes YAML `text` and runs `query` against it.
    ///
    /// Results are YAML values so that non-string mapping keys survive.
    pub fn run_yaml(&self, query: &str, text: &str) -> Result<Vec<serde_yaml::Value>, RunError> {
        let parts = self.parse(query)?;
        let doc = decode(text, InputFormat::Yaml)?;
        let results = select(&doc, &parts, ResultMode::Ordered, self.options.max_depth)?;
        Ok(results.iter().map(|m| to_yaml(&doc, m.node)).collect())
    }
}
