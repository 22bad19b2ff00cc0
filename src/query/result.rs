//! Aggregation of evaluation results.

use indexmap::IndexMap;

use super::ast::QueryPart;
use super::element::ElementId;
use super::error::EvaluationError;
use super::evaluator::Evaluator;
use crate::document::node::{NodeId, Value};
use crate::document::tree::Document;

/// How results of an evaluation are collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultMode {
    /// Every result in traversal order, duplicates included.
    #[default]
    Ordered,
    /// One result per canonical path, in order of first appearance.
    Deduplicated,
}

/// A single selected value.
#[derive(Debug, Clone, PartialEq)]
pub struct Match<'a> {
    pub node: NodeId,
    pub value: &'a Value,
    /// Canonical path of the element that selected this value.
    pub path: String,
}

/// The results of a query.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultSet<'a> {
    Ordered(Vec<Match<'a>>),
    Deduplicated(IndexMap<String, Match<'a>>),
}

impl<'a> ResultSet<'a> {
    pub fn len(&self) -> usize {
        match self {
            ResultSet::Ordered(matches) => matches.len(),
            ResultSet::Deduplicated(matches) => matches.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over the matches in result order.
    pub fn iter(&self) -> Box<dyn Iterator<Item = &Match<'a>> + '_> {
        match self {
            ResultSet::Ordered(matches) => Box::new(matches.iter()),
            ResultSet::Deduplicated(matches) => Box::new(matches.values()),
        }
    }

    /// Returns the selected values in result order.
    pub fn values(&self) -> Vec<&'a Value> {
        self.iter().map(|m| m.value).collect()
    }

    /// Returns the selected node handles in result order.
    pub fn nodes(&self) -> Vec<NodeId> {
        self.iter().map(|m| m.node).collect()
    }
}

/// Evaluates `parts` against `doc` and aggregates the results per `mode`.
///
/// # Example
///
/// ```
/// use uniquery::document::parser::parse_json;
/// use uniquery::query::parser::Parser;
/// use uniquery::query::result::{select, ResultMode};
/// use uniquery::query::evaluator::DEFAULT_MAX_DEPTH;
///
/// let doc = parse_json(r#"{"a": {"b": 1}}"#).unwrap();
/// let parts = Parser::parse("**.**").unwrap();
///
/// let ordered = select(&doc, &parts, ResultMode::Ordered, DEFAULT_MAX_DEPTH).unwrap();
/// let unique = select(&doc, &parts, ResultMode::Deduplicated, DEFAULT_MAX_DEPTH).unwrap();
/// assert_eq!(ordered.len(), 6);
/// assert_eq!(unique.len(), 3);
/// ```
pub fn select<'a>(
    doc: &'a Document,
    parts: &[QueryPart],
    mode: ResultMode,
    max_depth: usize,
) -> Result<ResultSet<'a>, EvaluationError> {
    let mut evaluator = Evaluator::new(doc).with_max_depth(max_depth);
    let elements = evaluator.evaluate(parts)?;
    let trail = evaluator.trail();

    let to_match = |id: ElementId| {
        let node = trail.get(id).node;
        Match {
            node,
            value: doc.get(node),
            path: trail.canonical_path(doc, id),
        }
    };

    Ok(match mode {
        ResultMode::Ordered => ResultSet::Ordered(elements.into_iter().map(to_match).collect()),
        ResultMode::Deduplicated => {
            let mut unique = IndexMap::new();
            for id in elements {
                let found = to_match(id);
                unique.entry(found.path.clone()).or_insert(found);
            }
            ResultSet::Deduplicated(unique)
        }
    })
}
