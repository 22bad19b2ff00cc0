//! Query evaluation over a document.
//!
//! Evaluation is a recursion over the query parts: the first part selects a
//! set of elements relative to the current element, every selected element
//! that passes the part's filters is queried with the remaining parts, and
//! the results are concatenated in traversal order. With no parts left the
//! current element itself is the result.
//!
//! `**` expands the whole subtree below an element, so it dominates the cost
//! of evaluating large documents.

use super::ast::{QueryPart, Specifier};
use super::element::{ElementId, Key, Trail};
use super::error::EvaluationError;
use super::filter::matches_all;
use crate::document::export::render_text;
use crate::document::node::{NodeId, Value};
use crate::document::tree::Document;

/// Default limit on recursion depth.
pub const DEFAULT_MAX_DEPTH: usize = 512;

const TRUE_SPELLINGS: [&str; 4] = ["true", "on", "enabled", "enable"];
const FALSE_SPELLINGS: [&str; 4] = ["false", "off", "disabled", "disable"];

/// Evaluates parsed queries against a document.
pub struct Evaluator<'a> {
    doc: &'a Document,
    trail: Trail,
    max_depth: usize,
}

impl<'a> Evaluator<'a> {
    pub fn new(doc: &'a Document) -> Self {
        Evaluator {
            doc,
            trail: Trail::new(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets the maximum recursion depth before evaluation fails.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Evaluates `parts` starting at the document root.
    ///
    /// Returns the matching elements in traversal order; the same node may
    /// appear more than once if it is reached along different routes.
    pub fn evaluate(&mut self, parts: &[QueryPart]) -> Result<Vec<ElementId>, EvaluationError> {
        let root = self.trail.push_root(self.doc.root());
        self.query(root, parts, 0)
    }

    /// Returns the elements created so far, for resolving nodes and paths.
    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    fn query(
        &mut self,
        current: ElementId,
        parts: &[QueryPart],
        depth: usize,
    ) -> Result<Vec<ElementId>, EvaluationError> {
        self.check_depth(depth)?;

        let Some((part, rest)) = parts.split_first() else {
            return Ok(vec![current]);
        };

        let selected = self.select(current, &part.specifier, depth)?;

        let doc = self.doc;
        let mut results = Vec::new();
        for element in selected {
            let value = doc.get(self.trail.get(element).node);
            if matches_all(&part.filters, value) {
                results.extend(self.query(element, rest, depth + 1)?);
            }
        }
        Ok(results)
    }

    fn select(
        &mut self,
        current: ElementId,
        specifier: &Specifier,
        depth: usize,
    ) -> Result<Vec<ElementId>, EvaluationError> {
        Ok(match specifier {
            Specifier::Parent => self.trail.parent(current).into_iter().collect(),
            Specifier::Children => self.children(current),
            Specifier::Descendants => {
                let mut descendants = Vec::new();
                self.descend(current, depth, &mut descendants)?;
                descendants
            }
            Specifier::Literal(text) => self.lookup(current, text),
        })
    }

    /// Creates one element per direct child of `current`.
    fn children(&mut self, current: ElementId) -> Vec<ElementId> {
        let doc = self.doc;
        let trail = &mut self.trail;
        match doc.get(trail.get(current).node) {
            Value::Sequence(items) => items
                .iter()
                .enumerate()
                .map(|(index, item)| trail.push_child(current, Key::Index(index), *item))
                .collect(),
            Value::Mapping(entries) => entries
                .iter()
                .map(|(key, child)| trail.push_child(current, Key::Name(key.clone()), *child))
                .collect(),
            Value::GenericMapping(entries) => entries
                .iter()
                .enumerate()
                .map(|(position, (key, child))| {
                    trail.push_child(current, Key::Entry { key: *key, position }, *child)
                })
                .collect(),
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => Vec::new(),
        }
    }

    /// Collects `current` and all of its descendants in pre-order.
    fn descend(
        &mut self,
        current: ElementId,
        depth: usize,
        out: &mut Vec<ElementId>,
    ) -> Result<(), EvaluationError> {
        self.check_depth(depth)?;
        out.push(current);
        for child in self.children(current) {
            self.descend(child, depth + 1, out)?;
        }
        Ok(())
    }

    /// Resolves a literal specifier as a mapping key or sequence index.
    ///
    /// Generic mappings may yield several elements, one for every key that
    /// compares equal to the specifier.
    fn lookup(&mut self, current: ElementId, text: &str) -> Vec<ElementId> {
        let doc = self.doc;
        let trail = &mut self.trail;
        match doc.get(trail.get(current).node) {
            Value::Mapping(entries) => entries
                .get(text)
                .map(|child| trail.push_child(current, Key::Name(text.to_string()), *child))
                .into_iter()
                .collect(),
            Value::GenericMapping(entries) => entries
                .iter()
                .enumerate()
                .filter(|(_, (key, _))| key_matches(doc, *key, text))
                .map(|(position, (key, child))| {
                    trail.push_child(current, Key::Entry { key: *key, position }, *child)
                })
                .collect(),
            Value::Sequence(items) => text
                .parse::<usize>()
                .ok()
                .and_then(|index| items.get(index).map(|item| (index, *item)))
                .map(|(index, item)| trail.push_child(current, Key::Index(index), item))
                .into_iter()
                .collect(),
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => Vec::new(),
        }
    }

    fn check_depth(&self, depth: usize) -> Result<(), EvaluationError> {
        if depth > self.max_depth {
            return Err(EvaluationError::DepthExceeded {
                limit: self.max_depth,
            });
        }
        Ok(())
    }
}

/// Compares a generic mapping key against specifier text.
///
/// String keys must match exactly. Boolean keys accept the usual YAML-ish
/// spellings, case-insensitively. Any other key is compared by its textual
/// rendering.
pub fn key_matches(doc: &Document, key: NodeId, text: &str) -> bool {
    match doc.get(key) {
        Value::String(s) => s == text,
        Value::Bool(b) => {
            let lower = text.to_lowercase();
            let spellings = if *b { &TRUE_SPELLINGS } else { &FALSE_SPELLINGS };
            spellings.contains(&lower.as_str())
        }
        _ => render_text(doc, key) == text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::export::to_json;
    use crate::document::parser::{parse_json, parse_yaml};
    use crate::query::parser::Parser;

    fn run(query: &str, doc: &Document) -> Vec<serde_json::Value> {
        let parts = Parser::parse(query).unwrap();
        let mut evaluator = Evaluator::new(doc);
        let results = evaluator.evaluate(&parts).unwrap();
        results
            .into_iter()
            .map(|id| to_json(doc, evaluator.trail().get(id).node))
            .collect()
    }

    fn run_json(query: &str, json: &str) -> Vec<serde_json::Value> {
        run(query, &parse_json(json).unwrap())
    }

    #[test]
    fn test_empty_query_returns_root() {
        let results = run_json("", r#"{"child": 123}"#);
        assert_eq!(results, vec![serde_json::json!({"child": 123})]);
    }

    #[test]
    fn test_children_of_scalar_is_empty() {
        assert!(run_json("*", "1234.56").is_empty());
        assert!(run_json("*", "null").is_empty());
    }

    #[test]
    fn test_descendants_include_self_pre_order() {
        let results = run_json("**", r#"{"a": [1, {"b": 2}], "c": 3}"#);
        assert_eq!(
            results,
            vec![
                serde_json::json!({"a": [1, {"b": 2}], "c": 3}),
                serde_json::json!([1, {"b": 2}]),
                serde_json::json!(1),
                serde_json::json!({"b": 2}),
                serde_json::json!(2),
                serde_json::json!(3),
            ]
        );
    }

    #[test]
    fn test_index_lookup_bounds() {
        let json = r#"["a", "b", "c"]"#;
        assert_eq!(run_json("2", json), vec![serde_json::json!("c")]);
        assert!(run_json("3", json).is_empty());
        assert!(run_json("-1", json).is_empty());
        assert!(run_json("x", json).is_empty());
    }

    #[test]
    fn test_parent_navigation() {
        assert_eq!(
            run_json("child..", r#"{"child": 123}"#),
            vec![serde_json::json!({"child": 123})]
        );
        assert!(run_json(".", r#"{"child": 123}"#).is_empty());
        assert!(run_json("child...", r#"{"child": 123}"#).is_empty());
    }

    #[test]
    fn test_filters_gate_recursion() {
        let json = r#"[{"n": "a", "v": 1}, {"n": "b", "v": 2}]"#;
        assert_eq!(run_json("*.v=2..n", json), vec![serde_json::json!("b")]);
        assert_eq!(run_json("*.v!=2..n", json), vec![serde_json::json!("a")]);
    }

    #[test]
    fn test_generic_mapping_bool_key() {
        let doc = parse_yaml("true: [push, pull_request]\nname: ci\n").unwrap();
        assert_eq!(run("on.*~push", &doc), vec![serde_json::json!("push")]);
        assert_eq!(run("ENABLED.1", &doc), vec![serde_json::json!("pull_request")]);
        assert!(run("off", &doc).is_empty());
    }

    #[test]
    fn test_generic_mapping_returns_every_equal_key() {
        let doc = parse_yaml("true: a\n\"on\": b\n1: c\n").unwrap();
        assert_eq!(
            run("on", &doc),
            vec![serde_json::json!("a"), serde_json::json!("b")]
        );
        assert_eq!(run("1", &doc), vec![serde_json::json!("c")]);
    }

    #[test]
    fn test_key_matches() {
        let doc = parse_yaml("[false, 2.5, ~, Key]").unwrap();
        let items = match doc.get(doc.root()) {
            Value::Sequence(items) => items.clone(),
            other => panic!("expected sequence, got {:?}", other),
        };
        assert!(key_matches(&doc, items[0], "Off"));
        assert!(key_matches(&doc, items[0], "DISABLE"));
        assert!(!key_matches(&doc, items[0], "no"));
        assert!(key_matches(&doc, items[1], "2.5"));
        assert!(key_matches(&doc, items[2], "null"));
        assert!(key_matches(&doc, items[3], "Key"));
        assert!(!key_matches(&doc, items[3], "key"));
    }

    #[test]
    fn test_depth_limit() {
        let doc = parse_json(r#"{"a": {"b": {"c": {"d": 1}}}}"#).unwrap();
        let parts = Parser::parse("**").unwrap();

        let mut shallow = Evaluator::new(&doc).with_max_depth(2);
        assert_eq!(
            shallow.evaluate(&parts),
            Err(EvaluationError::DepthExceeded { limit: 2 })
        );

        let mut deep = Evaluator::new(&doc).with_max_depth(8);
        assert_eq!(deep.evaluate(&parts).map(|r| r.len()), Ok(5));
    }
}
