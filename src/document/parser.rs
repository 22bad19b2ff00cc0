//! Decoding JSON and YAML text into documents.
//!
//! JSON is decoded with `serde_json` and its objects become string-keyed
//! [`Value::Mapping`]s. YAML is decoded with `yaml-rust2`, which keeps the
//! original key types, so its mappings become [`Value::GenericMapping`]s.
//!
//! # Example
//!
//! ```
//! use uniquery::document::parser::{parse_json, parse_yaml};
//! use uniquery::document::node::Value;
//!
//! let doc = parse_json(r#"{"name": "Alice"}"#).unwrap();
//! assert!(matches!(doc.get(doc.root()), Value::Mapping(_)));
//!
//! let doc = parse_yaml("true: [push, pull_request]").unwrap();
//! assert!(matches!(doc.get(doc.root()), Value::GenericMapping(_)));
//! ```

use super::node::{NodeId, Value};
use super::tree::Document;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value as SerdeValue;
use thiserror::Error;
use yaml_rust2::{Yaml, YamlLoader};

/// Source format of input text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    #[default]
    Json,
    Yaml,
    /// One JSON value per line, collected into a sequence
    Jsonl,
    /// Try JSON first and fall back to YAML
    Auto,
}

/// Errors produced while decoding source text.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid JSON on line {line}: {source}")]
    JsonLine {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid YAML: {0}")]
    Yaml(#[from] yaml_rust2::ScanError),
}

/// Decodes `text` according to `format`.
///
/// With [`InputFormat::Auto`] the text is decoded as JSON if possible and as
/// YAML otherwise; if both fail, the YAML error is returned.
pub fn decode(text: &str, format: InputFormat) -> Result<Document, DecodeError> {
    match format {
        InputFormat::Json => parse_json(text),
        InputFormat::Yaml => parse_yaml(text),
        InputFormat::Jsonl => parse_jsonl(text),
        InputFormat::Auto => parse_json(text).or_else(|_| parse_yaml(text)),
    }
}

/// Parses a JSON string into a `Document`.
///
/// # Errors
///
/// Returns [`DecodeError::Json`] if the input is not valid JSON.
///
/// ```
/// use uniquery::document::parser::parse_json;
///
/// assert!(parse_json(r#"{"unclosed": "#).is_err());
/// ```
pub fn parse_json(json_str: &str) -> Result<Document, DecodeError> {
    let value: SerdeValue = serde_json::from_str(json_str)?;
    Ok(from_json_value(&value))
}

/// Converts an already decoded `serde_json::Value` into a `Document`.
pub fn from_json_value(value: &SerdeValue) -> Document {
    let mut doc = Document::new();
    let root = insert_json(&mut doc, value);
    doc.set_root(root);
    doc
}

fn insert_json(doc: &mut Document, value: &SerdeValue) -> NodeId {
    let converted = match value {
        SerdeValue::Object(map) => {
            let entries: IndexMap<String, NodeId> = map
                .iter()
                .map(|(k, v)| (k.clone(), insert_json(doc, v)))
                .collect();
            Value::Mapping(entries)
        }
        SerdeValue::Array(arr) => {
            let items = arr.iter().map(|v| insert_json(doc, v)).collect();
            Value::Sequence(items)
        }
        SerdeValue::String(s) => Value::String(s.clone()),
        SerdeValue::Number(n) => Value::Number(n.as_f64().unwrap_or(0.0)),
        SerdeValue::Bool(b) => Value::Bool(*b),
        SerdeValue::Null => Value::Null,
    };
    doc.insert(converted)
}

/// Parses newline-delimited JSON into a `Document` whose root is a sequence
/// of the line values. Blank lines are skipped.
pub fn parse_jsonl(content: &str) -> Result<Document, DecodeError> {
    let mut doc = Document::new();
    let mut lines = Vec::new();

    for (line_num, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let value: SerdeValue = serde_json::from_str(line).map_err(|source| {
            DecodeError::JsonLine {
                line: line_num + 1,
                source,
            }
        })?;
        lines.push(insert_json(&mut doc, &value));
    }

    let root = doc.insert(Value::Sequence(lines));
    doc.set_root(root);
    Ok(doc)
}

/// Parses a YAML string into a `Document`.
///
/// Only the first document of a multi-document stream is used. An empty
/// stream decodes to a `null` root.
///
/// # Errors
///
/// Returns [`DecodeError::Yaml`] if the input cannot be scanned as YAML.
pub fn parse_yaml(yaml_str: &str) -> Result<Document, DecodeError> {
    let documents = YamlLoader::load_from_str(yaml_str)?;
    Ok(match documents.first() {
        Some(first) => from_yaml_value(first),
        None => Document::new(),
    })
}

/// Converts an already decoded `yaml_rust2::Yaml` into a `Document`.
pub fn from_yaml_value(value: &Yaml) -> Document {
    let mut doc = Document::new();
    let root = insert_yaml(&mut doc, value);
    doc.set_root(root);
    doc
}

fn insert_yaml(doc: &mut Document, value: &Yaml) -> NodeId {
    let converted = match value {
        Yaml::Hash(hash) => {
            let entries = hash
                .iter()
                .map(|(k, v)| {
                    let key = insert_yaml(doc, k);
                    (key, insert_yaml(doc, v))
                })
                .collect();
            Value::GenericMapping(entries)
        }
        Yaml::Array(items) => {
            let items = items.iter().map(|v| insert_yaml(doc, v)).collect();
            Value::Sequence(items)
        }
        Yaml::String(s) => Value::String(s.clone()),
        Yaml::Integer(i) => Value::Number(*i as f64),
        Yaml::Real(_) => Value::Number(value.as_f64().unwrap_or(f64::NAN)),
        Yaml::Boolean(b) => Value::Bool(*b),
        // The loader resolves aliases itself; anything left over is treated as null.
        _ => Value::Null,
    };
    doc.insert(converted)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root_value(doc: &Document) -> &Value {
        doc.get(doc.root())
    }

    #[test]
    fn test_parse_json_scalars() {
        assert_eq!(root_value(&parse_json("null").unwrap()), &Value::Null);
        assert_eq!(root_value(&parse_json("true").unwrap()), &Value::Bool(true));
        assert_eq!(
            root_value(&parse_json("1234.56").unwrap()),
            &Value::Number(1234.56)
        );
        assert_eq!(
            root_value(&parse_json(r#""root""#).unwrap()),
            &Value::String("root".to_string())
        );
    }

    #[test]
    fn test_parse_json_object_preserves_order() {
        let doc = parse_json(r#"{"zeta": 1, "alpha": 2}"#).unwrap();
        match root_value(&doc) {
            Value::Mapping(map) => {
                let keys: Vec<&str> = map.keys().map(String::as_str).collect();
                assert_eq!(keys, vec!["zeta", "alpha"]);
                assert_eq!(doc.get(map["alpha"]), &Value::Number(2.0));
            }
            other => panic!("expected mapping, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_json_nested_arrays() {
        let doc = parse_json("[[1], []]").unwrap();
        match root_value(&doc) {
            Value::Sequence(items) => {
                assert_eq!(items.len(), 2);
                assert_eq!(doc.get(items[1]), &Value::Sequence(vec![]));
            }
            other => panic!("expected sequence, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_invalid_json() {
        let err = parse_json("{").unwrap_err();
        assert!(matches!(err, DecodeError::Json(_)));
    }

    #[test]
    fn test_parse_yaml_keeps_key_types() {
        let yaml = r#"
true: [push, pull_request]
8080: port
name: ci
"#;
        let doc = parse_yaml(yaml).unwrap();
        match root_value(&doc) {
            Value::GenericMapping(entries) => {
                assert_eq!(entries.len(), 3);
                assert_eq!(doc.get(entries[0].0), &Value::Bool(true));
                assert_eq!(doc.get(entries[1].0), &Value::Number(8080.0));
                assert_eq!(doc.get(entries[2].0), &Value::String("name".to_string()));
            }
            other => panic!("expected generic mapping, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_yaml_reals() {
        let doc = parse_yaml("- 1.5\n- .inf\n").unwrap();
        match root_value(&doc) {
            Value::Sequence(items) => {
                assert_eq!(doc.get(items[0]), &Value::Number(1.5));
                assert_eq!(doc.get(items[1]), &Value::Number(f64::INFINITY));
            }
            other => panic!("expected sequence, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_yaml_empty_stream_is_null() {
        let doc = parse_yaml("").unwrap();
        assert_eq!(root_value(&doc), &Value::Null);
    }

    #[test]
    fn test_decode_auto_falls_back_to_yaml() {
        let doc = decode("a: 1", InputFormat::Auto).unwrap();
        assert!(matches!(root_value(&doc), Value::GenericMapping(_)));

        let doc = decode(r#"{"a": 1}"#, InputFormat::Auto).unwrap();
        assert!(matches!(root_value(&doc), Value::Mapping(_)));

        assert!(decode("a: 1", InputFormat::Json).is_err());
    }

    #[test]
    fn test_parse_jsonl() {
        let content = "{\"id\":1}\n\n[2]\n\"three\"\n";
        let doc = parse_jsonl(content).unwrap();
        match root_value(&doc) {
            Value::Sequence(lines) => {
                assert_eq!(lines.len(), 3);
                assert!(matches!(doc.get(lines[0]), Value::Mapping(_)));
                assert_eq!(doc.get(lines[2]), &Value::String("three".to_string()));
            }
            other => panic!("expected sequence, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_jsonl_reports_line() {
        let err = parse_jsonl("{\"valid\":true}\n{invalid json}\n").unwrap_err();
        assert!(matches!(err, DecodeError::JsonLine { line: 2, .. }));
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let err = parse_yaml("key: \"unterminated").unwrap_err();
        assert!(matches!(err, DecodeError::Yaml(_)));
    }
}
