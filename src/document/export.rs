//! Conversion of document nodes back into serde values for printing.
//!
//! Results are rendered by converting the selected node into a
//! `serde_json::Value` or `serde_yaml::Value` and handing it to the
//! respective serializer.

use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};

use super::node::{format_number, NodeId, Value};
use super::tree::Document;

/// Rendering format for printed results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One compact JSON value per line
    #[default]
    Json,
    /// One YAML document per result
    Yaml,
}

/// Renders the subtree at `id` as text in the given format.
///
/// JSON output is a single line; YAML output is a document without the
/// leading `---` marker and without a trailing newline.
///
/// # Example
///
/// ```
/// use uniquery::document::export::{render, OutputFormat};
/// use uniquery::document::parser::parse_json;
///
/// let doc = parse_json(r#"{"child": [1, "two"]}"#).unwrap();
/// assert_eq!(render(&doc, doc.root(), OutputFormat::Json).unwrap(), r#"{"child":[1,"two"]}"#);
/// ```
pub fn render(doc: &Document, id: NodeId, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string(&to_json(doc, id)).context("Failed to serialize result as JSON")
        }
        OutputFormat::Yaml => {
            let text = serde_yaml::to_string(&to_yaml(doc, id))
                .context("Failed to serialize result as YAML")?;
            Ok(text.trim_end().to_string())
        }
    }
}

/// Converts the subtree at `id` to a `serde_json::Value`.
///
/// Generic mapping keys are rendered as text since JSON only allows string
/// keys. When two keys render alike (YAML `true` and `"true"`), the later
/// one is written as `key#position` and a warning is logged, so no entry is
/// lost. Non-finite numbers become `null`.
///
/// # Example
///
/// ```
/// use uniquery::document::export::to_json;
/// use uniquery::document::parser::parse_yaml;
///
/// let doc = parse_yaml("true: [push]").unwrap();
/// let json = to_json(&doc, doc.root());
/// assert_eq!(json.to_string(), r#"{"true":["push"]}"#);
/// ```
pub fn to_json(doc: &Document, id: NodeId) -> serde_json::Value {
    match doc.get(id) {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Number(n) => json_number(*n),
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Sequence(items) => {
            serde_json::Value::Array(items.iter().map(|item| to_json(doc, *item)).collect())
        }
        Value::Mapping(entries) => serde_json::Value::Object(
            entries
                .iter()
                .map(|(k, v)| (k.clone(), to_json(doc, *v)))
                .collect(),
        ),
        Value::GenericMapping(entries) => {
            let mut map = serde_json::Map::with_capacity(entries.len());
            for (position, (k, v)) in entries.iter().enumerate() {
                let mut key = render_text(doc, *k);
                if map.contains_key(&key) {
                    let renamed = format!("{}#{}", key, position);
                    warn!("Duplicate JSON key {:?} written as {:?}", key, renamed);
                    key = renamed;
                }
                map.insert(key, to_json(doc, *v));
            }
            serde_json::Value::Object(map)
        }
    }
}

fn json_number(n: f64) -> serde_json::Value {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        serde_json::Value::Number((n as i64).into())
    } else {
        serde_json::Number::from_f64(n)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null)
    }
}

/// Converts the subtree at `id` to a `serde_yaml::Value`.
///
/// Unlike JSON, YAML output keeps non-string mapping keys as they are.
pub fn to_yaml(doc: &Document, id: NodeId) -> serde_yaml::Value {
    match doc.get(id) {
        Value::Null => serde_yaml::Value::Null,
        Value::Bool(b) => serde_yaml::Value::Bool(*b),
        Value::Number(n) => yaml_number(*n),
        Value::String(s) => serde_yaml::Value::String(s.clone()),
        Value::Sequence(items) => {
            serde_yaml::Value::Sequence(items.iter().map(|item| to_yaml(doc, *item)).collect())
        }
        Value::Mapping(entries) => {
            let map: serde_yaml::Mapping = entries
                .iter()
                .map(|(k, v)| (serde_yaml::Value::String(k.clone()), to_yaml(doc, *v)))
                .collect();
            serde_yaml::Value::Mapping(map)
        }
        Value::GenericMapping(entries) => {
            let map: serde_yaml::Mapping = entries
                .iter()
                .map(|(k, v)| (to_yaml(doc, *k), to_yaml(doc, *v)))
                .collect();
            serde_yaml::Value::Mapping(map)
        }
    }
}

fn yaml_number(n: f64) -> serde_yaml::Value {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        serde_yaml::Value::Number(serde_yaml::Number::from(n as i64))
    } else {
        serde_yaml::Value::Number(serde_yaml::Number::from(n))
    }
}

/// Renders a node as plain text.
///
/// Strings are returned verbatim, scalars in their usual spelling and
/// containers as compact JSON. Used for key comparison and for JSON keys.
pub fn render_text(doc: &Document, id: NodeId) -> String {
    match doc.get(id) {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => format_number(*n),
        Value::String(s) => s.clone(),
        Value::Sequence(_) | Value::Mapping(_) | Value::GenericMapping(_) => {
            to_json(doc, id).to_string()
        }
    }
}
