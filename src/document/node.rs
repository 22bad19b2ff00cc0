//! Value representation for decoded documents.
//!
//! Every decoded JSON or YAML value lives in a [`Document`](super::tree::Document)
//! arena and is addressed by a [`NodeId`]. Containers hold the ids of their
//! children rather than the children themselves, so any node can be referenced
//! from many places without tying traversal to ownership.
//!
//! # Example
//!
//! ```
//! use uniquery::document::node::Value;
//! use uniquery::document::tree::Document;
//!
//! let mut doc = Document::new();
//! let name = doc.insert(Value::String("Alice".to_string()));
//! let root = doc.insert(Value::Sequence(vec![name]));
//! doc.set_root(root);
//!
//! assert_eq!(doc.get(doc.root()).kind(), "sequence");
//! ```

use indexmap::IndexMap;

/// Handle to a value stored in a [`Document`](super::tree::Document).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

/// A decoded value.
///
/// JSON objects decode to [`Value::Mapping`]. YAML mappings decode to
/// [`Value::GenericMapping`] because YAML keys may be booleans, numbers,
/// null or even containers; the keys are stored as nodes of their own.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A null value
    Null,
    /// A boolean
    Bool(bool),
    /// A number; all numbers are stored as `f64`
    Number(f64),
    /// A string
    String(String),
    /// An ordered list of values
    Sequence(Vec<NodeId>),
    /// A mapping with string keys
    Mapping(IndexMap<String, NodeId>),
    /// A mapping whose keys are arbitrary values, as `(key, value)` pairs
    GenericMapping(Vec<(NodeId, NodeId)>),
}

impl Value {
    /// Returns the string contents if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns a short name for the kind of value, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Sequence(_) => "sequence",
            Value::Mapping(_) | Value::GenericMapping(_) => "mapping",
        }
    }
}

/// Formats a number the way it would be written by hand.
///
/// Integral values are printed without a fractional part, so a YAML key
/// `8080` is rendered as `8080` rather than `8080.0`.
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number_integral() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(8080.0), "8080");
        assert_eq!(format_number(-3.0), "-3");
    }

    #[test]
    fn test_format_number_fractional() {
        assert_eq!(format_number(1.5), "1.5");
        assert_eq!(format_number(f64::INFINITY), "inf");
    }

    #[test]
    fn test_value_kind() {
        assert_eq!(Value::Null.kind(), "null");
        assert_eq!(Value::GenericMapping(vec![]).kind(), "mapping");
        assert_eq!(Value::Mapping(IndexMap::new()).kind(), "mapping");
    }

    #[test]
    fn test_value_accessors() {
        assert_eq!(Value::String("a".to_string()).as_str(), Some("a"));
        assert_eq!(Value::Number(2.0).as_str(), None);
    }
}
