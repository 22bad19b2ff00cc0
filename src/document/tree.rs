//! Arena storage for decoded documents.
//!
//! A `Document` owns every value of a decoded tree in a flat vector. Values
//! refer to their children through [`NodeId`] handles, which stay valid for
//! the lifetime of the document because nodes are never removed.
//!
//! # Example
//!
//! ```
//! use uniquery::document::node::Value;
//! use uniquery::document::tree::Document;
//!
//! let mut doc = Document::new();
//! let answer = doc.insert(Value::Number(42.0));
//! doc.set_root(answer);
//!
//! assert_eq!(doc.get(doc.root()), &Value::Number(42.0));
//! ```

use super::node::{NodeId, Value};

/// A decoded document stored as an arena of values.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    nodes: Vec<Value>,
    root: NodeId,
}

impl Document {
    /// Creates a document whose root is `null`.
    pub fn new() -> Self {
        Self {
            nodes: vec![Value::Null],
            root: NodeId(0),
        }
    }

    /// Creates a document holding a single scalar or empty container as root.
    pub fn from_value(value: Value) -> Self {
        let mut doc = Self::new();
        let root = doc.insert(value);
        doc.set_root(root);
        doc
    }

    /// Adds a value to the arena and returns its handle.
    pub fn insert(&mut self, value: Value) -> NodeId {
        self.nodes.push(value);
        NodeId(self.nodes.len() - 1)
    }

    /// Marks the given node as the document root.
    pub fn set_root(&mut self, root: NodeId) {
        self.root = root;
    }

    /// Returns the handle of the root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Returns the value behind a handle.
    ///
    /// Handles are only meaningful for the document that created them.
    pub fn get(&self, id: NodeId) -> &Value {
        &self.nodes[id.0]
    }

    /// Returns the number of values stored in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the arena holds nothing but the implicit null root.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_document_has_null_root() {
        let doc = Document::new();
        assert_eq!(doc.get(doc.root()), &Value::Null);
        assert!(doc.is_empty());
    }

    #[test]
    fn test_insert_and_set_root() {
        let mut doc = Document::new();
        let a = doc.insert(Value::String("a".to_string()));
        let b = doc.insert(Value::String("b".to_string()));
        let seq = doc.insert(Value::Sequence(vec![a, b]));
        doc.set_root(seq);

        assert_eq!(doc.len(), 4);
        match doc.get(doc.root()) {
            Value::Sequence(items) => {
                assert_eq!(items.len(), 2);
                assert_eq!(doc.get(items[1]), &Value::String("b".to_string()));
            }
            other => panic!("root should be a sequence, got {:?}", other),
        }
    }

    #[test]
    fn test_from_value() {
        let doc = Document::from_value(Value::Bool(true));
        assert_eq!(doc.get(doc.root()), &Value::Bool(true));
    }
}
