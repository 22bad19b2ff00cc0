//! Traversal elements and canonical paths.
//!
//! An element is a position in the document reached during evaluation: the
//! node it points at, the element it was reached from, and the key used to
//! get there. Elements live in a [`Trail`] owned by the evaluator and refer to
//! their parents by [`ElementId`], so the parent link is a lookup into the
//! trail and never owns anything.

use crate::document::export::render_text;
use crate::document::node::{format_number, NodeId, Value};
use crate::document::tree::Document;

/// Handle to an element stored in a [`Trail`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(usize);

/// How an element was reached from its parent.
#[derive(Debug, Clone, PartialEq)]
pub enum Key {
    /// Entry of a string-keyed mapping
    Name(String),
    /// Position in a sequence
    Index(usize),
    /// Entry of a generic mapping. The key is itself a node; `position` is
    /// the entry's place among the mapping's entries.
    Entry { key: NodeId, position: usize },
}

/// A traversal node.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub node: NodeId,
    pub parent: Option<ElementId>,
    /// `None` for the root element.
    pub key: Option<Key>,
}

/// Append-only storage for the elements created during one evaluation.
#[derive(Debug, Default)]
pub struct Trail {
    elements: Vec<Element>,
}

impl Trail {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the root element for `node`.
    pub fn push_root(&mut self, node: NodeId) -> ElementId {
        self.push(Element {
            node,
            parent: None,
            key: None,
        })
    }

    /// Adds a child of `parent` reached through `key`.
    pub fn push_child(&mut self, parent: ElementId, key: Key, node: NodeId) -> ElementId {
        self.push(Element {
            node,
            parent: Some(parent),
            key: Some(key),
        })
    }

    fn push(&mut self, element: Element) -> ElementId {
        self.elements.push(element);
        ElementId(self.elements.len() - 1)
    }

    pub fn get(&self, id: ElementId) -> &Element {
        &self.elements[id.0]
    }

    /// Returns the parent of an element, if it has one.
    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.get(id).parent
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Builds the canonical path of an element.
    ///
    /// The root's path is empty; every other element's path is its parent's
    /// path and its own formatted key joined with `.`. String keys are quoted,
    /// so `["a"]` and `[0]` style positions never collide. The result is only
    /// an identity for deduplication and is not a re-parseable query.
    ///
    /// Distinct generic keys can format alike, as YAML `1` and `1.0` do. Such
    /// an entry gets `#position` appended when an earlier entry of the same
    /// mapping already formats the same way.
    pub fn canonical_path(&self, doc: &Document, id: ElementId) -> String {
        let mut keys = Vec::new();
        let mut current = Some(id);
        while let Some(element_id) = current {
            let element = self.get(element_id);
            if let Some(key) = &element.key {
                keys.push(self.path_segment(doc, element, key));
            }
            current = element.parent;
        }
        keys.reverse();
        keys.join(".")
    }

    fn path_segment(&self, doc: &Document, element: &Element, key: &Key) -> String {
        let text = format_key(doc, key);
        let Key::Entry { position, .. } = key else {
            return text;
        };
        let entries = element
            .parent
            .map(|parent| doc.get(self.get(parent).node))
            .and_then(|value| match value {
                Value::GenericMapping(entries) => Some(entries),
                _ => None,
            });
        let shadowed = entries.is_some_and(|entries| {
            entries
                .iter()
                .take(*position)
                .any(|(earlier, _)| format_key_node(doc, *earlier) == text)
        });
        if shadowed {
            format!("{}#{}", text, position)
        } else {
            text
        }
    }
}

/// Formats a single key for use in a canonical path.
pub fn format_key(doc: &Document, key: &Key) -> String {
    match key {
        Key::Name(name) => format!("{:?}", name),
        Key::Index(index) => index.to_string(),
        Key::Entry { key, .. } => format_key_node(doc, *key),
    }
}

fn format_key_node(doc: &Document, node: NodeId) -> String {
    match doc.get(node) {
        Value::String(s) => format!("{:?}", s),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => format_number(*n),
        _ => render_text(doc, node),
    }
}
