//! Decoded document model.
//!
//! Documents are arenas of [`node::Value`]s produced by the JSON and YAML
//! decoders in [`parser`], and converted back for printing by [`export`].

pub mod export;
pub mod node;
pub mod parser;
pub mod tree;
