//! uniquery - a compact path-query language for JSON and YAML documents.
//!
//! Documents are decoded into an arena of values ([`document`]), queries are
//! parsed into parts and evaluated against them ([`query`]), and the
//! [`runner`] ties both together for callers that start from text.
//!
//! # Example
//!
//! ```
//! use uniquery::document::parser::parse_json;
//! use uniquery::runner::Runner;
//!
//! let doc = parse_json(r#"[{"name": "John Doe", "debt": 0}, {"name": "Jane Doe", "debt": 5}]"#).unwrap();
//! let results = Runner::default().run("*.debt=0..name", &doc).unwrap();
//! assert_eq!(results.len(), 1);
//! ```

pub mod config;
pub mod document;
pub mod file;
pub mod query;
pub mod runner;
