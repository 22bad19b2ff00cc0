//! File I/O operations for input documents.
//!
//! This module provides functionality to load JSON and YAML documents from
//! disk or stdin, including gzip-compressed input.

pub mod loader;
