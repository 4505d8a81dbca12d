//! File I/O operations for input documents.
//!
//! This module provides functionality to load JSON or YAML documents from disk
//! or stdin, with transparent gzip decompression.

pub mod loader;
