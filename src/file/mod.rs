//! File I/O for documents.
//!
//! This module loads markup files or serde tree descriptions from disk or
//! stdin, transparently handling gzip compression.

pub mod description;
pub mod loader;
