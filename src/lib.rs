//! trcat - marker-string extraction and translation-key catalogs
//!
//! trcat scans source documents for marker calls such as `tr("Okay!")`,
//! assigns every distinct literal a content-addressed key and merges them into
//! an ordered catalog. Catalogs can be diffed against a previously committed
//! one to detect drift.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Extraction, keys, catalog building and diffing
//! - `issues`: Issue type definitions and reporting
//! - `logging`: Tracing subscriber setup
//! - `mcp`: Model Context Protocol server implementation

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
pub mod logging;
pub mod mcp;
