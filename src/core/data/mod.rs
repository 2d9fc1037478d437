//! Core data types shared by every stage of the pipeline.
//!
//! ## Module Structure
//!
//! - `document`: SourceDocument (id, content, content hash)
//! - `source`: Position, SourceLocation, SourceContext

pub mod document;
pub mod source;

pub use document::{SourceDocument, document_id};
pub use source::{Position, SourceContext, SourceLocation};
