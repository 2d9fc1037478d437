//! Extraction and catalog engine.
//!
//! Documents flow through three phases:
//!
//! 1. **Extract** (`extract`): lexical scan of each document for marker calls.
//! 2. **Normalize** (`key`): every extracted literal gets a content-addressed key.
//! 3. **Build** (`catalog`): normalized strings are merged in document order
//!    into a ranked catalog.
//!
//! `pipeline` wires the phases together; `diff`, `variants` and `manifest`
//! work on finished catalogs.
//!
//! ## Module Structure
//!
//! - `data`: Source documents and locations
//! - `error`: Error taxonomy shared by every phase
//! - `extract`: Marker extractor and its diagnostics
//! - `key`: Key type and key schemes
//! - `catalog`: Catalog, builder and JSON persistence
//! - `diff`: Catalog diff engine
//! - `variants`: Near-duplicate detection
//! - `file_scanner`: Expands document arguments into an ordered file list
//! - `pipeline`: Parallel scan, ordered merge
//! - `manifest`: Marker manifest export

pub mod catalog;
pub mod data;
pub mod diff;
pub mod error;
pub mod extract;
pub mod file_scanner;
pub mod key;
pub mod manifest;
pub mod pipeline;
pub mod variants;

pub use catalog::{
    CATALOG_VERSION, Catalog, CatalogBuilder, CatalogEntry, catalog_hash, from_json,
    read_catalog, to_json, write_catalog,
};
pub use data::{Position, SourceContext, SourceDocument, SourceLocation, document_id};
pub use diff::{ChangedEntry, DiffReport, diff};
pub use error::{CatalogError, MalformedReason};
pub use extract::{
    DEFAULT_MARKER, DiagnosticKind, DocumentExtraction, ExtractedString, Extractor,
    MarkerDiagnostic, MarkerScan,
};
pub use file_scanner::{ScanResult, scan_documents};
pub use key::{ContentAddressed, Key, KeyScheme, NormalizedString, normalize};
pub use manifest::render_manifest;
pub use pipeline::{CancelFlag, DocumentFailure, ExtractionRun, Pipeline};
pub use variants::{VariantGroup, find_variants};
