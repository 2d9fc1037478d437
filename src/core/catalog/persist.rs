//! Catalog persistence.
//!
//! Catalogs are stored as pretty-printed JSON with a trailing newline:
//!
//! ```json
//! {
//!   "version": 1,
//!   "hash": "…",
//!   "entries": [
//!     {
//!       "key": "…",
//!       "rank": 0,
//!       "canonical_text": "Okay!",
//!       "occurrences": [{ "document_id": "scene.py", "line": 7, "column": 1 }]
//!     }
//!   ]
//! }
//! ```
//!
//! Reading verifies the version, rank sequence, key uniqueness and hash, so a
//! hand-edited or truncated catalog is rejected instead of producing a
//! misleading diff.

use std::{collections::HashSet, fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::core::{CatalogError, document_id};

use super::{Catalog, CatalogEntry, catalog_hash};

pub const CATALOG_VERSION: u32 = 1;

#[derive(Serialize)]
struct CatalogFileRef<'a> {
    version: u32,
    hash: &'a str,
    entries: &'a [CatalogEntry],
}

#[derive(Deserialize)]
struct CatalogFile {
    version: u32,
    hash: String,
    entries: Vec<CatalogEntry>,
}

/// Serialize a complete catalog.
pub fn to_json(catalog: &Catalog) -> Result<String, CatalogError> {
    if !catalog.is_complete() {
        return Err(CatalogError::IncompleteCatalog);
    }
    let file = CatalogFileRef {
        version: CATALOG_VERSION,
        hash: catalog.hash(),
        entries: catalog.entries(),
    };
    serde_json::to_string_pretty(&file)
        .map(|json| format!("{}\n", json))
        .map_err(|e| CatalogError::format("<memory>", e.to_string()))
}

/// Parse and verify a persisted catalog. `label` names the source in errors.
pub fn from_json(label: &str, content: &str) -> Result<Catalog, CatalogError> {
    let file: CatalogFile =
        serde_json::from_str(content).map_err(|e| CatalogError::format(label, e.to_string()))?;

    if file.version != CATALOG_VERSION {
        return Err(CatalogError::format(
            label,
            format!(
                "unsupported catalog version {} (expected {})",
                file.version, CATALOG_VERSION
            ),
        ));
    }

    let mut seen = HashSet::new();
    for (i, entry) in file.entries.iter().enumerate() {
        if entry.rank != i {
            return Err(CatalogError::format(
                label,
                format!(
                    "entry {} has rank {} (ranks must be 0, 1, 2, ...)",
                    entry.key, entry.rank
                ),
            ));
        }
        if !seen.insert(&entry.key) {
            return Err(CatalogError::format(
                label,
                format!("duplicate key {}", entry.key),
            ));
        }
    }

    let computed = catalog_hash(&file.entries);
    if computed != file.hash {
        return Err(CatalogError::format(
            label,
            format!(
                "hash mismatch (recorded {}, computed {})",
                file.hash, computed
            ),
        ));
    }

    Ok(Catalog::from_parts(file.entries, true))
}

/// Write `catalog` to `path`, creating parent directories.
pub fn write_catalog(path: &Path, catalog: &Catalog) -> Result<(), CatalogError> {
    let json = to_json(catalog)?;
    let io_error = |source| CatalogError::Io {
        document_id: document_id(path),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error)?;
    }
    fs::write(path, json).map_err(io_error)
}

/// Read and verify the catalog at `path`.
pub fn read_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let label = document_id(path);
    let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        document_id: label.clone(),
        source,
    })?;
    from_json(&label, &content)
}
