//! The translation catalog.
//!
//! A catalog is the deduplicated, ordered registry of extracted strings. Entry
//! order is first-seen order across the whole merge and is persisted as an
//! explicit `rank`, so diffs between catalog versions stay minimal.
//!
//! ## Module Structure
//!
//! - `builder`: single-writer merge of normalized strings into a catalog
//! - `persist`: JSON read/write with integrity checks

pub mod builder;
pub mod persist;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::core::{Key, SourceLocation};

pub use builder::CatalogBuilder;
pub use persist::{CATALOG_VERSION, from_json, read_catalog, to_json, write_catalog};

/// One distinct translatable string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub key: Key,
    /// First-seen order across the merge; equals the entry's index.
    pub rank: usize,
    #[serde(rename = "canonical_text")]
    pub text: String,
    /// Every place the text occurs, in merge order, without duplicates.
    pub occurrences: Vec<SourceLocation>,
}

/// Ordered, keyed collection of catalog entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    index: HashMap<Key, usize>,
    hash: String,
    complete: bool,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::from_parts(Vec::new(), true)
    }
}

impl Catalog {
    /// Assemble a catalog from entries already in rank order.
    ///
    /// Callers guarantee unique keys and `rank == index`.
    pub(crate) fn from_parts(entries: Vec<CatalogEntry>, complete: bool) -> Self {
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (entry.key.clone(), i))
            .collect();
        let hash = catalog_hash(&entries);
        Self {
            entries,
            index,
            hash,
            complete,
        }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    pub fn get(&self, key: &Key) -> Option<&CatalogEntry> {
        self.index.get(key).map(|&i| &self.entries[i])
    }

    pub fn contains_key(&self, key: &Key) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Content hash over the ordered `(key, text)` pairs.
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// False for catalogs from cancelled or partially failed runs.
    /// Incomplete catalogs cannot be persisted.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Flag the catalog as incomplete, e.g. after a document failed to load.
    pub(crate) fn mark_incomplete(&mut self) {
        self.complete = false;
    }

    /// Total number of occurrences across all entries.
    pub fn occurrence_count(&self) -> usize {
        self.entries.iter().map(|e| e.occurrences.len()).sum()
    }
}

/// SHA-256 over the ordered `(key, text)` pairs, lowercase hex.
///
/// Each field is length-prefixed so no choice of text can make two different
/// catalogs hash the same byte stream.
pub fn catalog_hash(entries: &[CatalogEntry]) -> String {
    let mut hasher = Sha256::new();
    for entry in entries {
        for field in [entry.key.as_str(), entry.text.as_str()] {
            hasher.update((field.len() as u64).to_le_bytes());
            hasher.update(field.as_bytes());
        }
    }
    hex::encode(hasher.finalize())
}
