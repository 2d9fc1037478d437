use std::collections::{HashMap, HashSet};

use crate::core::{CatalogError, Key, NormalizedString, SourceLocation};

use super::{Catalog, CatalogEntry};

/// Single-writer merge of normalized strings into a [`Catalog`].
///
/// Strings must be pushed in document-processing order. A new key appends an
/// entry whose rank is the current catalog size; a known key only gains an
/// occurrence. Existing entries are never reordered.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    entries: Vec<CatalogEntry>,
    index: HashMap<Key, usize>,
    /// (entry index, location) pairs already recorded.
    seen: HashSet<(usize, SourceLocation)>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one string.
    ///
    /// # Errors
    ///
    /// `DuplicateKeyTextMismatch` if the key is already mapped to another
    /// text. The builder is left unchanged in that case.
    pub fn push(&mut self, item: NormalizedString) -> Result<(), CatalogError> {
        let NormalizedString {
            key,
            text,
            location,
        } = item;

        match self.index.get(&key) {
            Some(&i) => {
                let entry = &mut self.entries[i];
                if entry.text != text {
                    return Err(CatalogError::DuplicateKeyTextMismatch {
                        key,
                        existing: entry.text.clone(),
                        incoming: text,
                    });
                }
                if self.seen.insert((i, location.clone())) {
                    entry.occurrences.push(location);
                }
            }
            None => {
                let rank = self.entries.len();
                self.index.insert(key.clone(), rank);
                self.seen.insert((rank, location.clone()));
                self.entries.push(CatalogEntry {
                    key,
                    rank,
                    text,
                    occurrences: vec![location],
                });
            }
        }
        Ok(())
    }

    /// Merge every string of `items`, stopping at the first fatal error.
    pub fn extend<I>(&mut self, items: I) -> Result<(), CatalogError>
    where
        I: IntoIterator<Item = NormalizedString>,
    {
        items.into_iter().try_for_each(|item| self.push(item))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The finished, complete catalog.
    pub fn finish(self) -> Catalog {
        Catalog::from_parts(self.entries, true)
    }

    /// What was merged so far, flagged incomplete.
    pub fn into_partial(self) -> Catalog {
        Catalog::from_parts(self.entries, false)
    }
}
