//! Catalog drift detection.
//!
//! Compares a previously committed catalog with a freshly extracted one using
//! the keyed maps only, so the cost is linear in the number of entries.

use serde::Serialize;

use crate::core::{Catalog, CatalogEntry};

/// Same key, different canonical text.
///
/// Unreachable with content-addressed keys; kept for key schemes that are not
/// derived from the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChangedEntry<'a> {
    pub old: &'a CatalogEntry,
    pub new: &'a CatalogEntry,
}

/// Differences between two catalogs. Borrows from both inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiffReport<'a> {
    /// Keys only in the new catalog, in new-catalog order.
    pub added: Vec<&'a CatalogEntry>,
    /// Keys only in the old catalog, in old-catalog order.
    pub removed: Vec<&'a CatalogEntry>,
    /// Keys in both with different text, in new-catalog order.
    pub changed: Vec<ChangedEntry<'a>>,
    /// Keys in both with the same text.
    pub unchanged: usize,
}

impl DiffReport<'_> {
    pub fn has_changes(&self) -> bool {
        !(self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty())
    }
}

/// Compare `old` against `new`. Neither catalog is modified.
pub fn diff<'a>(old: &'a Catalog, new: &'a Catalog) -> DiffReport<'a> {
    if old.hash() == new.hash() && old.len() == new.len() {
        tracing::debug!(entries = new.len(), "catalog hashes match");
        return DiffReport {
            unchanged: new.len(),
            ..Default::default()
        };
    }

    let mut report = DiffReport::default();

    for entry in new.iter() {
        match old.get(&entry.key) {
            None => report.added.push(entry),
            Some(previous) if previous.text != entry.text => report.changed.push(ChangedEntry {
                old: previous,
                new: entry,
            }),
            Some(_) => {}
        }
    }

    report.removed = old
        .iter()
        .filter(|entry| !new.contains_key(&entry.key))
        .collect();

    report.unchanged = new.len() - report.added.len() - report.changed.len();

    tracing::debug!(
        added = report.added.len(),
        removed = report.removed.len(),
        changed = report.changed.len(),
        unchanged = report.unchanged,
        "diffed catalogs"
    );
    report
}
