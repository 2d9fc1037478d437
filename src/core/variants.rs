//! Near-duplicate detection.
//!
//! Keys are exact-text only, so "Okay!" and "okay" are separate entries. That is
//! deliberate, but it is also how accidental variants creep into dialogue. This
//! module finds entries whose text folds to the same form so they can be
//! reported. Entries are never merged.

use std::{collections::HashMap, sync::LazyLock};

use regex::Regex;

use crate::core::{Catalog, CatalogEntry};

/// Escaped whitespace (`\n`, `\t`, `\r`) or runs of real whitespace.
static WHITESPACE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\\[ntr]|\s)+").unwrap());

const TRAILING_PUNCTUATION: &[char] = &['.', '!', '?', ',', ';', ':', '…', '-', '~'];

/// Entries whose texts fold to the same form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantGroup<'a> {
    pub folded: String,
    /// In rank order; always at least two.
    pub entries: Vec<&'a CatalogEntry>,
}

/// Fold `text` for comparison: case, whitespace and trailing punctuation are
/// ignored.
pub fn fold(text: &str) -> String {
    let collapsed = WHITESPACE_REGEX.replace_all(text, " ");
    collapsed
        .trim()
        .trim_end_matches(|c: char| TRAILING_PUNCTUATION.contains(&c) || c.is_whitespace())
        .to_lowercase()
}

/// Group catalog entries that fold to the same text.
///
/// Groups are ordered by the rank of their first entry. Entries that fold to
/// nothing (e.g. "..." or "!") are not grouped.
pub fn find_variants(catalog: &Catalog) -> Vec<VariantGroup<'_>> {
    let mut groups: Vec<VariantGroup<'_>> = Vec::new();
    let mut by_fold: HashMap<String, usize> = HashMap::new();

    for entry in catalog.iter() {
        let folded = fold(&entry.text);
        if folded.is_empty() {
            continue;
        }
        match by_fold.get(&folded) {
            Some(&i) => groups[i].entries.push(entry),
            None => {
                by_fold.insert(folded.clone(), groups.len());
                groups.push(VariantGroup {
                    folded,
                    entries: vec![entry],
                });
            }
        }
    }

    groups.retain(|group| group.entries.len() > 1);
    groups
}
