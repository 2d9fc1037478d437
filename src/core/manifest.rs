//! Marker manifest export.
//!
//! Writes a catalog back out as a flat list of marker calls, one per entry,
//! grouped under the document where each entry was first seen:
//!
//! ```text
//! # Localizable strings extracted by LocalizationDemo.tscn
//! tr("Accelerator")
//! tr("Okay!")
//! ```
//!
//! Running the extractor over a manifest yields the catalog's texts in rank
//! order.

use std::fmt::Write as _;

use crate::core::{Catalog, CatalogEntry};

const HEADER_PREFIX: &str = "# Localizable strings extracted by";

/// Render `catalog` as a marker manifest using `marker` as the call name.
pub fn render_manifest(catalog: &Catalog, marker: &str) -> String {
    let mut groups: Vec<(&str, Vec<&CatalogEntry>)> = Vec::new();
    for entry in catalog.iter() {
        let document = entry
            .occurrences
            .first()
            .map(|o| o.document_id.as_str())
            .unwrap_or_default();
        match groups.iter_mut().find(|(id, _)| *id == document) {
            Some((_, entries)) => entries.push(entry),
            None => groups.push((document, vec![entry])),
        }
    }

    let mut out = String::new();
    for (document, entries) in groups {
        if document.is_empty() {
            out.push_str("# Localizable strings\n");
        } else {
            let _ = writeln!(out, "{} {}", HEADER_PREFIX, document);
        }
        for entry in entries {
            let _ = writeln!(out, "{}", marker_call(marker, &entry.text));
        }
    }
    out
}

/// Wrap `text` in a marker call without altering it when possible.
///
/// Double quotes are preferred; single quotes are used when the text holds an
/// unescaped `"` but no unescaped `'`.
fn marker_call(marker: &str, text: &str) -> String {
    if !has_unescaped(text, '"') {
        format!("{}(\"{}\")", marker, text)
    } else if !has_unescaped(text, '\'') {
        format!("{}('{}')", marker, text)
    } else {
        format!("{}(\"{}\")", marker, escape_unescaped(text, '"'))
    }
}

fn has_unescaped(text: &str, quote: char) -> bool {
    let mut escaped = false;
    for c in text.chars() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == quote {
            return true;
        }
    }
    false
}

fn escape_unescaped(text: &str, quote: char) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    let mut escaped = false;
    for c in text.chars() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == quote {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
