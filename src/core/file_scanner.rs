use std::{
    collections::HashSet,
    io,
    path::{Path, PathBuf},
};

use colored::Colorize;
use glob::Pattern;
use walkdir::WalkDir;

use crate::core::{CatalogError, DocumentFailure, document_id};

/// Result of expanding document arguments.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Documents in processing order.
    pub files: Vec<PathBuf>,
    /// Directory entries that could not be read while walking.
    pub failures: Vec<DocumentFailure>,
}

/// Expand CLI document arguments into an ordered document list.
///
/// Arguments are processed in the order given. A file argument is always
/// kept, even when its extension is not configured or it does not exist (the
/// pipeline then reports the read failure for that document). Directories are
/// walked in file-name order and only files with a configured extension that
/// match no ignore pattern are kept. Duplicates keep their first position.
/// Symbolic links are followed; entries the walk cannot read (permissions,
/// dangling links, link loops) are returned as failures.
pub fn scan_documents(
    paths: &[PathBuf],
    extensions: &[String],
    ignore_patterns: &[String],
    verbose: bool,
) -> ScanResult {
    let mut files: Vec<PathBuf> = Vec::new();
    let mut seen: HashSet<PathBuf> = HashSet::new();
    let mut failures: Vec<DocumentFailure> = Vec::new();

    let mut glob_patterns: Vec<Pattern> = Vec::new();
    for p in ignore_patterns {
        match Pattern::new(p) {
            Ok(pattern) => glob_patterns.push(pattern),
            Err(e) => {
                if verbose {
                    eprintln!(
                        "{} Invalid ignore pattern '{}': {}",
                        "warning:".bold().yellow(),
                        p,
                        e
                    );
                }
            }
        }
    }

    for path in paths {
        if !path.is_dir() {
            if seen.insert(path.clone()) {
                files.push(path.clone());
            }
            continue;
        }

        for entry in WalkDir::new(path).follow_links(true).sort_by_file_name() {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    let failed = e.path().unwrap_or(path).to_path_buf();
                    if !glob_patterns
                        .iter()
                        .any(|p| p.matches(&failed.to_string_lossy()))
                    {
                        failures.push(walk_failure(&failed, e));
                    }
                    continue;
                }
            };
            let entry_path = entry.path();
            let path_str = entry_path.to_string_lossy();

            if glob_patterns.iter().any(|p| p.matches(&path_str)) {
                continue;
            }

            if entry.file_type().is_file()
                && has_extension(entry_path, extensions)
                && seen.insert(entry_path.to_path_buf())
            {
                files.push(entry_path.to_path_buf());
            }
        }
    }

    ScanResult { files, failures }
}

fn walk_failure(path: &Path, error: walkdir::Error) -> DocumentFailure {
    let document_id = document_id(path);
    tracing::warn!(document = %document_id, error = %error, "cannot walk entry");
    DocumentFailure {
        error: CatalogError::Io {
            document_id: document_id.clone(),
            source: io::Error::from(error),
        },
        document_id,
    }
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|allowed| allowed == ext))
}
