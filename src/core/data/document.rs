use std::{fs, path::Path};

use sha2::{Digest, Sha256};

use crate::core::CatalogError;

/// A source document handed to the extractor.
///
/// Immutable once read: the content hash is computed at construction and
/// identifies exactly this content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    id: String,
    content: String,
    hash: String,
}

impl SourceDocument {
    /// Create a document from in-memory content (e.g. a scene id supplied by
    /// the dialogue runtime).
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        let content = content.into();
        let hash = content_hash(&content);
        Self {
            id: id.into(),
            content,
            hash,
        }
    }

    /// Read a document from disk. The document id is the path as given.
    pub fn read(path: &Path) -> Result<Self, CatalogError> {
        Self::read_from(Path::new(""), path)
    }

    /// Read `base.join(path)`, identified by `path` alone.
    pub fn read_from(base: &Path, path: &Path) -> Result<Self, CatalogError> {
        let id = document_id(path);
        let content = fs::read_to_string(base.join(path)).map_err(|source| CatalogError::Io {
            document_id: id.clone(),
            source,
        })?;
        Ok(Self::new(id, content))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// SHA-256 of the content, lowercase hex.
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Text of the 1-based `line`, without its terminator.
    pub fn line_text(&self, line: usize) -> Option<&str> {
        self.content
            .split('\n')
            .nth(line.checked_sub(1)?)
            .map(|l| l.strip_suffix('\r').unwrap_or(l))
    }
}

/// Stable identifier for a document path: forward slashes, no leading `./`.
pub fn document_id(path: &Path) -> String {
    let id = path.to_string_lossy().replace('\\', "/");
    match id.strip_prefix("./") {
        Some(stripped) if !stripped.is_empty() => stripped.to_string(),
        _ => id,
    }
}

fn content_hash(content: &str) -> String {
    hex::encode(Sha256::digest(content.as_bytes()))
}
