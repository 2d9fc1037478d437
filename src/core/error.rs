use std::io;

use thiserror::Error;

use crate::core::{Key, Position};

/// Why a marker invocation could not be extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MalformedReason {
    /// Line or input ended before the closing quote.
    UnterminatedLiteral,
    /// The literal is followed by something other than `)` or `,`.
    UnexpectedToken,
}

impl std::fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MalformedReason::UnterminatedLiteral => write!(f, "unterminated string literal"),
            MalformedReason::UnexpectedToken => {
                write!(f, "expected `)` or `,` after string literal")
            }
        }
    }
}

/// Errors produced by the extraction and catalog engine.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A marker invocation whose literal is unterminated or syntactically
    /// invalid. Recovered locally by the extractor.
    #[error("{document_id}:{position}: malformed marker: {reason}")]
    MalformedMarker {
        document_id: String,
        position: Position,
        reason: MalformedReason,
    },

    /// One key maps to two different texts. Only reachable when key
    /// derivation is broken.
    #[error("key {key} already maps to {existing:?}, refusing to map it to {incoming:?}")]
    DuplicateKeyTextMismatch {
        key: Key,
        existing: String,
        incoming: String,
    },

    #[error("failed to read {document_id}: {source}")]
    Io {
        document_id: String,
        #[source]
        source: io::Error,
    },

    /// A persisted catalog could not be parsed or failed verification.
    #[error("invalid catalog {path}: {message}")]
    Format { path: String, message: String },

    #[error("refusing to persist an incomplete catalog")]
    IncompleteCatalog,
}

impl CatalogError {
    pub fn format(path: impl Into<String>, message: impl Into<String>) -> Self {
        CatalogError::Format {
            path: path.into(),
            message: message.into(),
        }
    }

    /// The document the error is attributed to, if any.
    pub fn document_id(&self) -> Option<&str> {
        match self {
            CatalogError::MalformedMarker { document_id, .. }
            | CatalogError::Io { document_id, .. } => Some(document_id.as_str()),
            _ => None,
        }
    }

    /// True for errors that must abort the whole run.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            CatalogError::MalformedMarker { .. } | CatalogError::Io { .. }
        )
    }
}
