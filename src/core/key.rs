//! Translation key derivation.
//!
//! Keys are content-addressed: the key of a literal depends on its exact text
//! and nothing else, so the same line reused across scenes collapses into one
//! catalog entry. Whitespace and escape sequences are part of the input; two
//! strings that differ only in spacing get different keys.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::core::{ExtractedString, SourceLocation};

/// Number of SHA-256 bytes kept in a key (128 bits, 32 hex chars).
const KEY_BYTES: usize = 16;

/// A translation key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Key(String);

impl Key {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Key {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Strategy mapping extracted literals to keys.
pub trait KeyScheme: Send + Sync {
    fn key_for(&self, text: &str) -> Key;
}

/// The content-addressed scheme: truncated SHA-256 of the exact text.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentAddressed;

impl KeyScheme for ContentAddressed {
    fn key_for(&self, text: &str) -> Key {
        let digest = Sha256::digest(text.as_bytes());
        Key(hex::encode(&digest[..KEY_BYTES]))
    }
}

/// An extracted literal after key derivation, ready for the catalog builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedString {
    pub key: Key,
    /// Canonical text, identical to the extracted literal.
    pub text: String,
    pub location: SourceLocation,
}

/// Derive the key of `extracted` with `scheme`.
pub fn normalize(scheme: &dyn KeyScheme, extracted: ExtractedString) -> NormalizedString {
    let key = scheme.key_for(&extracted.text);
    NormalizedString {
        key,
        location: SourceLocation::new(
            extracted.document_id,
            extracted.position.line,
            extracted.position.col,
        ),
        text: extracted.text,
    }
}
