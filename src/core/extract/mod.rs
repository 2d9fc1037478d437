//! Marker extraction.
//!
//! A lexical scan over document text that finds marker invocations such as
//! `tr("Okay!")` and yields the literal exactly as written. The scanner never
//! interprets the surrounding code: markers inside comments, conditional
//! branches or nested calls are all extracted.
//!
//! ```text
//! SourceDocument ──scan──> MarkerScan (lazy) ──> Ok(ExtractedString)
//!                                          └──> Err(MarkerDiagnostic)
//! ```

mod diagnostic;


pub use diagnostic::{DiagnosticKind, MarkerDiagnostic};

use crate::core::{Position, SourceDocument};

pub const DEFAULT_MARKER: &str = "tr";

/// A literal found inside a marker invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedString {
    /// Literal text between the quotes, escapes and placeholders untouched.
    pub text: String,
    pub document_id: String,
    /// Position of the marker identifier.
    pub position: Position,
    /// 0-based index among the strings extracted from this document. Run-wide
    /// order follows from the merge order of documents.
    pub order: usize,
}

/// Everything one document scan produced, in scan order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentExtraction {
    pub document_id: String,
    pub strings: Vec<ExtractedString>,
    pub diagnostics: Vec<MarkerDiagnostic>,
}

impl DocumentExtraction {
    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }
}

/// Scans documents for a configured set of marker identifiers.
#[derive(Debug, Clone)]
pub struct Extractor {
    markers: Vec<String>,
}

impl Default for Extractor {
    fn default() -> Self {
        Self {
            markers: vec![DEFAULT_MARKER.to_string()],
        }
    }
}

impl Extractor {
    /// Create an extractor for the given marker identifiers.
    ///
    /// Empty names and duplicates are dropped; an empty list falls back to
    /// [`DEFAULT_MARKER`].
    pub fn new<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = Vec::new();
        for marker in markers {
            let marker = marker.into();
            if !marker.is_empty() && !names.contains(&marker) {
                names.push(marker);
            }
        }
        if names.is_empty() {
            return Self::default();
        }
        Self { markers: names }
    }

    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    /// Start a lazy scan of `document`.
    ///
    /// Each call starts from the beginning, so scanning the same content twice
    /// yields the same sequence.
    pub fn scan<'a>(&'a self, document: &'a SourceDocument) -> MarkerScan<'a> {
        MarkerScan {
            markers: &self.markers,
            document,
            bytes: document.content().as_bytes(),
            pos: 0,
            line: 1,
            line_start: 0,
            order: 0,
        }
    }

    /// Scan `document` to completion.
    pub fn extract(&self, document: &SourceDocument) -> DocumentExtraction {
        let mut extraction = DocumentExtraction {
            document_id: document.id().to_string(),
            ..Default::default()
        };
        for item in self.scan(document) {
            match item {
                Ok(extracted) => extraction.strings.push(extracted),
                Err(diagnostic) => extraction.diagnostics.push(diagnostic),
            }
        }
        extraction
    }
}

/// Lazy iterator over the marker invocations of one document.
///
/// `Err` items are diagnostics for invocations that were skipped; the scan
/// always continues past them.
pub struct MarkerScan<'a> {
    markers: &'a [String],
    document: &'a SourceDocument,
    bytes: &'a [u8],
    pos: usize,
    line: usize,
    line_start: usize,
    order: usize,
}

impl Iterator for MarkerScan<'_> {
    type Item = Result<ExtractedString, MarkerDiagnostic>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos < self.bytes.len() {
            let b = self.bytes[self.pos];

            if b == b'\n' {
                self.pos += 1;
                self.line += 1;
                self.line_start = self.pos;
                continue;
            }

            if b.is_ascii_digit() {
                // Numbers like `2tr` must not expose a marker-looking suffix.
                while self.pos < self.bytes.len() && is_ident_byte(self.bytes[self.pos]) {
                    self.pos += 1;
                }
                continue;
            }

            if !is_ident_start(b) {
                self.pos += 1;
                continue;
            }

            let start = self.pos;
            let mut end = start + 1;
            while end < self.bytes.len() && is_ident_byte(self.bytes[end]) {
                end += 1;
            }

            let ident = &self.document.content()[start..end];
            if self.markers.iter().any(|m| m == ident) {
                if let Some(item) = self.invocation(start, end) {
                    return Some(item);
                }
            } else {
                self.pos = end;
            }
        }
        None
    }
}

impl MarkerScan<'_> {
    /// Parse the invocation whose marker identifier spans `start..end`.
    ///
    /// Leaves `self.pos` after whatever was consumed. Returns `None` when the
    /// identifier is not followed by `(`, i.e. it is not an invocation.
    fn invocation(
        &mut self,
        start: usize,
        end: usize,
    ) -> Option<Result<ExtractedString, MarkerDiagnostic>> {
        let position = self.position_of(start);

        let open = self.skip_blanks(end);
        if self.bytes.get(open) != Some(&b'(') {
            self.pos = end;
            return None;
        }

        let arg = self.skip_whitespace(open + 1);
        let quote = match self.bytes.get(arg) {
            Some(&q @ (b'"' | b'\'')) => q,
            _ => {
                self.pos = arg;
                return Some(Err(self.diagnostic(position, DiagnosticKind::NonLiteralArgument)));
            }
        };

        let body_start = arg + 1;
        let mut i = body_start;
        loop {
            match self.bytes.get(i) {
                None => {
                    self.pos = self.bytes.len();
                    return Some(Err(
                        self.diagnostic(position, DiagnosticKind::UnterminatedLiteral)
                    ));
                }
                Some(b'\n') => {
                    // Resume on the newline so line tracking stays correct.
                    self.pos = i;
                    return Some(Err(
                        self.diagnostic(position, DiagnosticKind::UnterminatedLiteral)
                    ));
                }
                Some(b'\\') if self.bytes.get(i + 1) != Some(&b'\n') => i += 2,
                Some(&c) if c == quote => break,
                Some(_) => i += 1,
            }
        }

        let after = self.skip_whitespace(i + 1);
        match self.bytes.get(after) {
            Some(b')' | b',') => {
                self.pos = after + 1;
                let order = self.order;
                self.order += 1;
                Some(Ok(ExtractedString {
                    text: self.document.content()[body_start..i].to_string(),
                    document_id: self.document.id().to_string(),
                    position,
                    order,
                }))
            }
            _ => {
                self.pos = after;
                Some(Err(self.diagnostic(position, DiagnosticKind::UnexpectedToken)))
            }
        }
    }

    fn position_of(&self, offset: usize) -> Position {
        let col = self.document.content()[self.line_start..offset]
            .chars()
            .count()
            + 1;
        Position::new(self.line, col, offset)
    }

    fn skip_blanks(&self, mut i: usize) -> usize {
        while matches!(self.bytes.get(i), Some(b' ' | b'\t' | b'\r')) {
            i += 1;
        }
        i
    }

    /// Like `skip_blanks`, but crosses line breaks inside the argument list.
    ///
    /// Callers must leave `self.pos` at or after the returned index so the
    /// crossed lines are not counted twice.
    fn skip_whitespace(&mut self, mut i: usize) -> usize {
        loop {
            i = self.skip_blanks(i);
            if self.bytes.get(i) != Some(&b'\n') {
                return i;
            }
            i += 1;
            self.line += 1;
            self.line_start = i;
        }
    }

    fn diagnostic(&self, position: Position, kind: DiagnosticKind) -> MarkerDiagnostic {
        MarkerDiagnostic {
            document_id: self.document.id().to_string(),
            position,
            kind,
        }
    }
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b >= 0x80
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b >= 0x80
}
