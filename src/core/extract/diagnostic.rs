use std::fmt;

use crate::core::{CatalogError, MalformedReason, Position};

/// What went wrong with a skipped marker invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// Line or input ended before the closing quote: `tr("Okay!`
    UnterminatedLiteral,
    /// The literal is not followed by `)` or `,`: `tr("a" + b)`
    UnexpectedToken,
    /// The marker was called with something other than a literal: `tr(name)`
    NonLiteralArgument,
}

impl DiagnosticKind {
    /// Malformed syntax is an error; a non-literal argument is a warning
    /// because nothing was lost that could have been extracted.
    pub fn is_error(self) -> bool {
        !matches!(self, DiagnosticKind::NonLiteralArgument)
    }

    fn malformed_reason(self) -> Option<MalformedReason> {
        match self {
            DiagnosticKind::UnterminatedLiteral => Some(MalformedReason::UnterminatedLiteral),
            DiagnosticKind::UnexpectedToken => Some(MalformedReason::UnexpectedToken),
            DiagnosticKind::NonLiteralArgument => None,
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.malformed_reason() {
            Some(reason) => reason.fmt(f),
            None => write!(f, "marker argument is not a string literal"),
        }
    }
}

/// A skipped marker invocation, attributed to its document and position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerDiagnostic {
    pub document_id: String,
    pub position: Position,
    pub kind: DiagnosticKind,
}

impl MarkerDiagnostic {
    pub fn is_error(&self) -> bool {
        self.kind.is_error()
    }

    /// The `MalformedMarker` error for this diagnostic, if it is one.
    pub fn to_error(&self) -> Option<CatalogError> {
        self.kind
            .malformed_reason()
            .map(|reason| CatalogError::MalformedMarker {
                document_id: self.document_id.clone(),
                position: self.position,
                reason,
            })
    }
}

impl fmt::Display for MarkerDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.document_id, self.position, self.kind)
    }
}
