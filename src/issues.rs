//! Issue types for extraction results.
//!
//! Each issue is self-contained with everything the reporter needs to display
//! it: location, message, severity and rule.

use enum_dispatch::enum_dispatch;

use crate::core::{DiagnosticKind, SourceContext};

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    MalformedMarker,
    NonLiteralArgument,
    ReadFailure,
    Variant,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::MalformedMarker => write!(f, "malformed-marker"),
            Rule::NonLiteralArgument => write!(f, "non-literal"),
            Rule::ReadFailure => write!(f, "read-failure"),
            Rule::Variant => write!(f, "variant"),
        }
    }
}

// ============================================================
// Issue Types
// ============================================================

/// Marker invocation that could not be parsed; its literal was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedMarkerIssue {
    pub context: SourceContext,
    /// `UnterminatedLiteral` or `UnexpectedToken`.
    pub kind: DiagnosticKind,
}

impl MalformedMarkerIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::MalformedMarker
    }
}

/// Marker called with a non-literal argument, e.g. `tr(line_id)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonLiteralIssue {
    pub context: SourceContext,
}

impl NonLiteralIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::NonLiteralArgument
    }
}

/// Document that could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadFailureIssue {
    pub document_id: String,
    pub error: String,
}

impl ReadFailureIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::ReadFailure
    }
}

/// Catalog text that differs from an earlier entry only in case, whitespace
/// or trailing punctuation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantIssue {
    /// First occurrence of the later entry.
    pub context: SourceContext,
    pub text: String,
    /// Text of the first-ranked entry of the group.
    pub first_text: String,
    pub first_rank: usize,
}

impl VariantIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::Variant
    }
}

// ============================================================
// Issue Enum
// ============================================================

/// A problem found while building a catalog.
#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    MalformedMarker(MalformedMarkerIssue),
    NonLiteral(NonLiteralIssue),
    ReadFailure(ReadFailureIssue),
    Variant(VariantIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        match self {
            Issue::MalformedMarker(_) => MalformedMarkerIssue::severity(),
            Issue::NonLiteral(_) => NonLiteralIssue::severity(),
            Issue::ReadFailure(_) => ReadFailureIssue::severity(),
            Issue::Variant(_) => VariantIssue::severity(),
        }
    }

    pub fn rule(&self) -> Rule {
        match self {
            Issue::MalformedMarker(_) => MalformedMarkerIssue::rule(),
            Issue::NonLiteral(_) => NonLiteralIssue::rule(),
            Issue::ReadFailure(_) => ReadFailureIssue::rule(),
            Issue::Variant(_) => VariantIssue::rule(),
        }
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Location information for report output.
pub enum ReportLocation<'a> {
    /// Document location with the source line for context display.
    Source(&'a SourceContext),
    /// Document-level only (read failures).
    File { path: &'a str },
}

/// Trait for types that can be reported to CLI.
///
/// Implemented by all issue types; `enum_dispatch` forwards the calls from
/// [`Issue`].
#[enum_dispatch]
pub trait Report {
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message to display.
    fn message(&self) -> String;

    fn report_severity(&self) -> Severity;

    fn report_rule(&self) -> Rule;

    /// Optional hint for fixing the issue.
    fn hint(&self) -> Option<&str> {
        None
    }

    /// Optional details for the "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }
}

// ============================================================
// Report Implementations
// ============================================================

impl Report for MalformedMarkerIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        self.kind.to_string()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn hint(&self) -> Option<&str> {
        match self.kind {
            DiagnosticKind::UnterminatedLiteral => {
                Some("string literals must close on the line they open")
            }
            DiagnosticKind::UnexpectedToken => {
                Some("pass a single string literal; concatenated text cannot be extracted")
            }
            DiagnosticKind::NonLiteralArgument => None,
        }
    }
}

impl Report for NonLiteralIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        DiagnosticKind::NonLiteralArgument.to_string()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some("nothing was extracted from this call".to_string())
    }
}

impl Report for ReadFailureIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.document_id,
        }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some("the catalog is incomplete and was not written".to_string())
    }
}

impl Report for VariantIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        self.text.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!(
            "variant of \"{}\" (rank {})",
            self.first_text, self.first_rank
        ))
    }
}

// ============================================================
// Ordering for Issue (for sorting in reports)
// ============================================================

impl Issue {
    fn sort_document(&self) -> &str {
        match self.location() {
            ReportLocation::Source(ctx) => ctx.document_id(),
            ReportLocation::File { path } => path,
        }
    }

    fn sort_line(&self) -> usize {
        match self.location() {
            ReportLocation::Source(ctx) => ctx.line(),
            ReportLocation::File { .. } => 0,
        }
    }

    fn sort_col(&self) -> usize {
        match self.location() {
            ReportLocation::Source(ctx) => ctx.col(),
            ReportLocation::File { .. } => 0,
        }
    }
}

impl Ord for Issue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.sort_document()
            .cmp(other.sort_document())
            .then_with(|| self.sort_line().cmp(&other.sort_line()))
            .then_with(|| self.sort_col().cmp(&other.sort_col()))
            .then_with(|| self.rule().cmp(&other.rule()))
            .then_with(|| self.message().cmp(&other.message()))
    }
}

impl PartialOrd for Issue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ============================================================
// Tests
// ============================================================
