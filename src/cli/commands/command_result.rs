use std::path::PathBuf;

use crate::cli::exit_status::ExitStatus;
use crate::issues::{Issue, Severity};

#[derive(Debug)]
pub enum CommandSummary {
    Extract(ExtractSummary),
    Diff(DiffSummary),
    Manifest(ManifestSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct ExtractSummary {
    pub documents_scanned: usize,
    pub strings_extracted: usize,
    pub entry_count: usize,
    /// Number of documents that could not be read.
    pub failed_count: usize,
    /// Catalog path, or `None` when the catalog was incomplete and not written.
    pub written: Option<PathBuf>,
}

#[derive(Debug)]
pub struct DiffSummary {
    /// Rendered report in the requested format.
    pub output: String,
    pub has_changes: bool,
    /// When set, drift is reported through the exit status.
    pub fail_on_changes: bool,
}

#[derive(Debug)]
pub struct ManifestSummary {
    pub entry_count: usize,
    /// Manifest path, or `None` when written to stdout.
    pub written: Option<PathBuf>,
    /// Manifest text; printed when `written` is `None`.
    pub manifest: String,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
}

/// Result of running trcat commands
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    pub error_count: usize,
    pub warning_count: usize,
    /// Issues found while extracting; empty for other commands.
    pub issues: Vec<Issue>,
}

impl CommandResult {
    pub fn new(summary: CommandSummary, mut issues: Vec<Issue>) -> Self {
        issues.sort();
        let error_count = issues
            .iter()
            .filter(|i| i.severity() == Severity::Error)
            .count();
        let warning_count = issues.len() - error_count;
        Self {
            summary,
            error_count,
            warning_count,
            issues,
        }
    }

    pub fn exit_status(&self) -> ExitStatus {
        let failed = match &self.summary {
            CommandSummary::Diff(diff) => diff.fail_on_changes && diff.has_changes,
            CommandSummary::Init(init) => !init.created,
            CommandSummary::Extract(_) | CommandSummary::Manifest(_) => false,
        };
        if failed || self.error_count > 0 {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }
}
