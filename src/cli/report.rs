//! Report formatting and printing utilities.
//!
//! Issues are displayed in cargo-style format. Kept separate from the engine so
//! trcat can be used as a library.

use std::{
    fmt::Write as _,
    io::{self, Write},
};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{
    CommandResult, CommandSummary, DiffSummary, ExtractSummary, InitSummary, ManifestSummary,
};
use crate::config::CONFIG_FILE_NAME;
use crate::core::{CatalogEntry, DiffReport};
use crate::issues::{Issue, Report, ReportLocation, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print issues in cargo-style format to stdout.
pub fn report(issues: &[Issue]) {
    report_to(issues, &mut io::stdout().lock());
}

/// Print issues to a custom writer. `issues` are expected to be sorted.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let max_line_width = calculate_max_line_width(issues);

    for issue in issues {
        print_issue(issue, writer, max_line_width);
    }

    print_summary(issues, writer);
}

/// Render a diff report as text.
pub fn format_diff(report: &DiffReport<'_>) -> String {
    let mut out = String::new();

    for entry in &report.added {
        write_diff_entry(&mut out, "added".green().bold(), entry);
    }
    for entry in &report.removed {
        write_diff_entry(&mut out, "removed".red().bold(), entry);
    }
    for change in &report.changed {
        let _ = writeln!(
            out,
            "{}: \"{}\" -> \"{}\"  {}",
            "changed".yellow().bold(),
            change.old.text,
            change.new.text,
            change.new.key.to_string().dimmed().cyan()
        );
        write_first_occurrence(&mut out, change.new);
    }

    if report.has_changes() {
        let total = report.added.len() + report.removed.len() + report.changed.len();
        let _ = writeln!(
            out,
            "{}{} {} {} ({} added, {} removed, {} changed), {} unchanged",
            if out.is_empty() { "" } else { "\n" },
            FAILURE_MARK.red(),
            total,
            if total == 1 { "change" } else { "changes" },
            report.added.len(),
            report.removed.len(),
            report.changed.len(),
            report.unchanged
        );
    } else {
        let _ = writeln!(
            out,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Catalogs match ({} {} unchanged)",
                report.unchanged,
                if report.unchanged == 1 {
                    "entry"
                } else {
                    "entries"
                }
            )
            .green()
        );
    }
    out
}

pub fn print(result: &CommandResult) {
    match &result.summary {
        CommandSummary::Extract(summary) => {
            report(&result.issues);
            print_extract(summary);
        }
        CommandSummary::Diff(summary) => print_diff(summary),
        CommandSummary::Manifest(summary) => print_manifest(summary),
        CommandSummary::Init(summary) => print_init(summary),
    }
}

// ============================================================
// Internal Functions
// ============================================================

fn write_diff_entry(out: &mut String, label: colored::ColoredString, entry: &CatalogEntry) {
    let _ = writeln!(
        out,
        "{}: \"{}\"  {}",
        label,
        entry.text,
        entry.key.to_string().dimmed().cyan()
    );
    write_first_occurrence(out, entry);
}

fn write_first_occurrence(out: &mut String, entry: &CatalogEntry) {
    if let Some(location) = entry.occurrences.first() {
        let more = entry.occurrences.len() - 1;
        let _ = writeln!(
            out,
            "  {} {}{}",
            "-->".blue(),
            location,
            if more > 0 {
                format!(" (and {} more)", more)
            } else {
                String::new()
            }
        );
    }
}

fn print_issue<W: Write>(issue: &Issue, writer: &mut W, max_line_width: usize) {
    let severity = issue.report_severity();
    let severity_str = match severity {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: \"{}\"  {}",
        severity_str,
        issue.message(),
        issue.report_rule().to_string().dimmed().cyan()
    );

    match issue.location() {
        ReportLocation::Source(ctx) => {
            let (line, col) = (ctx.line(), ctx.col());
            let _ = writeln!(
                writer,
                "  {} {}:{}:{}",
                "-->".blue(),
                ctx.document_id(),
                line,
                col
            );

            if !ctx.source_line.is_empty() {
                let caret_char = match severity {
                    Severity::Error => "^".red(),
                    Severity::Warning => "^".yellow(),
                };

                let _ = writeln!(
                    writer,
                    "{:>width$} {}",
                    "",
                    "|".blue(),
                    width = max_line_width
                );
                let _ = writeln!(
                    writer,
                    "{:>width$} {} {}",
                    line.to_string().blue(),
                    "|".blue(),
                    ctx.source_line,
                    width = max_line_width
                );

                // col is 1-based and counts characters
                let prefix: String = ctx.source_line.chars().take(col.saturating_sub(1)).collect();
                let caret_padding = UnicodeWidthStr::width(prefix.as_str());
                let _ = writeln!(
                    writer,
                    "{:>width$} {} {:>padding$}{}",
                    "",
                    "|".blue(),
                    "",
                    caret_char,
                    width = max_line_width,
                    padding = caret_padding
                );
            }
        }
        ReportLocation::File { path } => {
            let _ = writeln!(writer, "  {} {}", "-->".blue(), path);
        }
    }

    if let Some(details) = issue.details() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "note:".bold(),
            details,
            width = max_line_width
        );
    }

    if let Some(hint) = issue.hint() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "hint:".bold().cyan(),
            hint,
            width = max_line_width
        );
    }

    let _ = writeln!(writer); // Empty line between issues
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Error)
        .count();
    let total_warnings = issues.len() - total_errors;

    let _ = writeln!(
        writer,
        "{} {} problems ({} {}, {} {})",
        FAILURE_MARK.red(),
        issues.len(),
        total_errors,
        if total_errors == 1 { "error" } else { "errors" }.red(),
        total_warnings,
        if total_warnings == 1 {
            "warning"
        } else {
            "warnings"
        }
        .yellow()
    );
}

fn calculate_max_line_width(issues: &[Issue]) -> usize {
    issues
        .iter()
        .filter_map(|i| match i.location() {
            ReportLocation::Source(ctx) => Some(ctx.line()),
            ReportLocation::File { .. } => None,
        })
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1)
}

fn print_extract(summary: &ExtractSummary) {
    match &summary.written {
        Some(path) => println!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Extracted {} {} ({} {}) from {} {} -> {}",
                summary.strings_extracted,
                if summary.strings_extracted == 1 {
                    "string"
                } else {
                    "strings"
                },
                summary.entry_count,
                if summary.entry_count == 1 {
                    "entry"
                } else {
                    "entries"
                },
                summary.documents_scanned,
                if summary.documents_scanned == 1 {
                    "document"
                } else {
                    "documents"
                },
                path.display()
            )
            .green()
        ),
        None => eprintln!(
            "{} {} document(s) could not be read; catalog is incomplete and was not written",
            "error:".bold().red(),
            summary.failed_count
        ),
    }
}

fn print_diff(summary: &DiffSummary) {
    print!("{}", summary.output);
}

fn print_manifest(summary: &ManifestSummary) {
    match &summary.written {
        Some(path) => println!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Wrote {} {} to {}",
                summary.entry_count,
                if summary.entry_count == 1 {
                    "entry"
                } else {
                    "entries"
                },
                path.display()
            )
            .green()
        ),
        None => print!("{}", summary.manifest),
    }
}

fn print_init(summary: &InitSummary) {
    if summary.created {
        println!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    } else {
        eprintln!("Error: {} already exists", CONFIG_FILE_NAME);
    }
}
