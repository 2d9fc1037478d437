use std::{
    collections::HashMap,
    env,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use super::{CommandResult, CommandSummary, ExtractSummary};
use crate::cli::args::ExtractCommand;
use crate::config::{Config, load_config};
use crate::core::{
    Catalog, DiagnosticKind, ExtractionRun, Extractor, Pipeline, SourceContext, SourceDocument,
    SourceLocation, find_variants, scan_documents, write_catalog,
};
use crate::issues::{Issue, MalformedMarkerIssue, NonLiteralIssue, ReadFailureIssue, VariantIssue};

pub fn extract(cmd: ExtractCommand) -> Result<CommandResult> {
    let verbose = cmd.common.verbose;
    let config = load_config(&env::current_dir()?)?
        .config
        .with_markers(&cmd.markers);
    config.validate()?;

    let output = cmd
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.output));

    let scan = scan_documents(&cmd.documents, &config.extensions, &config.ignores, verbose);
    let run = Pipeline::new(Extractor::new(&config.markers))
        .run_scan(Path::new(""), scan)
        .context("Extraction aborted")?;

    let written = if run.catalog.is_complete() {
        write_catalog(&output, &run.catalog)
            .with_context(|| format!("Failed to write catalog {}", output.display()))?;
        Some(output)
    } else {
        None
    };

    let issues = collect_issues(&run, &config, Path::new(""));
    let summary = ExtractSummary {
        documents_scanned: run.documents_scanned,
        strings_extracted: run.strings_extracted,
        entry_count: run.catalog.len(),
        failed_count: run.failures.len(),
        written,
    };

    Ok(CommandResult::new(CommandSummary::Extract(summary), issues))
}

/// Turn the diagnostics, read failures and (if enabled) variants of a run into
/// reportable issues with source context. Document ids are resolved against
/// `base`.
pub fn collect_issues(run: &ExtractionRun, config: &Config, base: &Path) -> Vec<Issue> {
    let mut lines = LineCache::new(base);
    let mut issues = Vec::new();

    for diagnostic in &run.diagnostics {
        let context = lines.context(SourceLocation::new(
            &diagnostic.document_id,
            diagnostic.position.line,
            diagnostic.position.col,
        ));
        issues.push(match diagnostic.kind {
            DiagnosticKind::NonLiteralArgument => Issue::NonLiteral(NonLiteralIssue { context }),
            kind => Issue::MalformedMarker(MalformedMarkerIssue { context, kind }),
        });
    }

    for failure in &run.failures {
        issues.push(Issue::ReadFailure(ReadFailureIssue {
            document_id: failure.document_id.clone(),
            error: failure.error.to_string(),
        }));
    }

    if config.report_variants {
        issues.extend(variant_issues(&run.catalog, &mut lines));
    }

    issues
}

fn variant_issues(catalog: &Catalog, lines: &mut LineCache<'_>) -> Vec<Issue> {
    let mut issues = Vec::new();
    for group in find_variants(catalog) {
        let Some((first, rest)) = group.entries.split_first() else {
            continue;
        };
        for entry in rest {
            let Some(location) = entry.occurrences.first() else {
                continue;
            };
            issues.push(Issue::Variant(VariantIssue {
                context: lines.context(location.clone()),
                text: entry.text.clone(),
                first_text: first.text.clone(),
                first_rank: first.rank,
            }));
        }
    }
    issues
}

/// Re-reads documents on demand to attach source lines to issues.
struct LineCache<'a> {
    base: &'a Path,
    documents: HashMap<String, Option<SourceDocument>>,
}

impl<'a> LineCache<'a> {
    fn new(base: &'a Path) -> Self {
        Self {
            base,
            documents: HashMap::new(),
        }
    }

    fn context(&mut self, location: SourceLocation) -> SourceContext {
        let base = self.base;
        let document = self
            .documents
            .entry(location.document_id.clone())
            .or_insert_with(|| {
                SourceDocument::read_from(base, Path::new(&location.document_id)).ok()
            });
        let source_line = document
            .as_ref()
            .and_then(|d| d.line_text(location.line))
            .unwrap_or_default()
            .to_string();
        SourceContext::new(location, source_line)
    }
}
