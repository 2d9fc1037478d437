use anyhow::{Context, Result};

use super::{CommandResult, CommandSummary, DiffSummary};
use crate::cli::{
    args::{DiffCommand, DiffFormat},
    report::format_diff,
};
use crate::core::{diff as diff_catalogs, read_catalog};

pub fn diff(cmd: DiffCommand) -> Result<CommandResult> {
    let old = read_catalog(&cmd.old)?;
    let new = read_catalog(&cmd.new)?;

    let report = diff_catalogs(&old, &new);
    let output = match cmd.format {
        DiffFormat::Text => format_diff(&report),
        DiffFormat::Json => serde_json::to_string_pretty(&report)
            .map(|json| format!("{}\n", json))
            .context("Failed to serialize diff report")?,
    };

    let summary = DiffSummary {
        output,
        has_changes: report.has_changes(),
        fail_on_changes: cmd.exit_code,
    };
    Ok(CommandResult::new(CommandSummary::Diff(summary), Vec::new()))
}
