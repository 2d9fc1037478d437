use std::{env, fs};

use anyhow::{Context, Result, bail};

use super::{CommandResult, CommandSummary, ManifestSummary};
use crate::cli::args::ManifestCommand;
use crate::config::{is_identifier, load_config};
use crate::core::{DEFAULT_MARKER, read_catalog, render_manifest};

pub fn manifest(cmd: ManifestCommand) -> Result<CommandResult> {
    let catalog = read_catalog(&cmd.catalog)?;

    let marker = match cmd.marker {
        Some(marker) => marker,
        None => load_config(&env::current_dir()?)?
            .config
            .markers
            .into_iter()
            .next()
            .unwrap_or_else(|| DEFAULT_MARKER.to_string()),
    };
    if !is_identifier(&marker) {
        bail!("Invalid marker: \"{}\"", marker);
    }

    let manifest = render_manifest(&catalog, &marker);
    if let Some(path) = &cmd.output {
        fs::write(path, &manifest)
            .with_context(|| format!("Failed to write manifest {}", path.display()))?;
    }

    let summary = ManifestSummary {
        entry_count: catalog.len(),
        written: cmd.output,
        manifest,
    };
    Ok(CommandResult::new(CommandSummary::Manifest(summary), Vec::new()))
}
