//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `extract`: Build a catalog from marker calls in source documents
//! - `diff`: Compare two persisted catalogs
//! - `manifest`: Write a catalog back out as marker calls
//! - `init`: Initialize trcat configuration file
//! - `serve`: Start MCP server for AI integration

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Extract(cmd)) => cmd.common.verbose,
            Some(Command::Diff(cmd)) => cmd.common.verbose,
            Some(Command::Manifest(cmd)) => cmd.common.verbose,
            Some(Command::Init) | Some(Command::Serve) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct ExtractCommand {
    /// Documents or directories to scan, merged in the order given
    #[arg(required = true)]
    pub documents: Vec<PathBuf>,

    /// Catalog file to write (overrides config file)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Marker identifier to recognise (overrides config file)
    /// Can be specified multiple times: --marker tr --marker _
    #[arg(long = "marker")]
    pub markers: Vec<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum DiffFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Args)]
pub struct DiffCommand {
    /// Previously committed catalog
    pub old: PathBuf,

    /// Newly extracted catalog
    pub new: PathBuf,

    #[arg(long, value_enum, default_value_t = DiffFormat::Text)]
    pub format: DiffFormat,

    /// Exit with 1 when the catalogs differ
    #[arg(long)]
    pub exit_code: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct ManifestCommand {
    /// Catalog to export
    pub catalog: PathBuf,

    /// File to write (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Marker identifier to emit (default: first configured marker)
    #[arg(long)]
    pub marker: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract marked strings into a catalog
    Extract(ExtractCommand),
    /// Report added, removed and changed catalog entries
    Diff(DiffCommand),
    /// Write a catalog as a marker-call manifest
    Manifest(ManifestCommand),
    /// Initialize a new .trcatrc.json configuration file
    Init,
    /// Start MCP server for AI coding agents
    Serve,
}
