//! Dispatches parsed arguments to the command handlers.
//!
//! # Returns
//! - `Ok(CommandResult)` with the issues and summary to print
//! - `Err` if the command fails (invalid catalog, config error, key integrity
//!   error, etc.)

use anyhow::{Result, bail};

use super::{
    args::{Arguments, Command},
    commands::{
        CommandResult, diff::diff, extract::extract, init::init, manifest::manifest,
    },
};

pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Extract(cmd)) => extract(cmd),
        Some(Command::Diff(cmd)) => diff(cmd),
        Some(Command::Manifest(cmd)) => manifest(cmd),
        Some(Command::Init) => init(),
        Some(Command::Serve) => {
            // Serve command is handled in main.rs before calling run()
            bail!("Serve command should be handled before run()")
        }
        None => bail!("No command provided. Use --help to see available commands."),
    }
}
