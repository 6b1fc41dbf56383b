mod bake;
mod check;
mod clean;
mod explain;
mod list;

use std::path::{Path, PathBuf};

use bake::BakeCommand;
use check::CheckCommand;
use clap::{ArgAction, Parser, Subcommand};
use clean::CleanCommand;
use eyre::Result;
use explain::ExplainCommand;
use list::ListCommand;

/// Extension trait for exiting on manifest errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for buildsmith_manifest::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

/// Directory the manifest lives in. `.smith/` and relative output paths
/// are resolved against it.
pub(crate) fn project_root(config: &Path) -> PathBuf {
    match config.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[derive(Parser)]
#[command(name = "smith")]
#[command(version)]
#[command(about = "Generate fluent builders from smith.toml declarations")]
pub(crate) struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Bake(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Clean(cmd) => cmd.run(),
            Commands::Explain(cmd) => cmd.run(),
            Commands::List(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate builders from smith.toml
    Bake(BakeCommand),

    /// Run generation without writing and report diagnostics
    Check(CheckCommand),

    /// Remove generated files that are no longer produced
    Clean(CleanCommand),

    /// Describe the generation pipeline
    Explain(ExplainCommand),

    /// List declared types and their builders
    List(ListCommand),
}
