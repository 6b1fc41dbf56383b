use std::path::PathBuf;

use buildsmith_manifest::SmithToml;
use clap::Args;
use eyre::Result;

use super::{UnwrapOrExit, project_root};
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CleanCommand {
    /// Path to smith.toml (defaults to ./smith.toml)
    #[arg(short, long, default_value = "smith.toml")]
    pub config: PathBuf,

    /// Preview what would be deleted without actually deleting
    #[arg(long)]
    pub dry_run: bool,
}

impl CleanCommand {
    pub fn run(&self) -> Result<()> {
        let smith_toml = SmithToml::open(&self.config).unwrap_or_exit();
        let root = project_root(&self.config);

        let report = ops::clean(
            smith_toml.manifest(),
            ops::clean::CleanOptions {
                root: &root,
                dry_run: self.dry_run,
            },
        )?;

        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
