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
pub struct BakeCommand {
    /// Path to smith.toml (defaults to ./smith.toml)
    #[arg(short, long, default_value = "smith.toml")]
    pub config: PathBuf,

    /// Output directory, relative to the manifest
    #[arg(short, long, default_value = "src/generated")]
    pub output: PathBuf,

    /// Preview generated code without writing to disk
    #[arg(long)]
    pub dry_run: bool,

    /// Write per-phase pipeline snapshots to .smith/debug
    #[arg(long)]
    pub visualize: bool,
}

impl BakeCommand {
    /// Run the bake command
    pub fn run(&self) -> Result<()> {
        let smith_toml = SmithToml::open(&self.config).unwrap_or_exit();
        let root = project_root(&self.config);

        let report = ops::bake(
            smith_toml.manifest(),
            ops::bake::BakeOptions {
                root: &root,
                output_dir: &self.output,
                dry_run: self.dry_run,
                visualize: self.visualize,
            },
        )?;

        report.render(&mut TerminalOutput::new());
        if report.has_errors() {
            std::process::exit(1);
        }
        Ok(())
    }
}
