use std::path::PathBuf;

use buildsmith_manifest::SmithToml;
use clap::Args;
use eyre::Result;

use super::UnwrapOrExit;

#[derive(Args)]
pub struct ListCommand {
    /// Path to smith.toml (defaults to ./smith.toml)
    #[arg(short, long, default_value = "smith.toml")]
    pub config: PathBuf,
}

impl ListCommand {
    pub fn run(&self) -> Result<()> {
        let smith_toml = SmithToml::open(&self.config).unwrap_or_exit();
        let manifest = smith_toml.manifest();

        if manifest.types.is_empty() {
            println!("No types declared");
        } else {
            println!("Types:");
            for decl in &manifest.types {
                let qualified = decl.qualified();
                if decl.builder {
                    println!(
                        "  {} -> {}Builder (round {})",
                        qualified, qualified, decl.round
                    );
                } else {
                    println!("  {}", qualified);
                }
            }
        }

        if !manifest.externs.types.is_empty() {
            println!("\nExterns:");
            for path in &manifest.externs.types {
                println!("  {}", path);
            }
        }

        Ok(())
    }
}
