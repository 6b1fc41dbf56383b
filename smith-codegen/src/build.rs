//! Cargo build-script host.
//!
//! ```ignore
//! // build.rs
//! fn main() -> eyre::Result<()> {
//!     let out_dir = std::env::var("OUT_DIR")?;
//!     buildsmith_codegen::build::generate("smith.toml", out_dir)?;
//!     Ok(())
//! }
//! ```
//!
//! Generated builders are meant to be `include!`d inside the module that
//! declares their target:
//!
//! ```ignore
//! include!(concat!(env!("OUT_DIR"), "/model/person_builder.rs"));
//! ```

use std::{
    collections::BTreeSet,
    io::{self, Write},
    path::{Path, PathBuf},
};

use buildsmith_manifest::SmithToml;
use eyre::{Result, bail};

use crate::{driver::Driver, emit::Placement, output::GeneratedTree};

/// Generate every builder declared in `manifest_path` under `out_dir`.
///
/// Prints `cargo:rerun-if-changed` for the manifest and for every source a
/// builder depends on, and fails on error diagnostics.
pub fn generate(manifest_path: impl AsRef<Path>, out_dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    generate_to(manifest_path.as_ref(), out_dir.as_ref(), &mut io::stdout().lock())
}

/// [`generate`], writing cargo directives to `directives` instead of stdout.
pub fn generate_to(
    manifest_path: &Path,
    out_dir: &Path,
    directives: &mut impl Write,
) -> Result<Vec<PathBuf>> {
    let smith_toml = SmithToml::open(manifest_path)?;
    let manifest = smith_toml.manifest();

    let outcome = Driver::for_manifest(manifest, Placement::Inline).run(manifest)?;

    let root = manifest_path.parent().unwrap_or(Path::new(""));
    let mut watched = BTreeSet::new();
    watched.insert(manifest_path.to_path_buf());
    for declaration in outcome.dependencies() {
        watched.extend(declaration.sources.iter().map(|s| root.join(s.as_str())));
    }
    for path in &watched {
        writeln!(directives, "cargo:rerun-if-changed={}", path.display())?;
    }

    for diagnostic in outcome.diagnostics.iter().filter(|d| d.severity.is_warning()) {
        writeln!(directives, "cargo:warning={diagnostic}")?;
    }

    if outcome.has_errors() {
        let errors: Vec<String> = outcome.errors().map(ToString::to_string).collect();
        bail!(
            "buildsmith found {} error(s):\n{}",
            errors.len(),
            errors.join("\n")
        );
    }

    let tree = GeneratedTree::new(&outcome.artifacts);
    tree.write(out_dir)?;
    Ok(tree.paths().map(|p| out_dir.join(p)).collect())
}
