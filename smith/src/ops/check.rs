//! Check operation - a full generation run that writes nothing.

use std::path::Path;

use buildsmith_codegen::{Driver, emit::Placement, pipeline::Severity};
use buildsmith_manifest::Manifest;
use eyre::{Context, Result};

use super::messages;
use crate::reports::CheckReport;

/// Execute the check operation.
///
/// Drives the manifest exactly as `bake` would and returns the diagnostics.
pub fn check(manifest: &Manifest, config_path: &Path) -> Result<CheckReport> {
    let outcome = Driver::for_manifest(manifest, Placement::Module)
        .run(manifest)
        .wrap_err("Validation failed")?;

    Ok(CheckReport {
        config_path: config_path.to_path_buf(),
        builder_count: outcome.artifacts.len(),
        rounds: outcome.rounds,
        errors: messages(&outcome.diagnostics, Severity::Error),
        warnings: messages(&outcome.diagnostics, Severity::Warning),
        infos: messages(&outcome.diagnostics, Severity::Info),
    })
}
