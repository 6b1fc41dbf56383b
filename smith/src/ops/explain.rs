//! Explain operation - pipeline explanation.

use std::path::Path;

use buildsmith_codegen::{
    Driver, EmitOptions,
    emit::Placement,
    output::artifact_path,
    pipeline::{Pipeline, phases::ResolvePhase},
};
use buildsmith_manifest::Manifest;
use eyre::{Context, Result};

use crate::reports::{AnalysisResult, ExplainReport, LintInfo, ManifestInfo, PhaseInfo};

/// Execute the explain operation.
///
/// Describes the pipeline, then drives the manifest to show what it yields.
pub fn explain(manifest: &Manifest, config_path: &Path) -> Result<ExplainReport> {
    let options = EmitOptions::new(&manifest.generator.runtime).placement(Placement::Module);
    let pipeline = Pipeline::new(options);
    let resolve_phase = ResolvePhase::new();

    let phases = pipeline
        .phase_info()
        .into_iter()
        .map(|p| PhaseInfo {
            name: p.name.to_string(),
            description: p.description.to_string(),
        })
        .collect();

    let lints = resolve_phase
        .lint_info()
        .into_iter()
        .map(|l| LintInfo {
            name: l.name.to_string(),
            description: l.description.to_string(),
        })
        .collect();

    let outcome = Driver::new(pipeline, manifest.generator.max_rounds)
        .run(manifest)
        .wrap_err("Generation failed")?;

    let generated_files = outcome
        .artifacts
        .iter()
        .map(|a| artifact_path(a).display().to_string())
        .collect();

    Ok(ExplainReport {
        config_path: config_path.to_path_buf(),
        manifest: ManifestInfo {
            runtime: manifest.generator.runtime.clone(),
            max_rounds: manifest.generator.max_rounds,
            type_count: manifest.types.len(),
            builder_count: manifest.builder_types().count(),
            extern_count: manifest.externs.types.len(),
        },
        phases,
        lints,
        analysis: AnalysisResult {
            rounds: outcome.rounds,
            artifact_count: outcome.artifacts.len(),
            error_count: outcome.error_count(),
            generated_files,
        },
    })
}
