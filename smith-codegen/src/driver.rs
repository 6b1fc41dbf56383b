//! Fixed-point round loop used by every host.

use buildsmith_ir::{BuilderArtifact, DependencyDeclaration};
use buildsmith_manifest::Manifest;
use eyre::Result;

use crate::{
    emit::{EmitOptions, Placement},
    pipeline::{Diagnostic, Pipeline, Plugin},
    session::Session,
    symbols::SymbolSource,
};

/// Everything a driven session produced.
#[derive(Debug, Clone, Default)]
pub struct DriveOutcome {
    /// Artifacts in emission order.
    pub artifacts: Vec<BuilderArtifact>,
    pub diagnostics: Vec<Diagnostic>,
    /// Rounds actually run.
    pub rounds: usize,
}

impl DriveOutcome {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.severity.is_error())
    }

    /// One declaration per artifact, for incremental rebuilds.
    pub fn dependencies(&self) -> Vec<DependencyDeclaration> {
        self.artifacts.iter().map(BuilderArtifact::dependencies).collect()
    }
}

/// Runs rounds until nothing is pending, no round makes progress, or the
/// round cap is reached.
pub struct Driver {
    pipeline: Pipeline,
    max_rounds: usize,
}

impl Driver {
    pub fn new(pipeline: Pipeline, max_rounds: usize) -> Self {
        Self {
            pipeline,
            max_rounds,
        }
    }

    /// A driver configured from the manifest's `[generator]` section.
    pub fn for_manifest(manifest: &Manifest, placement: Placement) -> Self {
        let options = EmitOptions::new(&manifest.generator.runtime).placement(placement);
        Self::new(Pipeline::new(options), manifest.generator.max_rounds)
    }

    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.pipeline = self.pipeline.plugin(plugin);
        self
    }

    pub fn max_rounds(&self) -> usize {
        self.max_rounds
    }

    /// Drive `source` to a fixed point.
    ///
    /// # Errors
    ///
    /// Returns an error if a phase or plugin fails fatally. Unresolved or
    /// rejected candidates are diagnostics, not errors.
    #[tracing::instrument(level = "debug", skip_all, fields(max_rounds = self.max_rounds))]
    pub fn run(self, source: &dyn SymbolSource) -> Result<DriveOutcome> {
        let mut session = Session::new(self.pipeline, self.max_rounds);
        let mut outcome = DriveOutcome::default();

        for round in 1..=self.max_rounds {
            let table = source.snapshot(round, &outcome.artifacts);
            let output = session.process_round(&table)?;
            let progress = output.made_progress();

            outcome.rounds = round;
            outcome.artifacts.extend(output.artifacts);
            outcome.diagnostics.extend(output.diagnostics);

            if source.has_more(round) {
                continue;
            }
            if !session.has_pending() {
                break;
            }
            if !progress {
                tracing::debug!(round, "no progress, stopping");
                break;
            }
        }

        outcome.diagnostics.extend(session.finish());
        tracing::info!(
            rounds = outcome.rounds,
            artifacts = outcome.artifacts.len(),
            errors = outcome.error_count(),
            "generation finished"
        );
        Ok(outcome)
    }
}
