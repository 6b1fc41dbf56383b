//! Pipeline snapshot plugin for visualization and debugging.

use std::{
    fs,
    path::PathBuf,
    sync::{Mutex, PoisonError},
};

use buildsmith_ir::{BuilderArtifact, CandidateType, QualifiedName};
use eyre::Result;
use serde::Serialize;

use super::{Diagnostic, Extracted, Plugin, RoundContext};

/// The round state right after one phase.
#[derive(Debug, Clone, Serialize)]
pub struct PhaseSnapshot {
    pub round: usize,
    pub phase: String,
    pub candidates: Vec<CandidateType>,
    pub ready: Vec<QualifiedName>,
    pub deferred: Vec<QualifiedName>,
    pub rejected: Vec<QualifiedName>,
    pub contracts: Vec<Extracted>,
    pub artifacts: Vec<BuilderArtifact>,
    pub diagnostics: Vec<Diagnostic>,
}

impl PhaseSnapshot {
    fn capture(phase: &str, ctx: &RoundContext<'_>) -> Self {
        let names = |c: &[CandidateType]| -> Vec<QualifiedName> {
            c.iter().map(|c| c.qualified_name.clone()).collect()
        };
        Self {
            round: ctx.round,
            phase: phase.to_string(),
            candidates: ctx.candidates.clone(),
            ready: names(&ctx.ready),
            deferred: names(&ctx.deferred),
            rejected: ctx.rejected.clone(),
            contracts: ctx.contracts.clone(),
            artifacts: ctx.artifacts.clone(),
            diagnostics: ctx.diagnostics.clone(),
        }
    }

    /// `round-<n>-<phase>.json`
    pub fn file_name(&self) -> String {
        format!("round-{}-{}.json", self.round, self.phase)
    }
}

/// A plugin that captures the round state after each phase.
///
/// Backs the `--visualize` flag. With an output directory every snapshot is
/// also written as pretty JSON as soon as it is taken.
#[derive(Default)]
pub struct SnapshotPlugin {
    snapshots: Mutex<Vec<PhaseSnapshot>>,
    output_dir: Option<PathBuf>,
}

impl SnapshotPlugin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output_dir(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            snapshots: Mutex::new(Vec::new()),
            output_dir: Some(output_dir.into()),
        }
    }

    /// Get all collected snapshots.
    pub fn snapshots(&self) -> Vec<PhaseSnapshot> {
        self.snapshots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Plugin for SnapshotPlugin {
    fn name(&self) -> &'static str {
        "snapshot"
    }

    fn on_after_phase(&self, phase: &str, ctx: &mut RoundContext<'_>) -> Result<()> {
        let snapshot = PhaseSnapshot::capture(phase, ctx);

        if let Some(dir) = &self.output_dir {
            fs::create_dir_all(dir)?;
            let json = serde_json::to_string_pretty(&snapshot)?;
            fs::write(dir.join(snapshot.file_name()), json)?;
        }

        self.snapshots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(snapshot);
        Ok(())
    }
}
