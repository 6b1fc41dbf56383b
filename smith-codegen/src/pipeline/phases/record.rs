//! Record phase - attaches provenance to artifacts.

use buildsmith_ir::{BuilderArtifact, CandidateType};
use eyre::Result;

use crate::pipeline::{Phase, RoundContext};

/// Set `depends_on` to the candidate's source plus the source of every
/// declaration its property types referred to.
pub fn attach_dependencies(mut artifact: BuilderArtifact, candidate: &CandidateType) -> BuilderArtifact {
    artifact.depends_on.insert(candidate.source.clone());
    for property in &candidate.properties {
        artifact.depends_on.extend(property.sources.iter().cloned());
    }
    artifact
}

pub struct RecordPhase;

impl Phase for RecordPhase {
    fn name(&self) -> &'static str {
        "record"
    }

    fn description(&self) -> &'static str {
        "Attach the source files each builder was derived from"
    }

    fn run(&self, ctx: &mut RoundContext<'_>) -> Result<()> {
        for emitted in &ctx.emitted {
            let artifact = attach_dependencies(emitted.artifact.clone(), &emitted.candidate);
            tracing::debug!(
                output = %artifact.output,
                sources = artifact.depends_on.len(),
                "recorded dependencies"
            );
            ctx.artifacts.push(artifact);
        }
        Ok(())
    }
}
