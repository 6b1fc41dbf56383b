//! Extract phase - derives construction contracts.

use buildsmith_ir::{CandidateType, ConstructionContract};
use eyre::Result;

use crate::pipeline::{Extracted, Phase, RoundContext};

/// The ordered construction contract of a ready candidate.
pub fn extract_contract(candidate: &CandidateType) -> ConstructionContract {
    debug_assert!(candidate.is_resolved(), "extracting an unresolved candidate");
    ConstructionContract::from_candidate(candidate)
}

pub struct ExtractPhase;

impl Phase for ExtractPhase {
    fn name(&self) -> &'static str {
        "extract"
    }

    fn description(&self) -> &'static str {
        "Derive the ordered construction contract of each ready candidate"
    }

    fn run(&self, ctx: &mut RoundContext<'_>) -> Result<()> {
        for candidate in &ctx.ready {
            let contract = extract_contract(candidate);
            tracing::debug!(
                target_type = %contract.target,
                properties = contract.properties.len(),
                "extracted contract"
            );
            ctx.contracts.push(Extracted {
                candidate: candidate.clone(),
                contract,
            });
        }
        Ok(())
    }
}
