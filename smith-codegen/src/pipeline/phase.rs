//! Pipeline phase trait.

use eyre::Result;
use serde::Serialize;

use super::RoundContext;

/// Information about a pipeline phase.
#[derive(Debug, Clone, Serialize)]
pub struct PhaseInfo {
    pub name: &'static str,
    pub description: &'static str,
}

/// A phase in the round pipeline.
///
/// Phases are executed in order. Each phase reads the stage vectors filled
/// by earlier phases and appends its own results and diagnostics.
///
/// Custom phases run after the built-in ones.
pub trait Phase: Send + Sync {
    /// The name of this phase (used in diagnostics and plugin hooks).
    fn name(&self) -> &'static str;

    /// A human-readable description of what this phase does.
    fn description(&self) -> &'static str;

    /// Run this phase on the round context.
    ///
    /// # Errors
    ///
    /// Returns an error only if the phase fails fatally. Problems with a
    /// single candidate are recorded as diagnostics instead.
    fn run(&self, ctx: &mut RoundContext<'_>) -> Result<()>;

    /// Get information about this phase.
    fn info(&self) -> PhaseInfo {
        PhaseInfo {
            name: self.name(),
            description: self.description(),
        }
    }
}
