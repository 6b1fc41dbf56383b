//! Lint trait for candidate contracts.

use buildsmith_ir::CandidateType;
use serde::Serialize;

use crate::pipeline::Diagnostic;

/// Information about a lint.
#[derive(Debug, Clone, Serialize)]
pub struct LintInfo {
    pub name: &'static str,
    pub description: &'static str,
}

/// A check run on every candidate before it is partitioned. An error
/// diagnostic rejects the candidate.
pub trait Lint: Send + Sync {
    /// The name of this lint.
    fn name(&self) -> &'static str;

    /// A human-readable description of what this lint checks.
    fn description(&self) -> &'static str;

    /// Check the candidate and add any diagnostics.
    fn check(&self, candidate: &CandidateType, diagnostics: &mut Vec<Diagnostic>);

    fn info(&self) -> LintInfo {
        LintInfo {
            name: self.name(),
            description: self.description(),
        }
    }
}
