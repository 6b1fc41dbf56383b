//! Resolve phase - lints candidates and splits them into ready and deferred.

mod lint;
pub mod lints;

use buildsmith_ir::CandidateType;
use eyre::Result;
pub use lint::{Lint, LintInfo};
pub use lints::{DuplicatePropertyLint, ReservedPropertyLint};

use crate::pipeline::{Diagnostic, Phase, RoundContext, codes};

/// Split candidates into `(ready, deferred)`, keeping their order.
///
/// A candidate is ready only when every property resolved; otherwise the
/// whole candidate waits.
pub fn partition(
    candidates: impl IntoIterator<Item = CandidateType>,
) -> (Vec<CandidateType>, Vec<CandidateType>) {
    candidates.into_iter().partition(CandidateType::is_resolved)
}

/// Phase that runs contract lints, then partitions the surviving candidates.
pub struct ResolvePhase {
    lints: Vec<Box<dyn Lint>>,
}

impl ResolvePhase {
    /// Create a resolve phase with the default lints.
    pub fn new() -> Self {
        Self {
            lints: vec![Box::new(ReservedPropertyLint), Box::new(DuplicatePropertyLint)],
        }
    }

    /// Get information about all lints that will be run.
    pub fn lint_info(&self) -> Vec<LintInfo> {
        self.lints.iter().map(|l| l.info()).collect()
    }

    fn lint(&self, candidate: &CandidateType) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        for lint in &self.lints {
            lint.check(candidate, &mut diagnostics);
        }
        diagnostics
    }
}

impl Default for ResolvePhase {
    fn default() -> Self {
        Self::new()
    }
}

impl Phase for ResolvePhase {
    fn name(&self) -> &'static str {
        "resolve"
    }

    fn description(&self) -> &'static str {
        "Lint candidates, then defer those whose property types are not yet known"
    }

    fn run(&self, ctx: &mut RoundContext<'_>) -> Result<()> {
        let mut accepted = Vec::new();
        for candidate in &ctx.candidates {
            let findings = self.lint(candidate);
            let rejected = findings.iter().any(|d| d.severity.is_error());
            ctx.diagnostics.extend(findings);

            if rejected {
                tracing::debug!(candidate = %candidate.qualified_name, "rejected by lints");
                ctx.rejected.push(candidate.qualified_name.clone());
            } else {
                accepted.push(candidate.clone());
            }
        }

        let (ready, deferred) = partition(accepted);

        for candidate in &deferred {
            let unresolved = candidate
                .unresolved_properties()
                .map(|p| format!("{}: {}", p.name, p.type_signature))
                .collect::<Vec<_>>()
                .join(", ");
            tracing::debug!(candidate = %candidate.qualified_name, %unresolved, "deferred");
            ctx.diagnostics.push(
                Diagnostic::info(
                    "resolve",
                    format!(
                        "deferring '{}' to the next round, unresolved: {unresolved}",
                        candidate.qualified_name
                    ),
                )
                .code(codes::DEFERRED_RESOLUTION)
                .at(candidate.qualified_name.to_string()),
            );
        }

        ctx.ready.extend(ready);
        ctx.deferred.extend(deferred);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use buildsmith_ir::{PropertyDescriptor, QualifiedName, SourceLocation};

    use super::*;
    use crate::{session::Worklist, symbols::SymbolTable};

    fn candidate(name: &str, properties: Vec<PropertyDescriptor>) -> CandidateType {
        CandidateType::new(
            QualifiedName::parse(name).unwrap(),
            SourceLocation::new("src/lib.rs"),
        )
        .properties(properties)
    }

    #[test]
    fn test_partition_keeps_order() {
        let (ready, deferred) = partition(vec![
            candidate("m::A", vec![PropertyDescriptor::new("x", "u8")]),
            candidate("m::B", vec![PropertyDescriptor::new("y", "Later").unresolved()]),
            candidate("m::C", vec![]),
        ]);
        let ready: Vec<_> = ready.iter().map(|c| c.qualified_name.name()).collect();
        assert_eq!(ready, vec!["A", "C"]);
        assert_eq!(deferred.len(), 1);
    }

    #[test]
    fn test_one_unresolved_property_defers_the_whole_candidate() {
        let (ready, deferred) = partition(vec![candidate(
            "m::Mixed",
            vec![
                PropertyDescriptor::new("a", "u8"),
                PropertyDescriptor::new("b", "Later").unresolved(),
                PropertyDescriptor::new("c", "u8"),
            ],
        )]);
        assert!(ready.is_empty());
        assert_eq!(deferred[0].properties.len(), 3);
    }

    #[test]
    fn test_phase_rejects_and_defers() {
        let table = SymbolTable::new();
        let worklist = Worklist::default();
        let mut ctx = RoundContext::new(1, &table, &worklist);
        ctx.candidates = vec![
            candidate("m::Bad", vec![PropertyDescriptor::new("build", "u8")]),
            candidate("m::Later", vec![PropertyDescriptor::new("x", "Soon").unresolved()]),
            candidate("m::Good", vec![PropertyDescriptor::new("x", "u8")]),
        ];

        ResolvePhase::new().run(&mut ctx).unwrap();

        assert_eq!(ctx.rejected, vec![QualifiedName::parse("m::Bad").unwrap()]);
        assert_eq!(ctx.ready.len(), 1);
        assert_eq!(ctx.deferred.len(), 1);
        assert_eq!(ctx.error_count(), 1);

        let deferral = ctx
            .diagnostics
            .iter()
            .find(|d| d.code == Some(codes::DEFERRED_RESOLUTION))
            .unwrap();
        assert!(!deferral.severity.is_error());
        assert!(deferral.message.contains("x: Soon"));
    }

    #[test]
    fn test_lint_info() {
        let names: Vec<_> = ResolvePhase::new().lint_info().iter().map(|l| l.name).collect();
        assert_eq!(names, vec!["reserved-property", "duplicate-property"]);
        assert!(ResolvePhase::empty().lint_info().is_empty());
    }
}
