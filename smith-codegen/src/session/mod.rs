//! Cross-round processing state.
//!
//! A [`Session`] owns the [`Worklist`] and runs the pipeline once per round.
//! Candidates move from pending to emitted, rejected or abandoned; anything
//! still pending when the session finishes is reported, never dropped.

mod worklist;

use buildsmith_ir::{BuilderArtifact, CandidateType, QualifiedName};
use eyre::Result;
pub use worklist::{WorkId, WorkState, Worklist};

use crate::{
    pipeline::{Diagnostic, Pipeline, RoundContext, codes},
    symbols::SymbolTable,
};

/// What one round hands back to the host.
#[derive(Debug, Clone)]
pub struct RoundOutput {
    pub round: usize,
    pub artifacts: Vec<BuilderArtifact>,
    /// Candidates to retry next round.
    pub deferred: Vec<CandidateType>,
    pub diagnostics: Vec<Diagnostic>,
}

impl RoundOutput {
    pub fn made_progress(&self) -> bool {
        !self.artifacts.is_empty()
    }
}

pub struct Session {
    pipeline: Pipeline,
    worklist: Worklist,
    round: usize,
    retry_bound: usize,
}

impl Session {
    /// A session that abandons a candidate once it has been deferred more
    /// than `retry_bound` times.
    pub fn new(pipeline: Pipeline, retry_bound: usize) -> Self {
        Self {
            pipeline,
            worklist: Worklist::default(),
            round: 0,
            retry_bound,
        }
    }

    pub fn has_pending(&self) -> bool {
        self.worklist.has_pending()
    }

    /// Run one round over a fresh snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if a phase or plugin fails fatally.
    #[tracing::instrument(level = "debug", skip_all, fields(round = self.round + 1))]
    pub fn process_round(&mut self, table: &SymbolTable) -> Result<RoundOutput> {
        self.round += 1;
        let round = self.round;

        let ctx = self.pipeline.run(round, table, &self.worklist)?;
        let RoundContext {
            candidates,
            deferred,
            rejected,
            artifacts,
            mut diagnostics,
            ..
        } = ctx;

        for candidate in &candidates {
            self.worklist.track(&candidate.qualified_name);
        }
        for name in &rejected {
            let id = self.worklist.track(name);
            self.worklist.reject(id);
        }
        for artifact in &artifacts {
            let id = self.worklist.track(&artifact.target);
            self.worklist.emit(id, artifact.output.clone());
        }

        let mut retry = Vec::new();
        for candidate in deferred {
            let id = self.worklist.track(&candidate.qualified_name);
            let unresolved: Vec<String> = candidate
                .unresolved_properties()
                .map(|p| format!("{}: {}", p.name, p.type_signature))
                .collect();
            let deferrals = self.worklist.defer(id, unresolved.clone());

            if deferrals > self.retry_bound {
                self.worklist.abandon(id);
                diagnostics.push(unresolvable(&candidate.qualified_name, deferrals, &unresolved));
            } else {
                retry.push(candidate);
            }
        }

        tracing::debug!(
            emitted = artifacts.len(),
            deferred = retry.len(),
            rejected = rejected.len(),
            "round complete"
        );

        Ok(RoundOutput {
            round,
            artifacts,
            deferred: retry,
            diagnostics,
        })
    }

    /// End the session, reporting every candidate that never resolved.
    pub fn finish(self) -> Vec<Diagnostic> {
        self.worklist
            .pending()
            .filter_map(|(_, name, state)| {
                let WorkState::Pending {
                    deferrals,
                    unresolved,
                } = state
                else {
                    return None;
                };
                Some(unresolvable(name, *deferrals, unresolved))
            })
            .collect()
    }
}

fn unresolvable(name: &QualifiedName, deferrals: usize, unresolved: &[String]) -> Diagnostic {
    let rounds = if deferrals == 1 { "round" } else { "rounds" };
    Diagnostic::error(
        "session",
        format!(
            "cannot resolve '{name}' after {deferrals} {rounds}, unresolved: {}",
            unresolved.join(", ")
        ),
    )
    .code(codes::UNRESOLVABLE_CONTRACT)
    .at(name.to_string())
}

#[cfg(test)]
mod tests {
    use buildsmith_ir::SourceLocation;

    use super::*;
    use crate::symbols::{Declaration, DeclaredProperty};

    fn name(path: &str) -> QualifiedName {
        QualifiedName::parse(path).unwrap()
    }

    fn waiting_table(with_dependency: bool) -> SymbolTable {
        let mut table = SymbolTable::new().with(
            Declaration::new(name("m::Order"), "src/order.rs".into())
                .directive()
                .property(DeclaredProperty::new("receipt", "Receipt")),
        );
        if with_dependency {
            table.insert(Declaration::new(name("m::Receipt"), "src/receipt.rs".into()));
        }
        table
    }

    #[test]
    fn test_deferred_then_emitted() {
        let mut session = Session::new(Pipeline::default(), 10);

        let first = session.process_round(&waiting_table(false)).unwrap();
        assert!(first.artifacts.is_empty());
        assert_eq!(first.deferred.len(), 1);
        assert!(!first.made_progress());
        assert!(first.diagnostics.iter().all(|d| !d.severity.is_error()));

        let second = session.process_round(&waiting_table(true)).unwrap();
        assert_eq!(second.round, 2);
        assert_eq!(second.artifacts.len(), 1);
        assert!(second.deferred.is_empty());
        assert!(
            second.artifacts[0]
                .depends_on
                .contains(&SourceLocation::new("src/receipt.rs"))
        );

        assert!(!session.has_pending());
        assert!(session.finish().is_empty());
    }

    #[test]
    fn test_emitted_candidate_is_not_emitted_again() {
        let mut session = Session::new(Pipeline::default(), 10);
        let table = waiting_table(true);

        assert_eq!(session.process_round(&table).unwrap().artifacts.len(), 1);
        assert!(session.process_round(&table).unwrap().artifacts.is_empty());
    }

    #[test]
    fn test_finish_reports_each_unresolved_candidate_once() {
        let mut session = Session::new(Pipeline::default(), 10);
        for _ in 0..3 {
            session.process_round(&waiting_table(false)).unwrap();
        }

        let diagnostics = session.finish();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, Some(codes::UNRESOLVABLE_CONTRACT));
        assert_eq!(diagnostics[0].location.as_deref(), Some("m::Order"));
        assert_eq!(
            diagnostics[0].message,
            "cannot resolve 'm::Order' after 3 rounds, unresolved: receipt: Receipt"
        );
    }

    #[test]
    fn test_retry_bound_abandons_once() {
        let mut session = Session::new(Pipeline::default(), 1);

        let first = session.process_round(&waiting_table(false)).unwrap();
        assert_eq!(first.deferred.len(), 1);

        let second = session.process_round(&waiting_table(false)).unwrap();
        assert!(second.deferred.is_empty());
        let errors: Vec<_> = second
            .diagnostics
            .iter()
            .filter(|d| d.code == Some(codes::UNRESOLVABLE_CONTRACT))
            .collect();
        assert_eq!(errors.len(), 1);

        let third = session.process_round(&waiting_table(false)).unwrap();
        assert!(third.diagnostics.is_empty());
        assert!(session.finish().is_empty());
    }

    #[test]
    fn test_rejected_candidate_is_settled() {
        let mut session = Session::new(Pipeline::default(), 10);
        let table = SymbolTable::new().with(
            Declaration::new(name("m::Bad"), "src/bad.rs".into())
                .directive()
                .property(DeclaredProperty::new("build", "u8")),
        );

        let output = session.process_round(&table).unwrap();
        assert!(output.artifacts.is_empty());
        assert_eq!(output.diagnostics[0].code, Some(codes::INVALID_CONTRACT));
        assert!(!session.has_pending());
        assert!(session.finish().is_empty());
    }
}
