//! State carried through the phases of one round.

use buildsmith_ir::{BuilderArtifact, CandidateType, ConstructionContract, QualifiedName};
use serde::Serialize;

use super::diagnostic::{Diagnostic, Severity};
use crate::{session::Worklist, symbols::SymbolTable};

/// A ready candidate and the contract extracted from it.
#[derive(Debug, Clone, Serialize)]
pub struct Extracted {
    pub candidate: CandidateType,
    pub contract: ConstructionContract,
}

/// A rendered builder, before provenance is attached.
#[derive(Debug, Clone, Serialize)]
pub struct Emitted {
    pub candidate: CandidateType,
    pub artifact: BuilderArtifact,
}

/// Context passed through all phases of one round.
///
/// Phases read the snapshot and the session's worklist and append to the
/// stage vectors, so after a run every intermediate result is still
/// available for plugins and for the session.
#[derive(Debug)]
pub struct RoundContext<'a> {
    /// 1-based round number.
    pub round: usize,
    pub table: &'a SymbolTable,
    /// What earlier rounds of the session already settled.
    pub worklist: &'a Worklist,
    /// Populated by `discover`.
    pub candidates: Vec<CandidateType>,
    /// Populated by `resolve`.
    pub ready: Vec<CandidateType>,
    /// Populated by `resolve`.
    pub deferred: Vec<CandidateType>,
    /// Candidates that failed a lint or a collision check.
    pub rejected: Vec<QualifiedName>,
    /// Populated by `extract`.
    pub contracts: Vec<Extracted>,
    /// Populated by `emit`.
    pub emitted: Vec<Emitted>,
    /// Populated by `record`; what the host receives.
    pub artifacts: Vec<BuilderArtifact>,
    pub diagnostics: Vec<Diagnostic>,
}

impl<'a> RoundContext<'a> {
    pub fn new(round: usize, table: &'a SymbolTable, worklist: &'a Worklist) -> Self {
        Self {
            round,
            table,
            worklist,
            candidates: Vec::new(),
            ready: Vec::new(),
            deferred: Vec::new(),
            rejected: Vec::new(),
            contracts: Vec::new(),
            emitted: Vec::new(),
            artifacts: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity.is_error())
            .count()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Error))
    }

    /// Reject a candidate with an error diagnostic.
    pub fn reject(&mut self, name: &QualifiedName, diagnostic: Diagnostic) {
        self.rejected.push(name.clone());
        self.diagnostics.push(diagnostic.at(name.to_string()));
    }
}
