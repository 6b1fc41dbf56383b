//! Generated output and its provenance.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{QualifiedName, SourceLocation};

/// A generated builder, handed to the host after each round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuilderArtifact {
    /// `<package>::<Name>Builder`.
    pub output: QualifiedName,
    /// The type this builder constructs.
    pub target: QualifiedName,
    pub source_text: String,
    /// Every source location read while deriving the contract.
    pub depends_on: BTreeSet<SourceLocation>,
}

impl BuilderArtifact {
    /// The dependency declaration the host records for this artifact.
    pub fn dependencies(&self) -> DependencyDeclaration {
        DependencyDeclaration {
            output: self.output.clone(),
            aggregating: false,
            sources: self.depends_on.clone(),
        }
    }
}

/// Advisory metadata: regenerate `output` whenever any of `sources` changes.
///
/// `aggregating` is always `false` for builders: each artifact depends on a
/// fixed set of files, not on every file visible to the compilation unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyDeclaration {
    pub output: QualifiedName,
    pub aggregating: bool,
    pub sources: BTreeSet<SourceLocation>,
}
