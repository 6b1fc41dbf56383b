//! Intermediate representation types for the buildsmith builder generator.
//!
//! These types are the values that flow through a processing round:
//!
//! ```text
//! SymbolTable → CandidateType → ConstructionContract → BuilderArtifact
//! ```
//!
//! All of them are immutable once constructed and carry no references to
//! each other, so a host may move them across threads freely.

mod artifact;
mod candidate;
mod contract;
mod name;

pub use artifact::{BuilderArtifact, DependencyDeclaration};
pub use candidate::{CandidateType, Constructor, PropertyDescriptor, PropertyRole};
pub use contract::{ConstructionContract, ContractProperty};
pub use name::{QualifiedName, SourceLocation};
