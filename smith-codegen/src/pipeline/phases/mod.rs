//! Built-in pipeline phases, in execution order:
//!
//! - [`DiscoverPhase`] - collects declarations carrying the directive
//! - [`ResolvePhase`] - lints candidates and splits them into ready and deferred
//! - [`ExtractPhase`] - builds construction contracts
//! - [`EmitPhase`] - renders builder source
//! - [`RecordPhase`] - attaches dependency provenance

mod discover;
mod emit;
mod extract;
mod record;
mod resolve;

pub use discover::{DiscoverPhase, discover};
pub use emit::EmitPhase;
pub use extract::{ExtractPhase, extract_contract};
pub use record::{RecordPhase, attach_dependencies};
pub use resolve::{
    DuplicatePropertyLint, Lint, LintInfo, ReservedPropertyLint, ResolvePhase, partition,
};
