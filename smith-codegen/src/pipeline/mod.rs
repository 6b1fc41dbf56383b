//! Round pipeline.
//!
//! A [`Pipeline`] runs the built-in phases over one symbol table snapshot:
//!
//! - `discover` - collect declarations carrying the directive
//! - `resolve` - run contract lints, then split candidates into ready and deferred
//! - `extract` - derive a construction contract for each ready candidate
//! - `emit` - render builder source, rejecting output name collisions
//! - `record` - attach source provenance to each artifact
//!
//! Plugins are called before and after every phase, and all findings are
//! collected as [`Diagnostic`]s on the [`RoundContext`].
//!
//! # Example
//!
//! ```ignore
//! let pipeline = Pipeline::default().plugin(SnapshotPlugin::with_output_dir(".smith/debug"));
//! let ctx = pipeline.run(1, &table, &worklist)?;
//!
//! for artifact in &ctx.artifacts {
//!     println!("{}", artifact.output);
//! }
//! ```

mod context;
mod diagnostic;
mod phase;
pub mod phases;
mod plugin;
mod runner;
mod snapshot;

pub use context::{Emitted, Extracted, RoundContext};
pub use diagnostic::{Diagnostic, Severity, codes};
pub use phase::{Phase, PhaseInfo};
pub use plugin::Plugin;
pub use runner::Pipeline;
pub use snapshot::{PhaseSnapshot, SnapshotPlugin};
