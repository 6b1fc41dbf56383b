//! Discovery, resolution and builder emission for buildsmith.
//!
//! A host hands the generator one [`SymbolTable`] snapshot per round. Each
//! round runs the built-in [`pipeline`] phases
//! (discover → resolve → extract → emit → record) and returns the emitted
//! builders plus the candidates deferred to the next round. The
//! [`Driver`] implements the usual host loop on top of a [`SymbolSource`].
//!
//! # Module Organization
//!
//! - [`builder`] - Indented text building ([`CodeBuilder`])
//! - [`rust`] - Small Rust item builders used by the emitter
//! - [`symbols`] - Symbol table snapshots and type resolution
//! - [`pipeline`] - Round pipeline, phases, plugins and diagnostics
//! - [`emit`] - Builder source rendering
//! - [`session`] - Cross-round worklist and termination
//! - [`driver`] - Fixed-point host loop
//! - [`output`] - Writing artifacts and the dependency index to disk
//! - [`build`] - Cargo build-script host

pub mod build;
pub mod builder;
pub mod driver;
pub mod emit;
pub mod output;
pub mod pipeline;
pub mod rust;
pub mod session;
pub mod symbols;

pub use builder::CodeBuilder;
pub use driver::{DriveOutcome, Driver};
pub use emit::{EmitOptions, RustEmitter};
pub use session::{RoundOutput, Session};
pub use symbols::{Declaration, DeclaredProperty, SymbolSource, SymbolTable};
