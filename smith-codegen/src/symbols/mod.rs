//! Symbol table snapshots handed to each round.
//!
//! - [`SymbolTable`] - declarations visible this round, keyed by qualified name
//! - [`Resolution`] - result of checking a type signature against a table
//! - [`SymbolSource`] - where snapshots come from ([`Manifest`](buildsmith_manifest::Manifest) implements it)

mod resolve;
mod source;
mod table;

pub use resolve::{Resolution, type_paths};
pub use source::SymbolSource;
pub use table::{Declaration, DeclaredProperty, SymbolTable};
