// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

//! `smith.toml` parsing and validation.
//!
//! The manifest is a static registry of type declarations: the stand-in for
//! the host compiler's symbol table. Declarations with `builder = true`
//! carry the generation directive.

mod error;
mod file;
mod manifest;
mod parse;
mod validate;

pub use error::{Error, Result, SourceContext};
pub use file::SmithToml;
pub use manifest::{
    DEFAULT_MAX_ROUNDS, DEFAULT_RUNTIME, Externs, GeneratorConfig, Manifest, PropertyDecl,
    TypeDecl,
};
pub use parse::parse_manifest;
pub use validate::ParseContext;
