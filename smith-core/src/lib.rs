//! Core utilities for the buildsmith builder generator.
//!
//! This crate provides file-writing rules and identifier helpers shared by
//! the manifest parser, the code generator and the CLI.

mod file;
mod ident;
mod utils;

// File operations
pub use file::{File, GENERATED_MARKER, WriteResult, is_generated};
// Identifiers
pub use ident::{RUST_KEYWORDS, escape_ident, is_raw_capable, is_rust_keyword, validate_identifier};
// String utilities
pub use utils::to_snake_case;
