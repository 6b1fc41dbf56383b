//! Types whose builders are generated at build time from `smith.toml`.
//!
//! Each module `include!`s the builders of the types it declares.

pub mod bank;
pub mod lexer;
pub mod model;
pub mod shop;
