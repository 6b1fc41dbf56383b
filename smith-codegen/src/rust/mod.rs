//! Rust item builders for the structs, impls and functions of a generated
//! builder.
//!
//! These produce syntax only; they are rendered via [`CodeBuilder`](crate::CodeBuilder).

mod fns;
mod impls;
mod structs;

pub use fns::{Fn, Param};
pub use impls::Impl;
pub use structs::{Field, Struct};
