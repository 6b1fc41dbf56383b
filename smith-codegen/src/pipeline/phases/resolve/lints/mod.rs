//! Built-in contract lints.

mod duplicate_property;
mod reserved_property;

pub use duplicate_property::DuplicatePropertyLint;
pub use reserved_property::{RESERVED_PROPERTY_NAMES, ReservedPropertyLint};
