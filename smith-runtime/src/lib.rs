//! Runtime support for builders generated by buildsmith.
//!
//! Generated `build` methods return [`MissingRequiredValue`] when a property
//! was never set. Only the first unset property, in declaration order, is
//! reported.

use thiserror::Error;

/// A generated builder's `build` was called before a property was set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[error("`{property}` must be provided to build `{target}`")]
pub struct MissingRequiredValue {
    target: &'static str,
    property: &'static str,
}

impl MissingRequiredValue {
    pub const fn new(target: &'static str, property: &'static str) -> Self {
        Self { target, property }
    }

    /// Simple name of the type being built.
    pub fn target(&self) -> &'static str {
        self.target
    }

    /// Name of the first unset property.
    pub fn property(&self) -> &'static str {
        self.property
    }
}
