//! Lint for property names that cannot become setters.

use buildsmith_core::is_raw_capable;
use buildsmith_ir::CandidateType;

use super::super::Lint;
use crate::pipeline::{Diagnostic, codes};

/// Names taken by the builder's own methods.
pub const RESERVED_PROPERTY_NAMES: &[&str] = &["new", "build", "default"];

/// Lint that errors on builder properties whose setter or binding would not
/// compile. Keywords usable as raw identifiers are fine.
pub struct ReservedPropertyLint;

impl Lint for ReservedPropertyLint {
    fn name(&self) -> &'static str {
        "reserved-property"
    }

    fn description(&self) -> &'static str {
        "Reject property names that clash with builder methods or cannot be identifiers"
    }

    fn check(&self, candidate: &CandidateType, diagnostics: &mut Vec<Diagnostic>) {
        for property in candidate.properties.iter().filter(|p| p.is_constructor()) {
            let name = property.name.as_str();
            let reason = if RESERVED_PROPERTY_NAMES.contains(&name) {
                Some(format!("'{name}' is reserved for the builder's own `{name}` method"))
            } else if !is_raw_capable(name) {
                Some(format!("'{name}' cannot be used as an identifier, even as r#{name}"))
            } else if name.starts_with(|c: char| c.is_ascii_uppercase()) {
                Some(format!("'{name}' must start with a lowercase letter or underscore"))
            } else {
                None
            };

            if let Some(reason) = reason {
                diagnostics.push(
                    Diagnostic::error(
                        "resolve",
                        format!("invalid property in '{}': {reason}", candidate.qualified_name),
                    )
                    .code(codes::INVALID_CONTRACT)
                    .at(format!("{}.{name}", candidate.qualified_name)),
                );
            }
        }
    }
}
