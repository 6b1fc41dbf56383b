//! Lint for properties declared twice.

use std::collections::HashSet;

use buildsmith_ir::CandidateType;

use super::super::Lint;
use crate::pipeline::{Diagnostic, codes};

/// Lint that errors when two properties of one type share a name.
pub struct DuplicatePropertyLint;

impl Lint for DuplicatePropertyLint {
    fn name(&self) -> &'static str {
        "duplicate-property"
    }

    fn description(&self) -> &'static str {
        "Detect properties declared more than once"
    }

    fn check(&self, candidate: &CandidateType, diagnostics: &mut Vec<Diagnostic>) {
        let mut seen = HashSet::new();
        for property in &candidate.properties {
            let name = property.name.strip_prefix("r#").unwrap_or(&property.name);
            if !seen.insert(name) {
                diagnostics.push(
                    Diagnostic::error(
                        "resolve",
                        format!(
                            "duplicate property '{name}' in '{}'",
                            candidate.qualified_name
                        ),
                    )
                    .code(codes::INVALID_CONTRACT)
                    .at(format!("{}.{name}", candidate.qualified_name)),
                );
            }
        }
    }
}
