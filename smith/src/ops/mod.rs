//! Core operations.
//!
//! This module contains the business logic for smith commands,
//! separated from CLI argument parsing and output rendering.

pub mod bake;
pub mod check;
pub mod clean;
pub mod explain;

pub use bake::bake;
use buildsmith_codegen::pipeline::{Diagnostic, Severity};
pub use check::check;
pub use clean::clean;
pub use explain::explain;

/// Render every diagnostic of one severity as a report line.
fn messages(diagnostics: &[Diagnostic], severity: Severity) -> Vec<String> {
    diagnostics
        .iter()
        .filter(|d| d.severity == severity)
        .map(|d| {
            let mut msg = match d.code {
                Some(code) => format!("[{}] {}", code, d.message),
                None => d.message.clone(),
            };
            if let Some(loc) = &d.location {
                msg.push_str(&format!("\n  --> {}", loc));
            }
            msg
        })
        .collect()
}
