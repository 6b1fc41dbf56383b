//! Diagnostic types for the round pipeline.

use serde::Serialize;

/// Stable codes attached to diagnostics that hosts may want to match on.
pub mod codes {
    /// A candidate never resolved before the session ended or hit its retry bound.
    pub const UNRESOLVABLE_CONTRACT: &str = "smith::unresolvable_contract";
    /// A builder name is already declared or already produced.
    pub const DUPLICATE_OUTPUT_IDENTIFIER: &str = "smith::duplicate_output_identifier";
    /// A candidate's properties cannot be turned into a builder.
    pub const INVALID_CONTRACT: &str = "smith::invalid_contract";
    /// A candidate was postponed to the next round.
    pub const DEFERRED_RESOLUTION: &str = "smith::deferred_resolution";
}

/// Severity level for a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Severity {
    /// The affected candidate produces no builder.
    Error,
    /// Suspicious but not blocking.
    Warning,
    /// Progress information, such as a deferral.
    Info,
}

impl Severity {
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// A diagnostic message from a pipeline phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// The phase that produced this diagnostic.
    pub phase: String,
    /// One of [`codes`], when the condition has a stable identity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
    pub message: String,
    /// Qualified name of the candidate concerned, e.g. `model::Person`.
    pub location: Option<String>,
}

impl Diagnostic {
    fn with_severity(severity: Severity, phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            phase: phase.into(),
            code: None,
            message: message.into(),
            location: None,
        }
    }

    pub fn error(phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with_severity(Severity::Error, phase, message)
    }

    pub fn warning(phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with_severity(Severity::Warning, phase, message)
    }

    pub fn info(phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with_severity(Severity::Info, phase, message)
    }

    /// Add a location to this diagnostic.
    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Attach a stable code.
    pub fn code(mut self, code: &'static str) -> Self {
        self.code = Some(code);
        self
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.code {
            Some(code) => write!(f, "{}[{}]: {}", self.severity, code, self.message)?,
            None => write!(f, "{}: {}", self.severity, self.message)?,
        }
        if let Some(loc) = &self.location {
            write!(f, " (at {})", loc)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_error() {
        let diag = Diagnostic::error("emit", "name taken");
        assert!(diag.severity.is_error());
        assert_eq!(diag.phase, "emit");
        assert_eq!(diag.to_string(), "error: name taken");
    }

    #[test]
    fn test_diagnostic_with_code_and_location() {
        let diag = Diagnostic::error("session", "never resolved")
            .code(codes::UNRESOLVABLE_CONTRACT)
            .at("model::Person");
        assert_eq!(
            diag.to_string(),
            "error[smith::unresolvable_contract]: never resolved (at model::Person)"
        );
    }

    #[test]
    fn test_severity_display() {
        assert_eq!(Severity::Error.to_string(), "error");
        assert_eq!(Severity::Warning.to_string(), "warning");
        assert_eq!(Severity::Info.to_string(), "info");
    }
}
