//! Explain command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from pipeline explanation.
#[derive(Debug)]
pub struct ExplainReport {
    /// Path to the manifest file.
    pub config_path: PathBuf,
    /// Manifest information.
    pub manifest: ManifestInfo,
    /// Pipeline phases.
    pub phases: Vec<PhaseInfo>,
    /// Contract lints.
    pub lints: Vec<LintInfo>,
    /// Results from driving the manifest.
    pub analysis: AnalysisResult,
}

/// Information extracted from the manifest.
#[derive(Debug)]
pub struct ManifestInfo {
    /// Runtime crate path used by generated code.
    pub runtime: String,
    /// Round cap and retry bound.
    pub max_rounds: usize,
    pub type_count: usize,
    /// Declarations carrying the directive.
    pub builder_count: usize,
    pub extern_count: usize,
}

/// Information about a pipeline phase.
#[derive(Debug)]
pub struct PhaseInfo {
    /// Phase name.
    pub name: String,
    /// Phase description.
    pub description: String,
}

/// Information about a contract lint.
#[derive(Debug)]
pub struct LintInfo {
    /// Lint name.
    pub name: String,
    /// Lint description.
    pub description: String,
}

/// Results from driving the manifest.
#[derive(Debug)]
pub struct AnalysisResult {
    /// Rounds the driver ran.
    pub rounds: usize,
    /// Builders emitted.
    pub artifact_count: usize,
    /// Error diagnostics reported.
    pub error_count: usize,
    /// Builder files, relative to the output directory.
    pub generated_files: Vec<String>,
}

impl Report for ExplainReport {
    fn render(&self, out: &mut dyn Output) {
        out.title("Buildsmith Pipeline Explanation");
        out.newline();

        out.key_value("Input", &self.config_path.display().to_string());
        out.key_value_indented("Types", &self.manifest.type_count.to_string());
        out.key_value_indented("With builder", &self.manifest.builder_count.to_string());
        out.key_value_indented("Externs", &self.manifest.extern_count.to_string());
        out.key_value_indented("Runtime", &self.manifest.runtime);
        out.key_value_indented("Max rounds", &self.manifest.max_rounds.to_string());
        out.newline();

        out.section("Pipeline Phases");
        for (i, phase) in self.phases.iter().enumerate() {
            out.numbered_item(i + 1, &format!("{} - {}", phase.name, phase.description));
        }
        out.newline();

        out.section("Contract Lints");
        for lint in &self.lints {
            out.list_item(&format!("{}: {}", lint.name, lint.description));
        }
        out.newline();

        out.section("Analysis Results");
        out.key_value_indented("Rounds", &self.analysis.rounds.to_string());
        out.key_value_indented("Builders", &self.analysis.artifact_count.to_string());
        out.key_value_indented("Errors", &self.analysis.error_count.to_string());
        out.newline();

        if !self.analysis.generated_files.is_empty() {
            out.section("Files to Generate");
            for path in &self.analysis.generated_files {
                out.list_item(path);
            }
            out.list_item("mod.rs in every package directory");
        }
    }
}
