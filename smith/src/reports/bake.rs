//! Bake command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from builder generation.
#[derive(Debug)]
pub struct BakeReport {
    /// Rounds the driver ran.
    pub rounds: usize,
    /// Builders produced, in emission order.
    pub builders: Vec<BuilderLine>,
    /// Error diagnostics. Any error aborts writing.
    pub errors: Vec<String>,
    /// Warning diagnostics.
    pub warnings: Vec<String>,
    /// Path to debug snapshots, if visualization was enabled.
    pub debug_dir: Option<PathBuf>,
    /// Generation result (files written, preview or aborted).
    pub result: GenerationResult,
}

impl BakeReport {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// A target type and the builder generated for it.
#[derive(Debug)]
pub struct BuilderLine {
    pub target: String,
    pub output: String,
}

/// Result of code generation.
#[derive(Debug)]
pub enum GenerationResult {
    /// Files were written to disk.
    Written(WrittenResult),
    /// Dry-run preview.
    Preview(PreviewResult),
    /// Errors were reported; nothing was written.
    Aborted,
}

/// Result when files were written to disk.
#[derive(Debug)]
pub struct WrittenResult {
    /// Output directory.
    pub output_dir: PathBuf,
    /// Files whose content changed, relative to the output directory.
    pub written: Vec<PathBuf>,
    /// Number of files left untouched.
    pub unchanged: usize,
    /// Files from the previous bake that are no longer produced.
    pub stale: Vec<String>,
}

/// Result of a dry-run preview.
#[derive(Debug)]
pub struct PreviewResult {
    /// Files that would be generated.
    pub files: Vec<PreviewFile>,
}

/// A file in preview mode.
#[derive(Debug)]
pub struct PreviewFile {
    /// File path.
    pub path: String,
    /// File content.
    pub content: String,
}

impl Report for BakeReport {
    fn render(&self, out: &mut dyn Output) {
        if let Some(debug_dir) = &self.debug_dir {
            out.key_value(
                "Pipeline snapshots written to",
                &debug_dir.display().to_string(),
            );
            out.newline();
        }

        for warning in &self.warnings {
            out.warning(warning);
        }
        for error in &self.errors {
            out.error(error);
        }

        match &self.result {
            GenerationResult::Written(written) => self.render_written(out, written),
            GenerationResult::Preview(preview) => self.render_preview(out, preview),
            GenerationResult::Aborted => {
                out.newline();
                out.preformatted(&format!(
                    "{} error(s), nothing written",
                    self.errors.len()
                ));
            }
        }
    }
}

impl BakeReport {
    fn render_builders(&self, out: &mut dyn Output) {
        out.section(&format!(
            "Builders ({}, {} round{})",
            self.builders.len(),
            self.rounds,
            if self.rounds == 1 { "" } else { "s" }
        ));
        for builder in &self.builders {
            out.list_item(&format!("{} -> {}", builder.target, builder.output));
        }
        out.newline();
    }

    fn render_written(&self, out: &mut dyn Output, written: &WrittenResult) {
        self.render_builders(out);

        out.key_value("Generated", &written.output_dir.display().to_string());
        if written.written.is_empty() {
            out.preformatted("All files up to date");
        } else {
            out.section("Written");
            for path in &written.written {
                out.added_item(&path.display().to_string());
            }
            if written.unchanged > 0 {
                out.preformatted(&format!("{} unchanged", written.unchanged));
            }
        }

        if !written.stale.is_empty() {
            out.newline();
            out.section("No longer generated (run `smith clean`)");
            for path in &written.stale {
                out.removed_item(path);
            }
        }
    }

    fn render_preview(&self, out: &mut dyn Output, preview: &PreviewResult) {
        for file in &preview.files {
            out.divider(&file.path);
            out.preformatted(&file.content);
        }

        out.divider("Summary");
        self.render_builders(out);
        out.preformatted(&format!("{} files would be generated", preview.files.len()));
    }
}
