//! Clean command report data structures.

use super::output::{Output, Report};

/// Report data from cleaning orphaned files.
#[derive(Debug)]
pub struct CleanReport {
    /// Whether this was a dry run.
    pub dry_run: bool,
    /// Whether a previous bake recorded its files.
    pub recorded: bool,
    /// Warning messages from the generation run.
    pub warnings: Vec<String>,
    /// Deleted generated files.
    pub deleted: Vec<String>,
    /// Skipped files (modified by user).
    pub skipped: Vec<String>,
}

impl CleanReport {
    /// Whether any files were deleted (or would be deleted in dry run).
    pub fn has_deletions(&self) -> bool {
        !self.deleted.is_empty()
    }

    /// Whether any files were skipped.
    pub fn has_skipped(&self) -> bool {
        !self.skipped.is_empty()
    }
}

impl Report for CleanReport {
    fn render(&self, out: &mut dyn Output) {
        for warning in &self.warnings {
            out.warning(warning);
        }

        if !self.recorded {
            out.preformatted("Nothing recorded yet; run `smith bake` first.");
            return;
        }

        if !self.has_deletions() && !self.has_skipped() {
            out.preformatted("No orphaned files found.");
            return;
        }

        if self.has_deletions() {
            if self.dry_run {
                out.section("Would delete");
            } else {
                out.section("Deleted");
            }
            for path in &self.deleted {
                out.removed_item(path);
            }
        }

        if self.has_skipped() {
            out.newline();
            out.section("Skipped (modified by user)");
            for path in &self.skipped {
                out.list_item(&format!("! {}", path));
            }
        }
    }
}
