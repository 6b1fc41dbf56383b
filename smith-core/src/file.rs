use std::path::{Path, PathBuf};

use eyre::Result;

/// First line of every file buildsmith writes.
///
/// `clean` only deletes files that still start with this marker.
pub const GENERATED_MARKER: &str = "// @generated by buildsmith";

/// Result of a write operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written
    Written,
    /// File already had the exact content, left untouched so its mtime
    /// stays stable for incremental builds
    Unchanged,
}

/// A file to be written
#[derive(Debug, Clone)]
pub struct File {
    path: PathBuf,
    content: String,
}

impl File {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the file content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Check if the file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Write the file unless it already holds the same content.
    pub fn write(&self) -> Result<WriteResult> {
        if self.exists() && std::fs::read_to_string(&self.path)? == self.content {
            return Ok(WriteResult::Unchanged);
        }
        write_file(&self.path, &self.content)?;
        Ok(WriteResult::Written)
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}

/// Check whether the file at `path` still carries the generated marker.
///
/// Returns `false` for missing or unreadable files.
pub fn is_generated(path: &Path) -> bool {
    std::fs::read_to_string(path)
        .map(|content| content.starts_with(GENERATED_MARKER))
        .unwrap_or(false)
}
