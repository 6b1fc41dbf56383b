//! Writing artifacts to disk.
//!
//! Each builder lands at `<out>/<package dirs>/<snake>_builder.rs`, every
//! package directory gets a `mod.rs`, and the host records what it wrote in
//! `.smith/deps.json` so a later `clean` can find files that are no longer
//! produced.

use std::{
    collections::{BTreeMap, BTreeSet},
    fs,
    path::{Path, PathBuf},
};

use buildsmith_core::{File, GENERATED_MARKER, WriteResult, is_generated, to_snake_case};
use buildsmith_ir::{BuilderArtifact, DependencyDeclaration};
use eyre::{Result, WrapErr};
use serde::{Deserialize, Serialize};

/// Directory, relative to the manifest, holding buildsmith's own state.
pub const STATE_DIR: &str = ".smith";

/// Per-phase snapshots written by `--visualize`, under [`STATE_DIR`].
pub const DEBUG_DIR: &str = "debug";

const DEPS_INDEX: &str = "deps.json";
const INDEX_VERSION: u32 = 1;

/// Path of an artifact's file, relative to the output directory.
pub fn artifact_path(artifact: &BuilderArtifact) -> PathBuf {
    let mut path: PathBuf = artifact.output.package_segments().collect();
    path.push(format!("{}.rs", to_snake_case(artifact.output.name())));
    path
}

/// Every file generated for a set of artifacts, keyed by relative path.
#[derive(Debug, Clone, Default)]
pub struct GeneratedTree {
    files: BTreeMap<PathBuf, String>,
}

#[derive(Debug, Default)]
struct ModuleEntries {
    modules: BTreeSet<String>,
    exports: BTreeSet<(String, String)>,
}

impl GeneratedTree {
    /// Lay out the artifacts plus a `mod.rs` for every directory on the way.
    pub fn new(artifacts: &[BuilderArtifact]) -> Self {
        let mut files = BTreeMap::new();
        let mut modules: BTreeMap<PathBuf, ModuleEntries> = BTreeMap::new();

        for artifact in artifacts {
            let path = artifact_path(artifact);
            let segments: Vec<&str> = artifact.output.package_segments().collect();

            let mut dir = PathBuf::new();
            for segment in &segments {
                modules
                    .entry(dir.clone())
                    .or_default()
                    .modules
                    .insert(segment.to_string());
                dir.push(segment);
            }

            let stem = to_snake_case(artifact.output.name());
            let entries = modules.entry(dir).or_default();
            entries.modules.insert(stem.clone());
            entries
                .exports
                .insert((stem, artifact.output.name().to_string()));

            files.insert(path, artifact.source_text.clone());
        }

        for (dir, entries) in modules {
            files.insert(dir.join("mod.rs"), render_mod(&entries));
        }

        Self { files }
    }

    /// Relative paths in sorted order.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.files.keys().map(PathBuf::as_path)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    pub fn content(&self, path: &Path) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Write every file under `out_dir`, leaving identical files untouched.
    pub fn write(&self, out_dir: &Path) -> Result<WriteSummary> {
        let mut summary = WriteSummary::default();
        for (path, content) in &self.files {
            let full = out_dir.join(path);
            let result = File::new(&full, content.as_str())
                .write()
                .wrap_err_with(|| format!("Failed to write {}", full.display()))?;
            match result {
                WriteResult::Written => summary.written.push(path.clone()),
                WriteResult::Unchanged => summary.unchanged.push(path.clone()),
            }
        }
        tracing::debug!(
            written = summary.written.len(),
            unchanged = summary.unchanged.len(),
            "wrote generated tree"
        );
        Ok(summary)
    }
}

fn render_mod(entries: &ModuleEntries) -> String {
    let mut out = format!("{GENERATED_MARKER}. Do not edit.\n\n");
    for module in &entries.modules {
        out.push_str(&format!("pub mod {module};\n"));
    }
    if !entries.exports.is_empty() {
        out.push('\n');
        for (module, name) in &entries.exports {
            out.push_str(&format!("pub use {module}::{name};\n"));
        }
    }
    out
}

/// Relative paths touched by [`GeneratedTree::write`].
#[derive(Debug, Clone, Default)]
pub struct WriteSummary {
    pub written: Vec<PathBuf>,
    pub unchanged: Vec<PathBuf>,
}

/// Record of the last generation, stored at `.smith/deps.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepsIndex {
    pub version: u32,
    /// Output directory, relative to the manifest directory.
    pub out_dir: PathBuf,
    /// Generated files, relative to `out_dir`.
    pub files: Vec<PathBuf>,
    pub dependencies: Vec<DependencyDeclaration>,
}

impl DepsIndex {
    pub fn new(
        out_dir: impl Into<PathBuf>,
        tree: &GeneratedTree,
        dependencies: Vec<DependencyDeclaration>,
    ) -> Self {
        Self {
            version: INDEX_VERSION,
            out_dir: out_dir.into(),
            files: tree.paths().map(Path::to_path_buf).collect(),
            dependencies,
        }
    }

    /// `<root>/.smith/deps.json`
    pub fn path(root: &Path) -> PathBuf {
        root.join(STATE_DIR).join(DEPS_INDEX)
    }

    /// Load the index under `root`, or `None` if nothing was generated yet.
    pub fn load(root: &Path) -> Result<Option<Self>> {
        let path = Self::path(root);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)
            .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
        let index = serde_json::from_str(&content)
            .wrap_err_with(|| format!("Failed to parse {}", path.display()))?;
        Ok(Some(index))
    }

    pub fn save(&self, root: &Path) -> Result<WriteResult> {
        let json = serde_json::to_string_pretty(self)?;
        File::new(Self::path(root), json).write()
    }
}

/// Files a previous run generated that the current run no longer produces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Orphans {
    /// Still carrying the generated marker; safe to delete.
    pub removable: Vec<PathBuf>,
    /// Edited by hand since generation; kept.
    pub modified: Vec<PathBuf>,
}

impl Orphans {
    pub fn is_empty(&self) -> bool {
        self.removable.is_empty() && self.modified.is_empty()
    }
}

/// Compare the files recorded in `previous` with `current`. Paths are
/// relative to `out_dir`; files already gone are ignored.
pub fn find_orphans(out_dir: &Path, previous: &DepsIndex, current: &GeneratedTree) -> Orphans {
    let mut orphans = Orphans::default();
    for path in previous.files.iter().filter(|p| !current.contains(p)) {
        let full = out_dir.join(path);
        if !full.exists() {
            continue;
        }
        if is_generated(&full) {
            orphans.removable.push(path.clone());
        } else {
            orphans.modified.push(path.clone());
        }
    }
    orphans
}

/// Delete the removable orphans, then any directories left empty.
pub fn remove_orphans(out_dir: &Path, orphans: &Orphans) -> Result<()> {
    for path in &orphans.removable {
        let full = out_dir.join(path);
        fs::remove_file(&full).wrap_err_with(|| format!("Failed to remove {}", full.display()))?;
        tracing::debug!(path = %full.display(), "removed orphan");

        let mut dir = full.parent();
        while let Some(current) = dir {
            if current == out_dir || fs::remove_dir(current).is_err() {
                break;
            }
            dir = current.parent();
        }
    }
    Ok(())
}
