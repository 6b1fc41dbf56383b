//! Bake operation - builder generation from manifest.

use std::path::{Path, PathBuf};

use buildsmith_codegen::{
    Driver,
    emit::Placement,
    output::{DEBUG_DIR, DepsIndex, GeneratedTree, STATE_DIR, find_orphans},
    pipeline::{Severity, SnapshotPlugin},
};
use buildsmith_manifest::Manifest;
use eyre::{Context, Result};

use super::messages;
use crate::reports::{
    BakeReport, BuilderLine, GenerationResult, PreviewFile, PreviewResult, WrittenResult,
};

/// Options for the bake operation.
pub struct BakeOptions<'a> {
    /// Directory containing smith.toml; `.smith/` lives here.
    pub root: &'a Path,
    /// Output directory, relative to `root`.
    pub output_dir: &'a Path,
    /// Whether to preview without writing files.
    pub dry_run: bool,
    /// Whether to output debug snapshots.
    pub visualize: bool,
}

/// Execute the bake operation.
///
/// Drives the manifest to a fixed point and writes one module per builder.
/// Nothing is written when any diagnostic is an error.
pub fn bake(manifest: &Manifest, opts: BakeOptions) -> Result<BakeReport> {
    let debug_dir = opts.root.join(STATE_DIR).join(DEBUG_DIR);

    let mut driver = Driver::for_manifest(manifest, Placement::Module);
    if opts.visualize {
        driver = driver.plugin(SnapshotPlugin::with_output_dir(&debug_dir));
    }
    let outcome = driver.run(manifest).wrap_err("Generation failed")?;

    let builders = outcome
        .artifacts
        .iter()
        .map(|a| BuilderLine {
            target: a.target.to_string(),
            output: a.output.to_string(),
        })
        .collect();
    let errors = messages(&outcome.diagnostics, Severity::Error);
    let warnings = messages(&outcome.diagnostics, Severity::Warning);
    let tree = GeneratedTree::new(&outcome.artifacts);

    let result = if !errors.is_empty() {
        GenerationResult::Aborted
    } else if opts.dry_run {
        let files = tree
            .paths()
            .map(|path| PreviewFile {
                path: opts.output_dir.join(path).display().to_string(),
                content: tree.content(path).unwrap_or_default().to_string(),
            })
            .collect();
        GenerationResult::Preview(PreviewResult { files })
    } else {
        let out_dir = opts.root.join(opts.output_dir);
        let summary = tree
            .write(&out_dir)
            .wrap_err("Failed to write generated builders")?;
        tracing::info!(
            out_dir = %out_dir.display(),
            written = summary.written.len(),
            unchanged = summary.unchanged.len(),
            "baked builders"
        );

        let stale = match DepsIndex::load(opts.root)? {
            Some(previous) => {
                let orphans = find_orphans(&out_dir, &previous, &tree);
                orphans.removable.into_iter().chain(orphans.modified).collect()
            }
            None => Vec::new(),
        };
        DepsIndex::new(opts.output_dir, &tree, outcome.dependencies())
            .save(opts.root)
            .wrap_err("Failed to record dependencies")?;

        GenerationResult::Written(WrittenResult {
            output_dir: out_dir,
            written: summary.written,
            unchanged: summary.unchanged.len(),
            stale: stale.into_iter().map(|p: PathBuf| p.display().to_string()).collect(),
        })
    };

    Ok(BakeReport {
        rounds: outcome.rounds,
        builders,
        errors,
        warnings,
        debug_dir: opts.visualize.then_some(debug_dir),
        result,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use buildsmith_manifest::parse_manifest;
    use tempfile::TempDir;

    use super::*;

    const MODEL: &str = r#"
        [[types]]
        name = "Person"
        package = "model"
        source = "src/model.rs"
        builder = true
        properties = [
            { name = "name", type = "String" },
            { name = "address", type = "Address" },
        ]

        [[types]]
        name = "Address"
        package = "model"
        properties = [{ name = "city", type = "String" }]
    "#;

    fn opts(root: &Path, dry_run: bool) -> BakeOptions<'_> {
        BakeOptions {
            root,
            output_dir: Path::new("src/generated"),
            dry_run,
            visualize: false,
        }
    }

    #[test]
    fn test_bake_writes_builders_and_index() {
        let temp = TempDir::new().unwrap();
        let manifest = parse_manifest(MODEL, "smith.toml").unwrap();

        let report = bake(&manifest, opts(temp.path(), false)).unwrap();

        assert!(!report.has_errors());
        assert_eq!(report.builders.len(), 1);
        let generated = temp.path().join("src/generated");
        assert!(generated.join("model/person_builder.rs").exists());
        assert!(generated.join("model/mod.rs").exists());
        assert!(generated.join("mod.rs").exists());

        let index = DepsIndex::load(temp.path()).unwrap().unwrap();
        assert_eq!(index.out_dir, PathBuf::from("src/generated"));
        assert_eq!(index.dependencies.len(), 1);
        assert_eq!(index.dependencies[0].output.to_string(), "model::PersonBuilder");
    }

    #[test]
    fn test_second_bake_leaves_files_unchanged() {
        let temp = TempDir::new().unwrap();
        let manifest = parse_manifest(MODEL, "smith.toml").unwrap();

        bake(&manifest, opts(temp.path(), false)).unwrap();
        let report = bake(&manifest, opts(temp.path(), false)).unwrap();

        let GenerationResult::Written(written) = report.result else {
            panic!("expected written result");
        };
        assert!(written.written.is_empty());
        assert_eq!(written.unchanged, 3);
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let manifest = parse_manifest(MODEL, "smith.toml").unwrap();

        let report = bake(&manifest, opts(temp.path(), true)).unwrap();

        let GenerationResult::Preview(preview) = report.result else {
            panic!("expected preview");
        };
        assert_eq!(preview.files.len(), 3);
        assert!(!temp.path().join("src").exists());
        assert!(!DepsIndex::path(temp.path()).exists());
    }

    #[test]
    fn test_errors_abort_generation() {
        let temp = TempDir::new().unwrap();
        let manifest = parse_manifest(
            r#"
            [[types]]
            name = "Person"
            package = "model"
            builder = true
            properties = [{ name = "home", type = "Nowhere" }]
            "#,
            "smith.toml",
        )
        .unwrap();

        let report = bake(&manifest, opts(temp.path(), false)).unwrap();

        assert!(report.has_errors());
        assert!(matches!(report.result, GenerationResult::Aborted));
        assert!(report.errors[0].contains("Nowhere"));
        assert!(!temp.path().join("src").exists());
    }

    #[test]
    fn test_removed_builder_reported_as_stale() {
        let temp = TempDir::new().unwrap();
        let manifest = parse_manifest(MODEL, "smith.toml").unwrap();
        bake(&manifest, opts(temp.path(), false)).unwrap();

        let without_builder = MODEL.replace("builder = true", "builder = false");
        let manifest = parse_manifest(&without_builder, "smith.toml").unwrap();
        let report = bake(&manifest, opts(temp.path(), false)).unwrap();

        let GenerationResult::Written(written) = report.result else {
            panic!("expected written result");
        };
        assert!(written.stale.iter().any(|p| p.ends_with("person_builder.rs")));
        assert!(fs::read_to_string(
            temp.path().join("src/generated/model/person_builder.rs")
        )
        .is_ok());
    }
}
