//! Clean operation - remove generated files that are no longer produced.

use std::path::Path;

use buildsmith_codegen::{
    Driver,
    emit::Placement,
    output::{DepsIndex, GeneratedTree, find_orphans, remove_orphans},
    pipeline::Severity,
};
use buildsmith_manifest::Manifest;
use eyre::{Context, Result, bail};

use super::messages;
use crate::reports::CleanReport;

/// Options for the clean operation.
pub struct CleanOptions<'a> {
    /// Directory containing smith.toml and `.smith/deps.json`.
    pub root: &'a Path,
    /// Whether to preview without deleting.
    pub dry_run: bool,
}

/// Execute the clean operation.
///
/// Compares the files recorded by the last bake with what the manifest
/// produces now. Files whose generated marker was removed are kept.
pub fn clean(manifest: &Manifest, opts: CleanOptions) -> Result<CleanReport> {
    let Some(mut index) = DepsIndex::load(opts.root)? else {
        return Ok(CleanReport {
            dry_run: opts.dry_run,
            recorded: false,
            warnings: Vec::new(),
            deleted: Vec::new(),
            skipped: Vec::new(),
        });
    };

    let outcome = Driver::for_manifest(manifest, Placement::Module)
        .run(manifest)
        .wrap_err("Generation failed")?;
    if outcome.has_errors() {
        bail!(
            "cannot clean while generation reports {} error(s); run `smith check`",
            outcome.error_count()
        );
    }

    let tree = GeneratedTree::new(&outcome.artifacts);
    let out_dir = opts.root.join(&index.out_dir);
    let orphans = find_orphans(&out_dir, &index, &tree);

    if !opts.dry_run && !orphans.removable.is_empty() {
        remove_orphans(&out_dir, &orphans).wrap_err("Failed to remove orphaned files")?;
        index.files.retain(|f| !orphans.removable.contains(f));
        index.save(opts.root)?;
        tracing::info!(removed = orphans.removable.len(), "cleaned orphaned files");
    }

    let display = |paths: &[std::path::PathBuf]| -> Vec<String> {
        paths
            .iter()
            .map(|p| index.out_dir.join(p).display().to_string())
            .collect()
    };

    Ok(CleanReport {
        dry_run: opts.dry_run,
        recorded: true,
        warnings: messages(&outcome.diagnostics, Severity::Warning),
        deleted: display(&orphans.removable),
        skipped: display(&orphans.modified),
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use buildsmith_manifest::parse_manifest;
    use tempfile::TempDir;

    use super::*;
    use crate::ops::bake::{BakeOptions, bake};

    const TWO_BUILDERS: &str = r#"
        [[types]]
        name = "Person"
        package = "model"
        builder = true
        properties = [{ name = "name", type = "String" }]

        [[types]]
        name = "Pet"
        package = "zoo"
        builder = true
        properties = [{ name = "species", type = "String" }]
    "#;

    fn bake_into(root: &Path, manifest: &str) {
        let manifest = parse_manifest(manifest, "smith.toml").unwrap();
        bake(
            &manifest,
            BakeOptions {
                root,
                output_dir: Path::new("gen"),
                dry_run: false,
                visualize: false,
            },
        )
        .unwrap();
    }

    fn only_person() -> Manifest {
        let content = TWO_BUILDERS.replace(
            "package = \"zoo\"\n        builder = true",
            "package = \"zoo\"\n        builder = false",
        );
        parse_manifest(&content, "smith.toml").unwrap()
    }

    #[test]
    fn test_clean_without_index() {
        let temp = TempDir::new().unwrap();
        let manifest = parse_manifest(TWO_BUILDERS, "smith.toml").unwrap();

        let report = clean(
            &manifest,
            CleanOptions {
                root: temp.path(),
                dry_run: false,
            },
        )
        .unwrap();

        assert!(!report.recorded);
        assert!(!report.has_deletions());
    }

    #[test]
    fn test_clean_removes_orphans() {
        let temp = TempDir::new().unwrap();
        bake_into(temp.path(), TWO_BUILDERS);

        let report = clean(
            &only_person(),
            CleanOptions {
                root: temp.path(),
                dry_run: false,
            },
        )
        .unwrap();

        assert!(report.deleted.iter().any(|p| p.ends_with("pet_builder.rs")));
        assert!(!temp.path().join("gen/zoo").exists());
        assert!(temp.path().join("gen/model/person_builder.rs").exists());

        let index = DepsIndex::load(temp.path()).unwrap().unwrap();
        assert!(index.files.iter().all(|f| !f.starts_with("zoo")));
    }

    #[test]
    fn test_dry_run_keeps_files() {
        let temp = TempDir::new().unwrap();
        bake_into(temp.path(), TWO_BUILDERS);

        let report = clean(
            &only_person(),
            CleanOptions {
                root: temp.path(),
                dry_run: true,
            },
        )
        .unwrap();

        assert!(report.has_deletions());
        assert!(temp.path().join("gen/zoo/pet_builder.rs").exists());
    }

    #[test]
    fn test_edited_file_is_skipped() {
        let temp = TempDir::new().unwrap();
        bake_into(temp.path(), TWO_BUILDERS);
        let pet = temp.path().join("gen/zoo/pet_builder.rs");
        fs::write(&pet, "// hand written\n").unwrap();

        let report = clean(
            &only_person(),
            CleanOptions {
                root: temp.path(),
                dry_run: false,
            },
        )
        .unwrap();

        assert!(report.skipped.iter().any(|p| p.ends_with("pet_builder.rs")));
        assert!(pet.exists());
    }
}
