//! Where round snapshots come from.

use buildsmith_ir::{BuilderArtifact, Constructor, QualifiedName, SourceLocation};
use buildsmith_manifest::Manifest;

use super::{Declaration, DeclaredProperty, SymbolTable};

/// A host-side provider of symbol table snapshots.
///
/// Each round the host exposes what it knows at that point, including the
/// builders already emitted, which become ordinary declarations without the
/// directive.
pub trait SymbolSource {
    /// Snapshot visible in `round` (1-based).
    fn snapshot(&self, round: usize, emitted: &[BuilderArtifact]) -> SymbolTable;

    /// Whether rounds after `round` expose declarations not visible in it.
    fn has_more(&self, round: usize) -> bool;
}

impl SymbolSource for Manifest {
    fn snapshot(&self, round: usize, emitted: &[BuilderArtifact]) -> SymbolTable {
        let mut table = SymbolTable::new();
        for path in &self.externs.types {
            table.add_extern(path.as_str());
        }

        for decl in self.types.iter().filter(|t| t.round <= round) {
            let Some(name) = QualifiedName::parse(&decl.qualified()) else {
                continue;
            };

            let mut declaration =
                Declaration::new(name, SourceLocation::new(self.source_of(decl)));
            declaration.directive = decl.builder;
            if let Some(function) = &decl.constructor {
                declaration.constructor = Constructor::Function(function.clone());
            }
            declaration.properties = decl
                .properties
                .iter()
                .map(|p| {
                    let mut property = DeclaredProperty::new(&p.name, &p.ty);
                    if p.derived {
                        property = property.derived();
                    }
                    if let Some(doc) = &p.doc {
                        property = property.doc(doc);
                    }
                    property
                })
                .collect();
            table.insert(declaration);
        }

        for artifact in emitted {
            if table.contains(&artifact.output) {
                continue;
            }
            let source = table
                .get(&artifact.target)
                .map(|d| d.source.clone())
                .unwrap_or_else(|| SourceLocation::new(self.origin()));
            table.insert(Declaration::new(artifact.output.clone(), source));
        }

        table
    }

    fn has_more(&self, round: usize) -> bool {
        self.last_round() > round
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use buildsmith_manifest::parse_manifest;

    use super::*;

    const MANIFEST: &str = r#"
[externs]
types = ["chrono::NaiveDate"]

[[types]]
name = "Order"
package = "shop"
source = "src/order.rs"
builder = true
constructor = "create"
properties = [
    { name = "total", type = "u64", doc = "Cents" },
    { name = "id", type = "u64", derived = true },
]

[[types]]
name = "Receipt"
package = "crate::shop"
round = 2
"#;

    #[test]
    fn test_snapshot_respects_rounds() {
        let manifest = parse_manifest(MANIFEST, "smith.toml").unwrap();

        let first = manifest.snapshot(1, &[]);
        assert_eq!(first.len(), 1);
        assert!(manifest.has_more(1));

        let second = manifest.snapshot(2, &[]);
        assert_eq!(second.len(), 2);
        let receipt = second
            .get(&QualifiedName::parse("shop::Receipt").unwrap())
            .unwrap();
        assert_eq!(receipt.source.as_str(), "smith.toml");
        assert!(!receipt.directive);
        assert!(!manifest.has_more(2));
    }

    #[test]
    fn test_snapshot_carries_declaration_details() {
        let manifest = parse_manifest(MANIFEST, "smith.toml").unwrap();
        let table = manifest.snapshot(1, &[]);
        let order = table.get(&QualifiedName::parse("shop::Order").unwrap()).unwrap();

        assert!(order.directive);
        assert_eq!(order.constructor, Constructor::Function("create".into()));
        assert_eq!(order.properties[0].doc.as_deref(), Some("Cents"));
        assert_eq!(order.properties[1].role, buildsmith_ir::PropertyRole::Derived);
        assert!(table.resolve("shop", "NaiveDate").is_resolved());
    }

    #[test]
    fn test_emitted_builders_become_declarations() {
        let manifest = parse_manifest(MANIFEST, "smith.toml").unwrap();
        let artifact = BuilderArtifact {
            output: QualifiedName::parse("shop::OrderBuilder").unwrap(),
            target: QualifiedName::parse("shop::Order").unwrap(),
            source_text: String::new(),
            depends_on: BTreeSet::new(),
        };

        let table = manifest.snapshot(1, &[artifact]);
        let builder = table
            .get(&QualifiedName::parse("shop::OrderBuilder").unwrap())
            .unwrap();
        assert!(!builder.directive);
        assert_eq!(builder.source.as_str(), "src/order.rs");
    }
}
