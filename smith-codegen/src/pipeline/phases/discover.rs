//! Discover phase - collects the declarations asking for a builder.

use buildsmith_ir::{CandidateType, PropertyDescriptor};
use eyre::Result;

use crate::{
    pipeline::{Phase, RoundContext},
    symbols::{Declaration, SymbolTable},
};

/// Every declaration in `table` carrying the directive, as candidates in
/// qualified-name order.
///
/// Each property is resolved against the same table, so `resolved` and
/// `sources` reflect exactly this snapshot.
pub fn discover(table: &SymbolTable) -> Vec<CandidateType> {
    table
        .annotated()
        .map(|declaration| candidate(table, declaration))
        .collect()
}

fn candidate(table: &SymbolTable, declaration: &Declaration) -> CandidateType {
    let package = declaration.name.package();
    let properties = declaration.properties.iter().map(|property| {
        let resolution = table.resolve(package, &property.type_signature);
        // `r#type` and `type` name the same property
        let name = property.name.strip_prefix("r#").unwrap_or(&property.name);
        let mut descriptor = PropertyDescriptor::new(name, &property.type_signature);
        descriptor.resolved = resolution.is_resolved();
        descriptor.role = property.role;
        descriptor.doc = property.doc.clone();
        descriptor.sources = resolution.sources;
        descriptor
    });

    CandidateType::new(declaration.name.clone(), declaration.source.clone())
        .constructor(declaration.constructor.clone())
        .properties(properties)
}

/// Phase that fills [`RoundContext::candidates`], skipping candidates an
/// earlier round already settled.
pub struct DiscoverPhase;

impl Phase for DiscoverPhase {
    fn name(&self) -> &'static str {
        "discover"
    }

    fn description(&self) -> &'static str {
        "Collect declarations carrying the builder directive"
    }

    fn run(&self, ctx: &mut RoundContext<'_>) -> Result<()> {
        for candidate in discover(ctx.table) {
            if ctx.worklist.is_settled(&candidate.qualified_name) {
                tracing::trace!(candidate = %candidate.qualified_name, "already settled");
                continue;
            }
            tracing::debug!(
                candidate = %candidate.qualified_name,
                resolved = candidate.is_resolved(),
                "discovered"
            );
            ctx.candidates.push(candidate);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use buildsmith_ir::{PropertyRole, QualifiedName, SourceLocation};

    use super::*;
    use crate::{session::Worklist, symbols::DeclaredProperty};

    fn name(path: &str) -> QualifiedName {
        QualifiedName::parse(path).unwrap()
    }

    fn table() -> SymbolTable {
        SymbolTable::new()
            .with(
                Declaration::new(name("model::Zebra"), "src/zoo.rs".into())
                    .directive()
                    .property(DeclaredProperty::new("stripes", "u16"))
                    .property(DeclaredProperty::new("keeper", "Keeper"))
                    .property(DeclaredProperty::new("id", "u64").derived()),
            )
            .with(Declaration::new(name("model::Keeper"), "src/keeper.rs".into()))
            .with(
                Declaration::new(name("model::Ant"), "src/zoo.rs".into())
                    .directive()
                    .property(DeclaredProperty::new("legs", "Legs").doc("Always six")),
            )
    }

    #[test]
    fn test_discover_filters_and_orders() {
        let candidates = discover(&table());
        let names: Vec<_> = candidates.iter().map(|c| c.qualified_name.to_string()).collect();
        assert_eq!(names, vec!["model::Ant", "model::Zebra"]);
    }

    #[test]
    fn test_discover_resolves_properties() {
        let candidates = discover(&table());

        let ant = &candidates[0];
        assert!(!ant.is_resolved());
        assert_eq!(ant.properties[0].doc.as_deref(), Some("Always six"));

        let zebra = &candidates[1];
        assert!(zebra.is_resolved());
        assert_eq!(zebra.properties[2].role, PropertyRole::Derived);
        assert!(
            zebra.properties[1]
                .sources
                .contains(&SourceLocation::new("src/keeper.rs"))
        );
    }

    #[test]
    fn test_phase_skips_settled() {
        let table = table();
        let mut worklist = Worklist::default();
        let id = worklist.track(&name("model::Ant"));
        worklist.reject(id);

        let mut ctx = RoundContext::new(2, &table, &worklist);
        DiscoverPhase.run(&mut ctx).unwrap();

        assert_eq!(ctx.candidates.len(), 1);
        assert_eq!(ctx.candidates[0].qualified_name, name("model::Zebra"));
    }
}
