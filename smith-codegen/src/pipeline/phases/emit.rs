//! Emit phase - renders builders and guards output names.

use std::collections::HashSet;

use buildsmith_ir::ConstructionContract;
use eyre::Result;

use crate::{
    emit::{EmitOptions, Placement, RustEmitter},
    pipeline::{Diagnostic, Emitted, Phase, RoundContext, codes},
    session::Worklist,
    symbols::SymbolTable,
};

/// Phase that renders one builder per contract.
///
/// A builder whose name is already declared in the table, or already
/// produced by this session, is not emitted.
pub struct EmitPhase {
    emitter: RustEmitter,
}

impl EmitPhase {
    pub fn new(options: EmitOptions) -> Self {
        Self {
            emitter: RustEmitter::new(options),
        }
    }
}

impl Phase for EmitPhase {
    fn name(&self) -> &'static str {
        "emit"
    }

    fn description(&self) -> &'static str {
        "Render builder source for each contract"
    }

    fn run(&self, ctx: &mut RoundContext<'_>) -> Result<()> {
        let mut claimed = HashSet::new();
        let mut collisions = Vec::new();

        for extracted in &ctx.contracts {
            let target = &extracted.contract.target;
            let output = extracted.contract.output_name();

            let collision = if ctx.worklist.has_claimed(&output) || claimed.contains(&output) {
                Some(format!("'{output}' is already produced by another builder"))
            } else if ctx.table.contains(&output) {
                Some(format!("'{output}' is already declared"))
            } else {
                None
            };

            if let Some(reason) = collision {
                collisions.push((
                    target.clone(),
                    Diagnostic::error("emit", format!("cannot emit builder for '{target}': {reason}"))
                        .code(codes::DUPLICATE_OUTPUT_IDENTIFIER),
                ));
                continue;
            }

            let artifact = match self.emitter.options().placement {
                Placement::Inline => self.emitter.emit(&extracted.contract),
                Placement::Module => self.emitter.emit(&module_contract(
                    ctx.table,
                    ctx.worklist,
                    &extracted.contract,
                )),
            };
            tracing::debug!(output = %artifact.output, bytes = artifact.source_text.len(), "emitted");
            claimed.insert(output);
            ctx.emitted.push(Emitted {
                candidate: extracted.candidate.clone(),
                artifact,
            });
        }

        for (target, diagnostic) in collisions {
            ctx.reject(&target, diagnostic);
        }
        Ok(())
    }
}

/// `contract` with its type paths spelled to resolve from the builder's own
/// module file, `<out>/<package dirs>/<snake>_builder.rs`.
///
/// Builders emitted earlier live in the generated tree, so they are reached
/// through `super::` from the file's module; everything else is reached from
/// `crate::`.
fn module_contract(
    table: &SymbolTable,
    worklist: &Worklist,
    contract: &ConstructionContract,
) -> ConstructionContract {
    let package = contract.target.package();
    let tree_root = "super::".repeat(contract.target.package_segments().count() + 1);
    let locate = |name: &buildsmith_ir::QualifiedName| {
        if worklist.has_claimed(name) {
            format!("{tree_root}{name}")
        } else {
            format!("crate::{name}")
        }
    };

    let mut contract = contract.clone();
    for property in &mut contract.properties {
        property.type_signature =
            table.absolute_signature(package, &property.type_signature, locate);
    }
    contract
}

#[cfg(test)]
mod tests {
    use buildsmith_ir::{CandidateType, PropertyDescriptor, QualifiedName, SourceLocation};

    use super::*;
    use crate::{
        pipeline::Extracted,
        session::Worklist,
        symbols::{Declaration, SymbolTable},
    };

    fn extracted(name: &str) -> Extracted {
        let candidate = CandidateType::new(
            QualifiedName::parse(name).unwrap(),
            SourceLocation::new("src/lib.rs"),
        );
        let contract = ConstructionContract::from_candidate(&candidate);
        Extracted {
            candidate,
            contract,
        }
    }

    #[test]
    fn test_emits_one_artifact_per_contract() {
        let table = SymbolTable::new();
        let worklist = Worklist::default();
        let mut ctx = RoundContext::new(1, &table, &worklist);
        ctx.contracts = vec![extracted("m::A"), extracted("m::B")];

        EmitPhase::new(EmitOptions::default()).run(&mut ctx).unwrap();

        let outputs: Vec<_> = ctx.emitted.iter().map(|e| e.artifact.output.to_string()).collect();
        assert_eq!(outputs, vec!["m::ABuilder", "m::BBuilder"]);
        assert!(ctx.diagnostics.is_empty());
    }

    #[test]
    fn test_declared_output_name_is_a_collision() {
        let table = SymbolTable::new().with(Declaration::new(
            QualifiedName::parse("m::ABuilder").unwrap(),
            "src/handwritten.rs".into(),
        ));
        let worklist = Worklist::default();
        let mut ctx = RoundContext::new(1, &table, &worklist);
        ctx.contracts = vec![extracted("m::A")];

        EmitPhase::new(EmitOptions::default()).run(&mut ctx).unwrap();

        assert!(ctx.emitted.is_empty());
        assert_eq!(ctx.rejected, vec![QualifiedName::parse("m::A").unwrap()]);
        let diagnostic = &ctx.diagnostics[0];
        assert_eq!(diagnostic.code, Some(codes::DUPLICATE_OUTPUT_IDENTIFIER));
        assert!(diagnostic.message.contains("already declared"));
    }

    #[test]
    fn test_output_claimed_in_earlier_round_is_a_collision() {
        let table = SymbolTable::new();
        let mut worklist = Worklist::default();
        let id = worklist.track(&QualifiedName::parse("m::Other").unwrap());
        worklist.emit(id, QualifiedName::parse("m::ABuilder").unwrap());
        let mut ctx = RoundContext::new(2, &table, &worklist);
        ctx.contracts = vec![extracted("m::A")];

        EmitPhase::new(EmitOptions::default()).run(&mut ctx).unwrap();

        assert!(ctx.emitted.is_empty());
        assert!(ctx.diagnostics[0].message.contains("already produced"));
    }

    #[test]
    fn test_module_placement_spells_paths_from_the_generated_file() {
        let name = |path: &str| QualifiedName::parse(path).unwrap();
        let mut table = SymbolTable::new()
            .with(Declaration::new(name("model::Address"), "src/address.rs".into()))
            .with(Declaration::new(name("model::people::Pet"), "src/pet.rs".into()))
            .with(Declaration::new(name("model::people::PetBuilder"), "src/pet.rs".into()));
        table.add_extern("chrono::NaiveDate");
        let mut worklist = Worklist::default();
        let id = worklist.track(&name("model::people::Pet"));
        worklist.emit(id, name("model::people::PetBuilder"));

        let candidate = CandidateType::new(name("model::people::Person"), "src/person.rs".into())
            .properties([
                PropertyDescriptor::new("home", "super::Address"),
                PropertyDescriptor::new("pets", "Vec<Pet>"),
                PropertyDescriptor::new("next", "Option<PetBuilder>"),
                PropertyDescriptor::new("born", "NaiveDate"),
            ]);
        let contract = ConstructionContract::from_candidate(&candidate);
        let mut ctx = RoundContext::new(2, &table, &worklist);
        ctx.contracts = vec![Extracted {
            candidate,
            contract,
        }];

        EmitPhase::new(EmitOptions::default().placement(Placement::Module))
            .run(&mut ctx)
            .unwrap();

        let text = &ctx.emitted[0].artifact.source_text;
        assert!(text.contains("home: ::core::option::Option<crate::model::Address>,"));
        assert!(text.contains("pets: ::core::option::Option<Vec<crate::model::people::Pet>>,"));
        assert!(text.contains(
            "next: ::core::option::Option<Option<super::super::super::model::people::PetBuilder>>,"
        ));
        assert!(text.contains("born: ::core::option::Option<::chrono::NaiveDate>,"));
        assert!(!text.contains("super::Address"));
    }

    #[test]
    fn test_inline_placement_keeps_signatures_as_written() {
        let name = |path: &str| QualifiedName::parse(path).unwrap();
        let table = SymbolTable::new()
            .with(Declaration::new(name("model::Address"), "src/address.rs".into()));
        let worklist = Worklist::default();
        let candidate = CandidateType::new(name("model::people::Person"), "src/person.rs".into())
            .property(PropertyDescriptor::new("home", "super::Address"));
        let contract = ConstructionContract::from_candidate(&candidate);
        let mut ctx = RoundContext::new(1, &table, &worklist);
        ctx.contracts = vec![Extracted {
            candidate,
            contract,
        }];

        EmitPhase::new(EmitOptions::default()).run(&mut ctx).unwrap();

        let text = &ctx.emitted[0].artifact.source_text;
        assert!(text.contains("home: ::core::option::Option<super::Address>,"));
    }
}
