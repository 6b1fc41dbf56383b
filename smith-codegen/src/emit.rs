//! Builder source rendering.
//!
//! Generated code names every std item by absolute path
//! (`::core::option::Option`) so it compiles whatever the surrounding
//! module imports or shadows.

use std::collections::BTreeSet;

use buildsmith_core::{GENERATED_MARKER, escape_ident};
use buildsmith_ir::{BuilderArtifact, ConstructionContract, Constructor, ContractProperty};
use buildsmith_manifest::DEFAULT_RUNTIME;

use crate::{
    builder::CodeBuilder,
    rust::{Field, Fn, Impl, Param, Struct},
};

const OPTION: &str = "::core::option::Option";
const RESULT: &str = "::core::result::Result";
const DEFAULT: &str = "::core::default::Default::default()";

/// Where the generated text is meant to live.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Placement {
    /// `include!`d into the module declaring the target type.
    #[default]
    Inline,
    /// A standalone module file; the target's module is glob-imported.
    Module,
}

/// Emitter configuration. Output is a pure function of the contract and
/// these options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    /// Path of the runtime crate as seen from generated code.
    pub runtime: String,
    pub placement: Placement,
}

impl EmitOptions {
    pub fn new(runtime: impl Into<String>) -> Self {
        Self {
            runtime: runtime.into(),
            placement: Placement::Inline,
        }
    }

    pub fn placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self::new(DEFAULT_RUNTIME)
    }
}

/// Renders a [`ConstructionContract`] as a Rust builder.
///
/// For `Person { name: String, age: u32 }` the output is a `PersonBuilder`
/// with an `Option` slot per property, `new`, one by-value setter per
/// property and a fail-fast `build`.
#[derive(Debug, Clone, Default)]
pub struct RustEmitter {
    options: EmitOptions,
}

impl RustEmitter {
    pub fn new(options: EmitOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &EmitOptions {
        &self.options
    }

    /// Render the builder for `contract`. `depends_on` is left empty for the
    /// record phase to fill.
    pub fn emit(&self, contract: &ConstructionContract) -> BuilderArtifact {
        let output = contract.output_name();
        let idents: Vec<String> = contract
            .properties
            .iter()
            .map(|p| escape_ident(&p.name))
            .collect();

        let header = CodeBuilder::rust()
            .line(&format!(
                "{GENERATED_MARKER} from `{}`. Do not edit.",
                contract.target
            ))
            .blank()
            .when(self.options.placement == Placement::Module, |b| {
                b.line("#[allow(unused_imports)]")
                    .line(&format!("use crate::{}::*;", contract.target.package()))
                    .blank()
            });

        let code = self.slots(contract, &idents).render(header).blank();
        let source_text = self.methods(contract, &idents).render(code).build();

        BuilderArtifact {
            output,
            target: contract.target.clone(),
            source_text,
            depends_on: BTreeSet::new(),
        }
    }

    fn slots(&self, contract: &ConstructionContract, idents: &[String]) -> Struct {
        let output = contract.output_name();
        contract.properties.iter().zip(idents).fold(
            Struct::new(output.name())
                .doc(format!("Builder for [`{}`].", contract.target.name()))
                .derive("Default")
                .attr("must_use"),
            |s, (property, ident)| {
                s.field(
                    Field::new(ident, format!("{OPTION}<{}>", property.type_signature)).private(),
                )
            },
        )
    }

    fn methods(&self, contract: &ConstructionContract, idents: &[String]) -> Impl {
        let output = contract.output_name();
        let new = Fn::new("new")
            .doc("Create a builder with every property unset.")
            .returns("Self")
            .body_line("Self::default()");

        let setters = contract
            .properties
            .iter()
            .zip(idents)
            .map(|(property, ident)| setter(property, ident));

        setters
            .fold(Impl::new(output.name()).method(new), Impl::method)
            .method(self.build_fn(contract, idents))
    }

    fn build_fn(&self, contract: &ConstructionContract, idents: &[String]) -> Fn {
        let target = contract.target.name();
        let error = format!("{}::MissingRequiredValue", self.options.runtime);

        let checks = contract
            .properties
            .iter()
            .zip(idents)
            .fold(CodeBuilder::rust(), |b, (property, ident)| {
                b.block_with_close(
                    &format!("let {OPTION}::Some({ident}) = self.{ident} else {{"),
                    "};",
                    |b| {
                        b.line(&format!(
                            "return {RESULT}::Err({error}::new({target:?}, {:?}));",
                            property.name
                        ))
                    },
                )
            })
            .build();

        let value = match &contract.constructor {
            Constructor::Function(function) => {
                format!("{target}::{}({})", escape_ident(function), idents.join(", "))
            }
            Constructor::Literal => {
                let mut fields = idents.to_vec();
                if contract.has_derived {
                    fields.push(format!("..{DEFAULT}"));
                }
                if fields.is_empty() {
                    format!("{target} {{}}")
                } else {
                    format!("{target} {{ {} }}", fields.join(", "))
                }
            }
        };

        Fn::new("build")
            .doc(format!(
                "Build the [`{target}`], failing on the first unset property."
            ))
            .param(Param::receiver("self"))
            .returns(format!("{RESULT}<{target}, {error}>"))
            .body(checks)
            .body_line(format!("{RESULT}::Ok({value})"))
    }
}

fn setter(property: &ContractProperty, ident: &str) -> Fn {
    let doc = property
        .doc
        .clone()
        .unwrap_or_else(|| format!("Set `{}`.", property.name));

    Fn::new(ident)
        .doc(doc)
        .param(Param::receiver("mut self"))
        .param(Param::new("value", &property.type_signature))
        .returns("Self")
        .body_line(format!("self.{ident} = {OPTION}::Some(value);"))
        .body_line("self")
}

#[cfg(test)]
mod tests {
    use buildsmith_ir::{CandidateType, PropertyDescriptor, QualifiedName, SourceLocation};

    use super::*;

    fn contract(name: &str, properties: Vec<PropertyDescriptor>) -> ConstructionContract {
        let candidate = CandidateType::new(
            QualifiedName::parse(name).unwrap(),
            SourceLocation::new("src/model.rs"),
        )
        .properties(properties);
        ConstructionContract::from_candidate(&candidate)
    }

    fn person() -> ConstructionContract {
        contract(
            "model::Person",
            vec![
                PropertyDescriptor::new("name", "String").doc("Display name"),
                PropertyDescriptor::new("age", "u32"),
            ],
        )
    }

    #[test]
    fn test_emit_is_deterministic() {
        let emitter = RustEmitter::default();
        let first = emitter.emit(&person());
        let second = emitter.emit(&person());
        assert_eq!(first.source_text, second.source_text);
        assert_eq!(first.output.to_string(), "model::PersonBuilder");
        assert!(first.depends_on.is_empty());
    }

    #[test]
    fn test_emit_marker_and_setters() {
        let text = RustEmitter::default().emit(&person()).source_text;
        assert!(text.starts_with("// @generated by buildsmith from `model::Person`. Do not edit.\n"));
        assert!(text.contains("    /// Display name\n    pub fn name(mut self, value: String) -> Self {"));
        assert!(text.contains("    /// Set `age`.\n    pub fn age(mut self, value: u32) -> Self {"));
        assert!(text.contains("::core::result::Result::Ok(Person { name, age })"));
        assert!(!text.contains("use crate::"));
    }

    #[test]
    fn test_build_checks_in_declaration_order() {
        let text = RustEmitter::default().emit(&person()).source_text;
        let name = text.find("MissingRequiredValue::new(\"Person\", \"name\")").unwrap();
        let age = text.find("MissingRequiredValue::new(\"Person\", \"age\")").unwrap();
        assert!(name < age);
    }

    #[test]
    fn test_keyword_property_is_raw() {
        let text = RustEmitter::default()
            .emit(&contract("model::Token", vec![PropertyDescriptor::new("type", "u8")]))
            .source_text;
        assert!(text.contains("    r#type: ::core::option::Option<u8>,"));
        assert!(text.contains("pub fn r#type(mut self, value: u8) -> Self {"));
        assert!(text.contains("let ::core::option::Option::Some(r#type) = self.r#type else {"));
        assert!(text.contains("MissingRequiredValue::new(\"Token\", \"type\")"));
        assert!(text.contains("Ok(Token { r#type })"));
    }

    #[test]
    fn test_positional_constructor() {
        let mut pet = contract(
            "zoo::Pet",
            vec![
                PropertyDescriptor::new("species", "String"),
                PropertyDescriptor::new("legs", "u8"),
            ],
        );
        pet.constructor = Constructor::Function("new".to_string());
        let text = RustEmitter::default().emit(&pet).source_text;
        assert!(text.contains("::core::result::Result::Ok(Pet::new(species, legs))"));
    }

    #[test]
    fn test_derived_properties_use_default() {
        let text = RustEmitter::default()
            .emit(&contract(
                "bank::Account",
                vec![
                    PropertyDescriptor::new("owner", "String"),
                    PropertyDescriptor::new("id", "u64").derived(),
                ],
            ))
            .source_text;
        assert!(!text.contains("id:"));
        assert!(text.contains("Ok(Account { owner, ..::core::default::Default::default() })"));
    }

    #[test]
    fn test_zero_properties() {
        let text = RustEmitter::default()
            .emit(&contract("model::Marker", vec![]))
            .source_text;
        assert!(text.contains("pub struct MarkerBuilder {}"));
        assert!(text.contains("::core::result::Result::Ok(Marker {})"));
        assert!(!text.contains("else {"));
    }

    #[test]
    fn test_module_placement_and_runtime() {
        let emitter = RustEmitter::new(
            EmitOptions::new("crate::runtime").placement(Placement::Module),
        );
        let text = emitter.emit(&person()).source_text;
        assert!(text.contains("#[allow(unused_imports)]\nuse crate::model::*;\n"));
        assert!(text.contains("-> ::core::result::Result<Person, crate::runtime::MissingRequiredValue> {"));
    }
}
