//! Discovered declarations.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{QualifiedName, SourceLocation};

/// How the original type is instantiated by a generated `build`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "function", rename_all = "snake_case")]
pub enum Constructor {
    /// Struct literal: `Person { name, age }`.
    #[default]
    Literal,
    /// Associated function taking the properties positionally:
    /// `Person::new(name, age)`.
    Function(String),
}

/// Whether a property is supplied through the builder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyRole {
    /// Part of the primary construction; gets a slot and a setter.
    #[default]
    Constructor,
    /// Declared on the type but filled from its `Default` implementation.
    Derived,
}

/// One declared property of a candidate type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDescriptor {
    /// Property name, a valid Rust identifier.
    pub name: String,
    /// The declared type as written. Only compared and rendered.
    pub type_signature: String,
    /// Whether every type named by the signature is known this round.
    pub resolved: bool,
    pub role: PropertyRole,
    pub doc: Option<String>,
    /// Files of the declarations the signature referred to.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub sources: BTreeSet<SourceLocation>,
}

impl PropertyDescriptor {
    /// Create a resolved constructor property.
    pub fn new(name: impl Into<String>, type_signature: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_signature: type_signature.into(),
            resolved: true,
            role: PropertyRole::Constructor,
            doc: None,
            sources: BTreeSet::new(),
        }
    }

    pub fn unresolved(mut self) -> Self {
        self.resolved = false;
        self
    }

    pub fn derived(mut self) -> Self {
        self.role = PropertyRole::Derived;
        self
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn source(mut self, source: SourceLocation) -> Self {
        self.sources.insert(source);
        self
    }

    pub fn is_constructor(&self) -> bool {
        self.role == PropertyRole::Constructor
    }
}

/// A declaration carrying the generation directive, as seen in one round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateType {
    pub qualified_name: QualifiedName,
    pub source: SourceLocation,
    pub constructor: Constructor,
    /// Declaration order is significant and preserved.
    pub properties: Vec<PropertyDescriptor>,
}

impl CandidateType {
    pub fn new(qualified_name: QualifiedName, source: SourceLocation) -> Self {
        Self {
            qualified_name,
            source,
            constructor: Constructor::Literal,
            properties: Vec::new(),
        }
    }

    pub fn constructor(mut self, constructor: Constructor) -> Self {
        self.constructor = constructor;
        self
    }

    pub fn property(mut self, property: PropertyDescriptor) -> Self {
        self.properties.push(property);
        self
    }

    pub fn properties(mut self, properties: impl IntoIterator<Item = PropertyDescriptor>) -> Self {
        self.properties.extend(properties);
        self
    }

    /// True when every property's type is known this round.
    pub fn is_resolved(&self) -> bool {
        self.properties.iter().all(|p| p.resolved)
    }

    /// Names of the properties that keep this candidate from resolving.
    pub fn unresolved_properties(&self) -> impl Iterator<Item = &PropertyDescriptor> {
        self.properties.iter().filter(|p| !p.resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person() -> CandidateType {
        CandidateType::new(
            QualifiedName::new("model", "Person").unwrap(),
            SourceLocation::new("src/model.rs"),
        )
        .property(PropertyDescriptor::new("name", "String"))
        .property(PropertyDescriptor::new("age", "u32"))
    }

    #[test]
    fn test_single_unresolved_property_unresolves_candidate() {
        let candidate = person().property(PropertyDescriptor::new("owner", "Owner").unresolved());
        assert!(!candidate.is_resolved());
        let names: Vec<_> = candidate
            .unresolved_properties()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["owner"]);
    }

    #[test]
    fn test_zero_properties_is_resolved() {
        let candidate = CandidateType::new(
            QualifiedName::new("model", "Marker").unwrap(),
            SourceLocation::new("src/model.rs"),
        );
        assert!(candidate.is_resolved());
    }
}
