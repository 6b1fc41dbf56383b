//! Construction contracts.

use serde::{Deserialize, Serialize};

use crate::{CandidateType, Constructor, PropertyRole, QualifiedName};

/// A property that must be supplied to construct the target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContractProperty {
    pub name: String,
    pub type_signature: String,
    pub doc: Option<String>,
}

/// The ordered, fully resolved property list that drives emission.
///
/// Property order is both the setter order and the positional argument
/// order of [`Constructor::Function`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConstructionContract {
    pub target: QualifiedName,
    pub constructor: Constructor,
    pub properties: Vec<ContractProperty>,
    /// The target declares properties filled by its `Default`.
    pub has_derived: bool,
}

impl ConstructionContract {
    /// Derive the contract of a resolved candidate.
    ///
    /// Keeps exactly the constructor properties, in declaration order.
    pub fn from_candidate(candidate: &CandidateType) -> Self {
        let properties = candidate
            .properties
            .iter()
            .filter(|p| p.role == PropertyRole::Constructor)
            .map(|p| ContractProperty {
                name: p.name.clone(),
                type_signature: p.type_signature.clone(),
                doc: p.doc.clone(),
            })
            .collect();

        Self {
            target: candidate.qualified_name.clone(),
            constructor: candidate.constructor.clone(),
            properties,
            has_derived: candidate
                .properties
                .iter()
                .any(|p| p.role == PropertyRole::Derived),
        }
    }

    /// The identifier of the generated builder.
    pub fn output_name(&self) -> QualifiedName {
        self.target.sibling(format!("{}Builder", self.target.name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PropertyDescriptor, SourceLocation};

    #[test]
    fn test_contract_keeps_declaration_order() {
        let candidate = CandidateType::new(
            QualifiedName::new("model", "Order").unwrap(),
            SourceLocation::new("src/order.rs"),
        )
        .properties([
            PropertyDescriptor::new("zeta", "u8"),
            PropertyDescriptor::new("alpha", "u8"),
            PropertyDescriptor::new("mid", "u8"),
        ]);

        let contract = ConstructionContract::from_candidate(&candidate);
        let names: Vec<_> = contract.properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
        assert!(!contract.has_derived);
    }

    #[test]
    fn test_contract_skips_derived_properties() {
        let candidate = CandidateType::new(
            QualifiedName::new("model", "Account").unwrap(),
            SourceLocation::new("src/account.rs"),
        )
        .properties([
            PropertyDescriptor::new("owner", "String"),
            PropertyDescriptor::new("id", "u64").derived(),
        ]);

        let contract = ConstructionContract::from_candidate(&candidate);
        assert_eq!(contract.properties.len(), 1);
        assert!(contract.has_derived);
        assert_eq!(contract.output_name().to_string(), "model::AccountBuilder");
    }
}
