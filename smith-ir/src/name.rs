//! Names and provenance handles.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A package-qualified type name, e.g. `model::people::Person`.
///
/// The package is a Rust module path relative to the crate root. Ordering is
/// lexicographic by package, then simple name, which is the iteration order
/// used everywhere output order matters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QualifiedName {
    package: String,
    name: String,
}

impl QualifiedName {
    /// Create a qualified name.
    ///
    /// Returns `None` if either part is empty.
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Option<Self> {
        let package = package.into();
        let name = name.into();
        if package.is_empty() || name.is_empty() {
            return None;
        }
        Some(Self { package, name })
    }

    /// Parse `a::b::Name` into package `a::b` and name `Name`.
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.strip_prefix("crate::").unwrap_or(path);
        let (package, name) = path.rsplit_once("::")?;
        Self::new(package, name)
    }

    /// The module path.
    pub fn package(&self) -> &str {
        &self.package
    }

    /// The simple type name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// A name in the same package.
    pub fn sibling(&self, name: impl Into<String>) -> Self {
        Self {
            package: self.package.clone(),
            name: name.into(),
        }
    }

    /// Package segments, e.g. `["model", "people"]`.
    pub fn package_segments(&self) -> impl Iterator<Item = &str> {
        self.package.split("::")
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.package, self.name)
    }
}

/// Opaque handle to the file a declaration came from.
///
/// The generator never reads through it; it only records it so the host can
/// invalidate artifacts when that file changes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceLocation(String);

impl SourceLocation {
    pub fn new(location: impl Into<String>) -> Self {
        Self(location.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SourceLocation {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualified_name_rejects_empty_parts() {
        assert!(QualifiedName::new("", "Person").is_none());
        assert!(QualifiedName::new("model", "").is_none());
        assert!(QualifiedName::new("model", "Person").is_some());
    }

    #[test]
    fn test_qualified_name_parse() {
        let name = QualifiedName::parse("model::people::Person").unwrap();
        assert_eq!(name.package(), "model::people");
        assert_eq!(name.name(), "Person");

        let name = QualifiedName::parse("crate::model::Person").unwrap();
        assert_eq!(name.package(), "model");

        assert!(QualifiedName::parse("Person").is_none());
    }

    #[test]
    fn test_qualified_name_display_and_order() {
        let a = QualifiedName::new("model", "Pet").unwrap();
        let b = QualifiedName::new("model", "Person").unwrap();
        let c = QualifiedName::new("billing", "Invoice").unwrap();
        assert_eq!(a.to_string(), "model::Pet");

        let mut names = vec![a.clone(), b.clone(), c.clone()];
        names.sort();
        assert_eq!(names, vec![c, b, a]);
    }

    #[test]
    fn test_sibling_keeps_package() {
        let person = QualifiedName::new("model::people", "Person").unwrap();
        let builder = person.sibling("PersonBuilder");
        assert_eq!(builder.to_string(), "model::people::PersonBuilder");
        assert_eq!(
            builder.package_segments().collect::<Vec<_>>(),
            vec!["model", "people"]
        );
    }

    #[test]
    fn test_source_location_serializes_as_string() {
        let loc = SourceLocation::new("src/model.rs");
        assert_eq!(serde_json::to_string(&loc).unwrap(), "\"src/model.rs\"");
    }
}
