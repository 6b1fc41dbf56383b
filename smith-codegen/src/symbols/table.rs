//! Declarations and the per-round symbol table.

use std::collections::{BTreeMap, BTreeSet};

use buildsmith_ir::{Constructor, PropertyRole, QualifiedName, SourceLocation};

use super::resolve::{self, Resolution};

/// One property of a declared type, as the host sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredProperty {
    pub name: String,
    pub type_signature: String,
    pub role: PropertyRole,
    pub doc: Option<String>,
}

impl DeclaredProperty {
    pub fn new(name: impl Into<String>, type_signature: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_signature: type_signature.into(),
            role: PropertyRole::Constructor,
            doc: None,
        }
    }

    pub fn derived(mut self) -> Self {
        self.role = PropertyRole::Derived;
        self
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }
}

/// A type declaration visible to the generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub name: QualifiedName,
    pub source: SourceLocation,
    /// Whether the declaration asks for a builder.
    pub directive: bool,
    pub constructor: Constructor,
    pub properties: Vec<DeclaredProperty>,
}

impl Declaration {
    pub fn new(name: QualifiedName, source: SourceLocation) -> Self {
        Self {
            name,
            source,
            directive: false,
            constructor: Constructor::Literal,
            properties: Vec::new(),
        }
    }

    /// Mark the declaration with the generation directive.
    pub fn directive(mut self) -> Self {
        self.directive = true;
        self
    }

    pub fn constructor(mut self, constructor: Constructor) -> Self {
        self.constructor = constructor;
        self
    }

    pub fn property(mut self, property: DeclaredProperty) -> Self {
        self.properties.push(property);
        self
    }
}

/// Read-only view of every declaration visible in one round.
///
/// Iteration is ordered by qualified name, so everything derived from a
/// table is deterministic.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    declarations: BTreeMap<QualifiedName, Declaration>,
    externs: BTreeSet<String>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a declaration, returning the one it replaced.
    pub fn insert(&mut self, declaration: Declaration) -> Option<Declaration> {
        self.declarations
            .insert(declaration.name.clone(), declaration)
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, declaration: Declaration) -> Self {
        self.insert(declaration);
        self
    }

    /// Register a type path known to the host but not declared in the table.
    pub fn add_extern(&mut self, path: impl Into<String>) {
        let path = path.into();
        let path = path.strip_prefix("::").map(str::to_string).unwrap_or(path);
        self.externs.insert(path);
    }

    pub fn get(&self, name: &QualifiedName) -> Option<&Declaration> {
        self.declarations.get(name)
    }

    pub fn contains(&self, name: &QualifiedName) -> bool {
        self.declarations.contains_key(name)
    }

    /// All declarations in qualified-name order.
    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations.values()
    }

    /// Declarations carrying the generation directive, in qualified-name order.
    pub fn annotated(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations().filter(|d| d.directive)
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Check that every type named by `signature` is known, as seen from
    /// `package`.
    pub fn resolve(&self, package: &str, signature: &str) -> Resolution {
        let mut resolution = Resolution::default();
        for path in resolve::type_paths(signature) {
            match self.lookup(package, path) {
                Lookup::Builtin | Lookup::Extern(_) => {}
                Lookup::Declared(declaration) => {
                    resolution.sources.insert(declaration.source.clone());
                }
                Lookup::Unknown => resolution.unknown.push(path.to_string()),
            }
        }
        resolution
    }

    /// Rewrite `signature` so every type path it names resolves from any
    /// module of the crate.
    ///
    /// Declarations are spelled by `locate`, externs by their registered
    /// path. Prelude names, `std` paths, paths already starting with `::`
    /// and unknown paths are kept as written.
    pub fn absolute_signature(
        &self,
        package: &str,
        signature: &str,
        locate: impl Fn(&QualifiedName) -> String,
    ) -> String {
        let mut out = String::with_capacity(signature.len());
        let mut cursor = 0;
        for (start, path) in resolve::type_path_spans(signature) {
            if signature[..start].ends_with("::") {
                continue;
            }
            let absolute = match self.lookup(package, path) {
                Lookup::Declared(declaration) => locate(&declaration.name),
                Lookup::Extern(full) if full.starts_with("crate::") => full.to_string(),
                Lookup::Extern(full) => format!("::{full}"),
                Lookup::Builtin | Lookup::Unknown => continue,
            };
            out.push_str(&signature[cursor..start]);
            out.push_str(&absolute);
            cursor = start + path.len();
        }
        out.push_str(&signature[cursor..]);
        out
    }

    fn lookup(&self, package: &str, path: &str) -> Lookup<'_> {
        if let Some(rest) = path.strip_prefix("crate::") {
            return self.lookup_absolute(rest);
        }

        let Some((head, _)) = path.split_once("::") else {
            // a type declared in the package shadows the prelude
            if let Some(name) = QualifiedName::new(package, path)
                && let Some(declaration) = self.get(&name)
            {
                return Lookup::Declared(declaration);
            }
            if resolve::is_builtin(path) {
                return Lookup::Builtin;
            }
            return match self
                .externs
                .iter()
                .find(|e| e.rsplit("::").next() == Some(path))
            {
                Some(full) => Lookup::Extern(full.as_str()),
                None => Lookup::Unknown,
            };
        };

        match head {
            "std" | "core" | "alloc" => Lookup::Builtin,
            "self" | "super" => match from_package(package, path) {
                Some(absolute) => self.lookup_absolute(&absolute),
                None => Lookup::Unknown,
            },
            _ => match self.lookup_absolute(path) {
                Lookup::Unknown => self.lookup_absolute(&format!("{package}::{path}")),
                found => found,
            },
        }
    }

    fn lookup_absolute(&self, path: &str) -> Lookup<'_> {
        if let Some(full) = self.externs.get(path) {
            return Lookup::Extern(full.as_str());
        }
        match QualifiedName::parse(path).and_then(|name| self.get(&name)) {
            Some(declaration) => Lookup::Declared(declaration),
            None => Lookup::Unknown,
        }
    }
}

/// Crate-relative form of a `self::`/`super::` path written in `package`.
///
/// Each `super` climbs one module; `None` when the path climbs past the
/// crate root.
fn from_package(package: &str, path: &str) -> Option<String> {
    let mut module: Vec<&str> = package.split("::").filter(|s| !s.is_empty()).collect();
    let mut rest = path.strip_prefix("self::").unwrap_or(path);
    while let Some(tail) = rest.strip_prefix("super::") {
        module.pop()?;
        rest = tail;
    }
    module.push(rest);
    Some(module.join("::"))
}

enum Lookup<'a> {
    Builtin,
    Extern(&'a str),
    Declared(&'a Declaration),
    Unknown,
}
