//! Manifest types for smith.toml files.

use serde::Deserialize;

/// Path of the runtime crate used by generated code unless overridden.
pub const DEFAULT_RUNTIME: &str = "::buildsmith_runtime";

/// Round cap and retry bound unless overridden.
pub const DEFAULT_MAX_ROUNDS: usize = 10;

/// Root manifest for smith.toml
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Generator settings
    #[serde(default)]
    pub generator: GeneratorConfig,

    /// Types known to the host but not declared here
    #[serde(default)]
    pub externs: Externs,

    /// Declared types, in file order
    #[serde(default)]
    pub types: Vec<TypeDecl>,

    /// Name of the file this manifest was read from
    #[serde(skip)]
    pub(crate) origin: String,
}

impl Manifest {
    /// Name of the file this manifest was parsed from.
    ///
    /// Declarations without an explicit `source` are attributed to it.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Declarations carrying the generation directive.
    pub fn builder_types(&self) -> impl Iterator<Item = &TypeDecl> {
        self.types.iter().filter(|t| t.builder)
    }

    /// Source file of a declaration.
    pub fn source_of<'a>(&'a self, decl: &'a TypeDecl) -> &'a str {
        decl.source.as_deref().unwrap_or(&self.origin)
    }

    /// Highest round in which a declaration first becomes visible.
    pub fn last_round(&self) -> usize {
        self.types.iter().map(|t| t.round).max().unwrap_or(1)
    }
}

/// `[generator]` section
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Path to the runtime crate as seen from generated code
    #[serde(default = "default_runtime")]
    pub runtime: String,

    /// Maximum number of processing rounds
    #[serde(default = "default_max_rounds")]
    pub max_rounds: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            runtime: default_runtime(),
            max_rounds: default_max_rounds(),
        }
    }
}

fn default_runtime() -> String {
    DEFAULT_RUNTIME.to_string()
}

fn default_max_rounds() -> usize {
    DEFAULT_MAX_ROUNDS
}

/// `[externs]` section
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Externs {
    /// Type paths resolvable without a declaration, e.g. `chrono::NaiveDate`
    #[serde(default)]
    pub types: Vec<String>,
}

/// One `[[types]]` entry
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeDecl {
    /// Simple type name
    pub name: String,

    /// Module path, e.g. `model::people`
    pub package: String,

    /// File the type is declared in
    #[serde(default)]
    pub source: Option<String>,

    /// The generation directive
    #[serde(default)]
    pub builder: bool,

    /// Associated function to call positionally instead of a struct literal
    #[serde(default)]
    pub constructor: Option<String>,

    /// Round in which the host first exposes this declaration
    #[serde(default = "default_round")]
    pub round: usize,

    /// Properties in declaration order
    #[serde(default)]
    pub properties: Vec<PropertyDecl>,
}

fn default_round() -> usize {
    1
}

impl TypeDecl {
    /// `package::Name`, without a leading `crate::`
    pub fn qualified(&self) -> String {
        let package = self.package.strip_prefix("crate::").unwrap_or(&self.package);
        format!("{}::{}", package, self.name)
    }
}

/// One property of a declared type
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PropertyDecl {
    pub name: String,

    #[serde(rename = "type")]
    pub ty: String,

    #[serde(default)]
    pub doc: Option<String>,

    /// Filled by the type's `Default` instead of the builder
    #[serde(default)]
    pub derived: bool,
}
