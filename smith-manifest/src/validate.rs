//! Validation of declarations after parsing.

use std::collections::HashMap;

use buildsmith_core::{is_rust_keyword, validate_identifier};
use miette::SourceSpan;

use crate::{Manifest, Result, SourceContext, TypeDecl};

/// Parsing and validation context that carries source information.
///
/// Wraps a [`SourceContext`] with the path of the declaration being checked
/// so error messages can say where a bad name lives.
///
/// # Example
///
/// ```ignore
/// let ctx = ParseContext::new(src, "smith.toml");
/// ctx.validate_name("Person", "type")?;
///
/// let nested = ctx.push("model::Person");
/// nested.validate_property("name")?;
/// ```
#[derive(Debug, Clone)]
pub struct ParseContext<'a> {
    source: &'a SourceContext,
    /// Path segments for nested validation
    path: Vec<&'a str>,
}

impl<'a> ParseContext<'a> {
    /// Create a new parse context over the given source.
    pub fn new(source: &'a SourceContext) -> Self {
        Self {
            source,
            path: Vec::new(),
        }
    }

    /// Push a path segment and return a new context.
    pub fn push(&self, segment: &'a str) -> Self {
        let mut path = self.path.clone();
        path.push(segment);
        Self {
            source: self.source,
            path,
        }
    }

    /// Get the current path as a dot-separated string.
    pub fn path_string(&self) -> String {
        self.path.join(".")
    }

    /// Get a context description for error messages.
    ///
    /// For example: "property in 'model::Person'" or just "type" if no path.
    pub fn context_for(&self, kind: &str) -> String {
        if self.path.is_empty() {
            kind.to_string()
        } else {
            format!("{} in '{}'", kind, self.path_string())
        }
    }

    /// Find the span of a quoted value in the source.
    pub fn find_span(&self, value: &str) -> Option<SourceSpan> {
        find_value_span(self.source.src(), value, 0)
    }

    /// Validate a name that must be a plain, non-keyword identifier.
    pub fn validate_name(&self, name: &str, kind: &str) -> Result<()> {
        if is_rust_keyword(name) {
            return Err(self.source.reserved_keyword_error(
                name,
                self.context_for(kind),
                self.find_span(name),
            ));
        }
        self.validate_syntax(name, kind)
    }

    /// Validate a property name. Keywords are allowed here; the generator
    /// decides whether they can be escaped.
    pub fn validate_property(&self, name: &str) -> Result<()> {
        self.validate_syntax(name, "property")
    }

    /// Validate a `::`-separated module path.
    pub fn validate_package(&self, package: &str) -> Result<()> {
        let package = package.strip_prefix("crate::").unwrap_or(package);
        if package.is_empty() {
            return Err(self.source.validation_error(
                format!("{} cannot be empty", self.context_for("package")),
                None,
            ));
        }
        for segment in package.split("::") {
            self.validate_name(segment, "package")?;
        }
        Ok(())
    }

    fn validate_syntax(&self, name: &str, kind: &str) -> Result<()> {
        if let Some(reason) = validate_identifier(name) {
            return Err(self.source.invalid_identifier_error(
                name,
                self.context_for(kind),
                reason,
                self.find_span(name),
            ));
        }
        Ok(())
    }
}

/// Validate the manifest after parsing.
pub(crate) fn validate_manifest(manifest: &Manifest, source: &SourceContext) -> Result<()> {
    let ctx = ParseContext::new(source);

    if manifest.generator.max_rounds == 0 {
        return Err(source.validation_error(
            "generator.max_rounds must be at least 1",
            find_key_span(source.src(), "max_rounds"),
        ));
    }

    if manifest.generator.runtime.trim().is_empty() {
        return Err(source.validation_error(
            "generator.runtime cannot be empty",
            find_key_span(source.src(), "runtime"),
        ));
    }

    let mut seen: HashMap<String, usize> = HashMap::new();
    let qualified: Vec<String> = manifest.types.iter().map(TypeDecl::qualified).collect();

    for (index, (decl, name)) in manifest.types.iter().zip(&qualified).enumerate() {
        ctx.validate_package(&decl.package)?;
        ctx.validate_name(&decl.name, "type")?;

        if let Some(&first) = seen.get(name) {
            return Err(source.duplicate_type_error(
                name.clone(),
                find_value_span(source.src(), &manifest.types[first].name, 0),
                nth_value_span(source.src(), &decl.name, index - first),
            ));
        }
        seen.insert(name.clone(), index);

        validate_decl(&ctx.push(name), decl)?;
    }

    Ok(())
}

fn validate_decl(ctx: &ParseContext<'_>, decl: &TypeDecl) -> Result<()> {
    if decl.round == 0 {
        return Err(ctx.source.validation_error(
            format!("{} starts at round 1", ctx.context_for("round")),
            find_key_span(ctx.source.src(), "round"),
        ));
    }

    if let Some(constructor) = &decl.constructor {
        ctx.validate_name(constructor, "constructor")?;
    }

    for property in &decl.properties {
        ctx.validate_property(&property.name)?;
        if property.ty.trim().is_empty() {
            return Err(ctx.source.validation_error(
                format!(
                    "property '{}' in '{}' has an empty type",
                    property.name,
                    ctx.path_string()
                ),
                ctx.find_span(&property.name),
            ));
        }
    }

    Ok(())
}

/// Find the span of `"value"` in the TOML source, searching from `from`.
/// The span covers the value without its quotes.
pub(crate) fn find_value_span(src: &str, value: &str, from: usize) -> Option<SourceSpan> {
    let needle = format!("\"{}\"", value);
    src.get(from..)?
        .find(&needle)
        .map(|pos| SourceSpan::from((from + pos + 1, value.len())))
}

/// Find the span of the `n`-th later occurrence of `"value"`.
fn nth_value_span(src: &str, value: &str, n: usize) -> Option<SourceSpan> {
    let mut span = find_value_span(src, value, 0)?;
    for _ in 0..n {
        span = find_value_span(src, value, span.offset() + span.len())?;
    }
    Some(span)
}

/// Find the span of a `key =` assignment.
fn find_key_span(src: &str, key: &str) -> Option<SourceSpan> {
    src.match_indices(key)
        .find(|(pos, _)| src[pos + key.len()..].trim_start().starts_with('='))
        .map(|(pos, _)| SourceSpan::from((pos, key.len())))
}
