//! Type signature scanning.

use std::collections::BTreeSet;

use buildsmith_ir::SourceLocation;

/// Outcome of resolving one type signature against a [`SymbolTable`](super::SymbolTable).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Files of the declarations the signature referred to.
    pub sources: BTreeSet<SourceLocation>,
    /// Paths that named nothing known, in order of appearance.
    pub unknown: Vec<String>,
}

impl Resolution {
    pub fn is_resolved(&self) -> bool {
        self.unknown.is_empty()
    }
}

/// Words that appear in type position without naming a type.
const IGNORED: &[&str] = &[
    "_", "as", "const", "dyn", "extern", "fn", "for", "impl", "mut", "unsafe", "where",
];

/// Primitives plus the prelude, the only simple names in scope in every
/// module. Other std types must be written as `std::` paths.
const BUILTINS: &[&str] = &[
    // primitives
    "bool", "char", "str", "f32", "f64", "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16",
    "u32", "u64", "u128", "usize",
    // prelude types
    "Box", "Option", "Result", "String", "Vec",
    // prelude traits
    "Clone", "Copy", "Default", "Eq", "Fn", "FnMut", "FnOnce", "Iterator", "Ord", "PartialEq",
    "PartialOrd", "Send", "Sized", "Sync", "ToString", "Unpin",
];

pub(crate) fn is_builtin(name: &str) -> bool {
    BUILTINS.contains(&name)
}

/// Extract the type paths named by a signature.
///
/// Lifetimes, array lengths and keywords are skipped; a leading `::` is
/// dropped.
///
/// ```
/// use buildsmith_codegen::symbols::type_paths;
///
/// assert_eq!(
///     type_paths("&'a [std::string::String; 4]"),
///     vec!["std::string::String"]
/// );
/// ```
pub fn type_paths(signature: &str) -> Vec<&str> {
    type_path_spans(signature)
        .into_iter()
        .map(|(_, path)| path)
        .collect()
}

/// [`type_paths`] with the byte offset of each path in `signature`.
pub(crate) fn type_path_spans(signature: &str) -> Vec<(usize, &str)> {
    let mut spans = Vec::new();
    let mut start = None;
    let end = std::iter::once((signature.len(), ' '));
    for (index, c) in signature.char_indices().chain(end) {
        let in_path = c.is_alphanumeric() || c == '_' || c == ':' || c == '\'';
        match (in_path, start) {
            (true, None) => start = Some(index),
            (false, Some(from)) => {
                spans.extend(path_token(signature, from, index));
                start = None;
            }
            _ => {}
        }
    }
    spans
}

fn path_token(signature: &str, from: usize, to: usize) -> Option<(usize, &str)> {
    let raw = &signature[from..to];
    let trimmed = raw.trim_start_matches("::");
    let token = trimmed.trim_end_matches(':');
    let first = token.chars().next()?;
    if first == '\'' || first == ':' || first.is_ascii_digit() || IGNORED.contains(&token) {
        return None;
    }
    Some((from + raw.len() - trimmed.len(), token))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_in_generics() {
        assert_eq!(
            type_paths("HashMap<String, Vec<model::Address>>"),
            vec!["HashMap", "String", "Vec", "model::Address"]
        );
    }

    #[test]
    fn test_skips_lifetimes_lengths_and_keywords() {
        assert_eq!(type_paths("&'static mut [u8; 16]"), vec!["u8"]);
        assert_eq!(
            type_paths("Box<dyn Fn(&str) -> usize + Send + 'static>"),
            vec!["Box", "Fn", "str", "usize", "Send"]
        );
        assert_eq!(type_paths("*const ::core::ffi::c_void"), vec!["core::ffi::c_void"]);
    }

    #[test]
    fn test_spans_point_into_signature() {
        let signature = "Vec<(::uuid::Uuid, Point)>";
        let spans = type_path_spans(signature);
        assert_eq!(spans, vec![(0, "Vec"), (7, "uuid::Uuid"), (19, "Point")]);
        for (start, path) in spans {
            assert_eq!(&signature[start..start + path.len()], path);
        }
    }

    #[test]
    fn test_only_prelude_names_are_builtin() {
        assert!(is_builtin("Option"));
        assert!(is_builtin("u8"));
        assert!(!is_builtin("Cell"));
        assert!(!is_builtin("HashMap"));
    }

    #[test]
    fn test_unit_and_tuple() {
        assert!(type_paths("()").is_empty());
        assert_eq!(type_paths("(u8, Point)"), vec!["u8", "Point"]);
    }
}
