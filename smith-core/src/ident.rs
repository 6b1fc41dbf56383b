//! Rust identifier rules.

/// Rust reserved keywords that cannot be used as plain identifiers
/// Source: https://doc.rust-lang.org/reference/keywords.html
pub const RUST_KEYWORDS: &[&str] = &[
    // Strict keywords (2024 edition)
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum", "extern",
    "false", "fn", "for", "gen", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut",
    "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true", "type",
    "unsafe", "use", "where", "while",
    // Reserved keywords
    "abstract", "become", "box", "do", "final", "macro", "override", "priv", "try", "typeof",
    "unsized", "virtual", "yield",
];

/// Keywords that cannot be written as raw identifiers either.
const NON_RAW_KEYWORDS: &[&str] = &["self", "Self", "super", "crate"];

/// Check if a name is a Rust reserved keyword
pub fn is_rust_keyword(name: &str) -> bool {
    RUST_KEYWORDS.contains(&name)
}

/// Check whether `name` can appear in generated code, possibly as `r#name`.
pub fn is_raw_capable(name: &str) -> bool {
    name != "_" && !NON_RAW_KEYWORDS.contains(&name)
}

/// Render `name` as a usable identifier, escaping keywords as raw identifiers.
///
/// Callers must check [`is_raw_capable`] first; `self` and friends are
/// returned unchanged.
pub fn escape_ident(name: &str) -> String {
    if is_rust_keyword(name) && is_raw_capable(name) {
        format!("r#{}", name)
    } else {
        name.to_string()
    }
}

/// Validate the syntax of a Rust identifier.
/// Returns None if valid, Some(reason) if invalid.
///
/// Keywords pass this check; callers decide whether to escape or reject them.
pub fn validate_identifier(name: &str) -> Option<&'static str> {
    let mut chars = name.chars();

    match chars.next() {
        None => return Some("name cannot be empty"),
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        Some(_) => return Some("name must start with a letter or underscore"),
    }

    if name == "_" {
        return Some("`_` is not a usable identifier");
    }

    if chars.any(|c| !(c.is_ascii_alphanumeric() || c == '_')) {
        return Some("name must contain only letters, numbers, and underscores");
    }

    None
}
