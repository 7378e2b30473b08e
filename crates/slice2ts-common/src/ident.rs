//! Identifier escaping.
//!
//! Slice identifiers that collide with JavaScript reserved words are mapped
//! with a leading underscore, the same way the runtime code generator maps
//! them, so the declarations line up with the generated module bodies.

use once_cell::sync::Lazy;
use rustc_hash::FxHashSet;
use std::borrow::Cow;

static RESERVED_WORDS: Lazy<FxHashSet<&'static str>> = Lazy::new(|| {
    [
        "await",
        "break",
        "case",
        "catch",
        "class",
        "const",
        "continue",
        "debugger",
        "default",
        "delete",
        "do",
        "else",
        "enum",
        "export",
        "extends",
        "false",
        "finally",
        "for",
        "function",
        "if",
        "implements",
        "import",
        "in",
        "instanceof",
        "interface",
        "let",
        "new",
        "null",
        "package",
        "private",
        "protected",
        "public",
        "return",
        "static",
        "super",
        "switch",
        "this",
        "throw",
        "true",
        "try",
        "typeof",
        "var",
        "void",
        "while",
        "with",
        "yield",
    ]
    .into_iter()
    .collect()
});

/// Returns true if `name` cannot be used verbatim as a declaration name.
pub fn is_reserved_word(name: &str) -> bool {
    RESERVED_WORDS.contains(name)
}

/// Escape a single Slice identifier for use in generated TypeScript.
pub fn escape(name: &str) -> Cow<'_, str> {
    if is_reserved_word(name) {
        Cow::Owned(format!("_{name}"))
    } else {
        Cow::Borrowed(name)
    }
}
