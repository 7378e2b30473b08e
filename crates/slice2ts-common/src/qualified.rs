//! `::` qualified names.
//!
//! Module paths are stored the way the binder builds them: the root module is
//! the empty string and every nested module appends `::<name>`, so a top-level
//! module `Foo` has the path `::Foo` and `Foo::Bar` has `::Foo::Bar`.

use crate::ident::escape;

pub const SEPARATOR: &str = "::";

/// A type reference as written in Slice, split into its segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifiedName<'a> {
    /// True when the name starts with `::` (resolved from the root scope).
    pub rooted: bool,
    /// Qualifier segments before the terminal name.
    pub qualifier: Vec<&'a str>,
    /// Terminal name.
    pub name: &'a str,
}

impl<'a> QualifiedName<'a> {
    pub fn parse(text: &'a str) -> Self {
        let trimmed = text.trim();
        let (rooted, rest) = match trimmed.strip_prefix(SEPARATOR) {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let mut segments: Vec<&'a str> = rest.split(SEPARATOR).collect();
        // split always yields at least one element
        let name = segments.pop().unwrap_or_default();

        QualifiedName {
            rooted,
            qualifier: segments,
            name,
        }
    }

    pub fn is_qualified(&self) -> bool {
        !self.qualifier.is_empty()
    }

    /// The qualifier joined back with `::`, for diagnostics.
    pub fn qualifier_text(&self) -> String {
        self.qualifier.join(SEPARATOR)
    }

    /// Render as a dotted TypeScript entity name, escaping every segment.
    pub fn to_ts_path(&self) -> String {
        self.qualifier
            .iter()
            .chain(std::iter::once(&self.name))
            .map(|segment| escape(segment))
            .collect::<Vec<_>>()
            .join(".")
    }
}

/// Path of a child module declared under `parent`.
pub fn join_module_path(parent: &str, name: &str) -> String {
    format!("{parent}{SEPARATOR}{name}")
}

/// Name of the top-level module of a module path (`::A::B` -> `A`).
pub fn top_level_module(module_path: &str) -> Option<&str> {
    module_path
        .strip_prefix(SEPARATOR)?
        .split(SEPARATOR)
        .next()
        .filter(|segment| !segment.is_empty())
}

/// Segments of a module path without the leading root separator.
pub fn module_segments(module_path: &str) -> impl Iterator<Item = &str> {
    module_path
        .strip_prefix(SEPARATOR)
        .unwrap_or(module_path)
        .split(SEPARATOR)
        .filter(|segment| !segment.is_empty())
}
