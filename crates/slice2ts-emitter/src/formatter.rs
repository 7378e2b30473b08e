//! Pretty-printing of generated text.

use std::io;

/// Formats generated source text before it is written.
///
/// `file_name` is only a hint for picking a parser (`.d.ts` vs `.js`).
pub trait Formatter: Sync {
    fn format(&self, source: &str, file_name: &str) -> io::Result<String>;
}

/// Leaves the text as emitted.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityFormatter;

impl Formatter for IdentityFormatter {
    fn format(&self, source: &str, _file_name: &str) -> io::Result<String> {
        Ok(source.to_string())
    }
}
