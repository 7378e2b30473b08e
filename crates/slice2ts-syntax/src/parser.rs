//! Parser interface.
//!
//! Slice text is turned into a [`SliceSource`] by an external parser. The
//! core only depends on this trait; the CLI plugs in a process-backed
//! implementation and tests use [`JsonTreeParser`].

use crate::ast::SliceSource;

/// Syntax error reported by a parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    /// 1-based line, when the parser reports one.
    pub line: Option<usize>,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>) -> Self {
        SyntaxError {
            message: message.into(),
            line: None,
        }
    }

    pub fn at_line(message: impl Into<String>, line: usize) -> Self {
        SyntaxError {
            message: message.into(),
            line: Some(line),
        }
    }
}

impl std::fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.line {
            Some(line) => write!(f, "line {line}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for SyntaxError {}

pub trait SliceParser: Sync {
    fn parse(&self, text: &str) -> Result<SliceSource, SyntaxError>;
}

/// Parser for text that already is a serialized declaration tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonTreeParser;

impl SliceParser for JsonTreeParser {
    fn parse(&self, text: &str) -> Result<SliceSource, SyntaxError> {
        serde_json::from_str(text)
            .map_err(|err| SyntaxError::at_line(err.to_string(), err.line()))
    }
}
