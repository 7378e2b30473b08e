//! Errors raised while generating TypeScript output.

use slice2ts_binder::ResolveError;
use slice2ts_syntax::DeclarationKind;

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error("{construct} not supported: {qualified_name}")]
    UnsupportedConstruct {
        construct: &'static str,
        qualified_name: String,
    },
    #[error("{type_name} is a {found}, expected {expected}")]
    UnexpectedKind {
        type_name: String,
        expected: DeclarationKind,
        found: DeclarationKind,
    },
    #[error("Inheritance cycle through {qualified_name}")]
    InheritanceCycle { qualified_name: String },
    #[error("Slice file was not loaded: {name}.ice")]
    ModuleNotLoaded { name: String },
    #[error("No namespace file for top-level module {module}")]
    MissingNamespaceFile { module: String },
    #[error("{file}: {source}")]
    InFile {
        file: String,
        #[source]
        source: Box<GenerateError>,
    },
}

impl GenerateError {
    /// Attach the name of the file being generated.
    pub fn in_file(self, file: &str) -> Self {
        match self {
            GenerateError::InFile { .. } => self,
            source => GenerateError::InFile {
                file: file.to_string(),
                source: Box::new(source),
            },
        }
    }
}

/// Diagnostic text of a failed external compilation, with positions
/// already pointing at the original Slice file.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ExternalCompilerError {
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum JsError {
    #[error(transparent)]
    Generate(#[from] GenerateError),
    #[error(transparent)]
    Compiler(#[from] ExternalCompilerError),
    #[error("Failed to run runtime compiler for {file}: {source}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },
}
