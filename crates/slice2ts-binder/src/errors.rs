use slice2ts_syntax::DeclarationKind;

/// Conflicts found while building the scope tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindError {
    #[error("Duplicate declaration of {qualified_name} in {file}")]
    DuplicateDeclaration { qualified_name: String, file: String },

    #[error("{qualified_name} in {file} is declared both as a {existing} and as a {declared}")]
    NameConflict {
        qualified_name: String,
        file: String,
        existing: DeclarationKind,
        declared: DeclarationKind,
    },
}

/// Failures of [`TypeScope::resolve`](crate::TypeScope::resolve) and friends.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// A qualifier segment of the name has no module binding.
    #[error("Module not found: {module}")]
    ModuleNotFound { module: String, type_name: String },

    /// The terminal name has no declaration binding after the full search.
    #[error("Type not found: {type_name}")]
    TypeNotFound { type_name: String },

    #[error("Child module not found: {module}")]
    ChildModuleNotFound { module: String },
}
