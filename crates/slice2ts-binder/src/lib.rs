//! Scope building and type resolution over loaded Slice modules.
//!
//! [`build_scope`] folds every loaded declaration tree into one
//! [`TypeScope`]: a tree of module scopes with explicit lexical parents and
//! explicit lookup chains. [`TypeScope::resolve`] then answers "what does this
//! type name refer to from here" for the emitter. The tree is immutable once
//! built and is shared by every per-file generation.

pub mod scope;
pub use scope::{Binding, ResolvedType, Scope, ScopeId, TypeScope};

pub mod builder;
pub use builder::build_scope;

pub mod resolver;

pub mod errors;
pub use errors::{BindError, ResolveError};

#[cfg(test)]
#[path = "tests/builder_tests.rs"]
mod builder_tests;
#[cfg(test)]
#[path = "tests/resolver_tests.rs"]
mod resolver_tests;
