//! Common helpers shared by every slice2ts crate.
//!
//! Nothing in here knows about declarations or scopes: these are the string
//! level rules (identifier escaping, `::` qualified names, slash separated
//! module paths) that the binder and emitter agree on.

pub mod ident;
pub use ident::escape;

pub mod qualified;
pub use qualified::{QualifiedName, join_module_path, top_level_module};

pub mod paths;

#[cfg(test)]
#[path = "tests/ident_tests.rs"]
mod ident_tests;
#[cfg(test)]
#[path = "tests/qualified_tests.rs"]
mod qualified_tests;
#[cfg(test)]
#[path = "tests/paths_tests.rs"]
mod paths_tests;
