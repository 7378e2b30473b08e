//! TypeScript emission for Slice modules.
//!
//! * [`namespaces`] - which input files declare each top-level module and
//!   where that module's shared namespace declaration file lives.
//! * [`imports`] - the ES import block of one generated file.
//! * [`declaration_emitter`] - `.d.ts` text for one input file.
//! * [`js_emitter`] - the runtime module sibling, produced by an external
//!   compiler and re-targeted to the same import block.

pub mod errors;
pub use errors::{ExternalCompilerError, GenerateError, JsError};

pub mod source_writer;

pub mod namespaces;
pub use namespaces::{
    NamespaceFilePaths, NamespaceUsage, generate_index_declarations, generate_index_module,
    generate_namespace, namespace_file_paths, namespace_usage,
};

pub mod imports;
pub use imports::{BUILT_IN_FOLDERS, plan_imports};

pub mod declaration_emitter;
pub use declaration_emitter::{GenerateContext, TypingsOptions, generate_typings};

pub mod js_emitter;
pub use js_emitter::{
    CompileFailure, CompiledModule, ES6_MODULE_DIRECTIVE, RuntimeCompiler, generate_js,
};

pub mod formatter;
pub use formatter::{Formatter, IdentityFormatter};

#[cfg(test)]
#[path = "tests/imports_tests.rs"]
mod imports_tests;
#[cfg(test)]
#[path = "tests/source_writer_tests.rs"]
mod source_writer_tests;
#[cfg(test)]
#[path = "tests/js_emitter_tests.rs"]
mod js_emitter_tests;
#[cfg(test)]
#[path = "tests/test_fixtures.rs"]
pub(crate) mod test_fixtures;
