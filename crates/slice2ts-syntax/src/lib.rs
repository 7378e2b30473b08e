//! Slice declaration trees and the loader that produces them.
//!
//! The grammar itself is parsed by an external tool; this crate owns the
//! shape of its output ([`ast`]), the narrow [`parser::SliceParser`]
//! interface used to obtain it, and [`loader`], which walks every input file
//! and its transitive includes exactly once.

pub mod ast;
pub use ast::{
    ClassDeclaration, ClassMember, ConstDeclaration, DeclarationKind, DictionaryDeclaration,
    EnumDeclaration, EnumElement, ExceptionDeclaration, FieldDeclaration, ForwardDeclaration,
    InterfaceDeclaration, ModuleChild, ModuleDeclaration, OperationDeclaration,
    ParameterDeclaration, SequenceDeclaration, SliceSource, StructDeclaration,
};

pub mod metadata;

pub mod parser;
pub use parser::{JsonTreeParser, SliceParser, SyntaxError};

pub mod loader;
pub use loader::{
    FsSourceFiles, LoadError, LoadResult, LoadedModule, LoadedModules, MemorySourceFiles,
    SourceFiles, SourceText, load_modules, module_name_for_path,
};

#[cfg(test)]
#[path = "tests/ast_tests.rs"]
mod ast_tests;
#[cfg(test)]
#[path = "tests/metadata_tests.rs"]
mod metadata_tests;
