//! Builders for emitter tests: declaration trees written as JSON, loaded
//! into memory and generated without touching the filesystem.

use serde_json::Value;
use slice2ts_binder::build_scope;
use slice2ts_syntax::{LoadedModule, LoadedModules, SliceSource};

use crate::declaration_emitter::{GenerateContext, TypingsOptions, generate_typings};
use crate::errors::GenerateError;
use crate::namespaces::{namespace_file_paths, namespace_usage};

pub(crate) fn loaded(name: &str, tree: Value) -> LoadedModule {
    let parsed: SliceSource = serde_json::from_value(tree).expect("fixture tree should deserialize");
    LoadedModule::new(name, "", parsed)
}

#[derive(Default)]
pub(crate) struct Fixture {
    pub modules: LoadedModules,
    pub inputs: Vec<String>,
}

impl Fixture {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// An input file.
    pub(crate) fn file(mut self, name: &str, tree: Value) -> Self {
        self.modules.insert(loaded(name, tree));
        self.inputs.push(name.to_string());
        self
    }

    /// A file that is only loaded as an include.
    pub(crate) fn include(mut self, name: &str, tree: Value) -> Self {
        self.modules.insert(loaded(name, tree));
        self
    }

    pub(crate) fn generate_with(
        &self,
        file: &str,
        options: &TypingsOptions,
    ) -> Result<String, GenerateError> {
        let scopes = build_scope(&self.modules).expect("scope should build");
        let usage = namespace_usage(&self.inputs, &self.modules).expect("inputs are loaded");
        let paths = namespace_file_paths(&usage);
        let ctx = GenerateContext {
            scopes: &scopes,
            modules: &self.modules,
            namespace_file_paths: &paths,
            options,
        };
        generate_typings(&ctx, file)
    }

    pub(crate) fn typings(&self, file: &str) -> String {
        self.generate_with(file, &TypingsOptions::default())
            .expect("typings should generate")
    }
}
