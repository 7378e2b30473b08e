//! In-memory generation of every typings artifact for a set of inputs.

use slice2ts_binder::{BindError, build_scope};
use slice2ts_emitter::{
    GenerateContext, GenerateError, TypingsOptions, generate_index_declarations,
    generate_index_module, generate_namespace, generate_typings, namespace_file_paths,
    namespace_usage,
};
use slice2ts_syntax::{LoadError, SliceParser, SourceFiles, load_modules};
use tracing::debug_span;

/// Errors that stop a whole run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Bind(#[from] BindError),
    #[error(transparent)]
    Generate(#[from] GenerateError),
}

/// Output path relative to the out dir, and its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: String,
    pub contents: String,
}

#[derive(Debug, Default)]
pub struct PipelineOutput {
    /// Namespace files, then index files, then one `.d.ts` per input.
    pub files: Vec<GeneratedFile>,
    /// Inputs that failed, each with an [`GenerateError::InFile`].
    pub failures: Vec<GenerateError>,
}

impl PipelineOutput {
    pub fn get(&self, path: &str) -> Option<&str> {
        self.files
            .iter()
            .find(|file| file.path == path)
            .map(|file| file.contents.as_str())
    }
}

/// Load `input_names` from `files` and generate their typings.
///
/// With `index`, each top-level module also gets `<Module>.js` and
/// `<Module>.d.ts` re-exporting it. A file that fails to generate is
/// recorded in [`PipelineOutput::failures`] and the rest still are.
pub fn generate(
    input_names: &[String],
    files: &dyn SourceFiles,
    parser: &dyn SliceParser,
    options: &TypingsOptions,
    index: bool,
) -> Result<PipelineOutput, PipelineError> {
    let _span = debug_span!("pipeline", inputs = input_names.len()).entered();

    let loaded = load_modules(input_names, files, parser)?;
    let scopes = build_scope(&loaded.modules)?;
    let usage = namespace_usage(&loaded.input_names, &loaded.modules)?;
    let namespace_paths = namespace_file_paths(&usage);

    let mut output = PipelineOutput::default();

    for (module, path) in &namespace_paths {
        output.files.push(GeneratedFile {
            path: path.clone(),
            contents: generate_namespace(module),
        });
    }

    if index {
        for (module, declaring) in &usage {
            output.files.push(GeneratedFile {
                path: format!("{module}.js"),
                contents: generate_index_module(module, declaring),
            });
            output.files.push(GeneratedFile {
                path: format!("{module}.d.ts"),
                contents: generate_index_declarations(module, declaring),
            });
        }
    }

    let ctx = GenerateContext {
        scopes: &scopes,
        modules: &loaded.modules,
        namespace_file_paths: &namespace_paths,
        options,
    };

    for name in &loaded.input_names {
        match generate_typings(&ctx, name) {
            Ok(contents) => output.files.push(GeneratedFile {
                path: format!("{name}.d.ts"),
                contents,
            }),
            Err(err) => output.failures.push(err),
        }
    }

    Ok(output)
}
