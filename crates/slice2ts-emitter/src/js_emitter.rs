//! Runtime module sibling of a generated declaration file.
//!
//! The module body comes from an external Slice-to-JavaScript compiler fed
//! the file's Slice text with ES module output requested. The compiler's own
//! import lines are replaced by the same import block the declarations use,
//! and diagnostics are mapped back to the original file.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use slice2ts_syntax::LoadedModules;
use std::io;
use tracing::debug_span;

use crate::errors::{ExternalCompilerError, GenerateError, JsError};
use crate::imports::plan_imports;

/// Global metadata asking the compiler for ES module output. It occupies
/// the first line, so compiler line numbers are one past the original.
pub const ES6_MODULE_DIRECTIVE: &str = "[[\"js:es6-module\"]]\n";

static IMPORT_LINES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)(^import.*\r?\n)+").expect("import lines regex is valid"));

/// Output of a successful compilation.
#[derive(Debug, Clone)]
pub struct CompiledModule {
    pub code: String,
    /// Path of the file the compiler actually saw.
    pub source_path: String,
}

#[derive(Debug, thiserror::Error)]
pub enum CompileFailure {
    /// The compiler ran and rejected the input.
    #[error("{message}")]
    Diagnostics { message: String, source_path: String },
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Slice-to-JavaScript compiler.
pub trait RuntimeCompiler: Sync {
    /// Compile `source`, the annotated text of module `name`.
    fn compile(&self, name: &str, source: &str) -> Result<CompiledModule, CompileFailure>;
}

/// Runtime module text for input file `file_name`.
pub fn generate_js(
    file_name: &str,
    modules: &LoadedModules,
    compiler: &dyn RuntimeCompiler,
    ice_imports: bool,
) -> Result<String, JsError> {
    let _span = debug_span!("generate_js", file = file_name).entered();

    let loaded = modules.get(file_name).ok_or_else(|| {
        GenerateError::ModuleNotLoaded {
            name: file_name.to_string(),
        }
        .in_file(file_name)
    })?;

    let annotated = format!("{ES6_MODULE_DIRECTIVE}{}", loaded.contents);
    let compiled = match compiler.compile(file_name, &annotated) {
        Ok(compiled) => compiled,
        Err(CompileFailure::Diagnostics {
            message,
            source_path,
        }) => {
            return Err(ExternalCompilerError {
                message: remap_diagnostics(&message, &source_path, file_name),
            }
            .into());
        }
        Err(CompileFailure::Io(source)) => {
            return Err(JsError::Io {
                file: file_name.to_string(),
                source,
            });
        }
    };

    let code = rename_source(&compiled, file_name);
    let body = IMPORT_LINES.replace_all(&code, "");
    let imports =
        plan_imports(file_name, modules, ice_imports).map_err(|err| err.in_file(file_name))?;

    Ok(format!("{imports}{body}"))
}

/// Point references to the compiler's input file at `<name>.ice`.
fn rename_source(compiled: &CompiledModule, name: &str) -> String {
    let path = compiled.source_path.as_str();
    let file = path.rsplit(['/', '\\']).next().unwrap_or(path);
    let stem = file.strip_suffix(".ice").unwrap_or(file);

    let code = compiled.code.replace(file, &format!("{name}.ice"));
    if stem.is_empty() {
        code
    } else {
        code.replace(stem, name)
    }
}

/// Rewrite `<source_path>:<line>` positions to `<name>.ice:<line - 1>`,
/// undoing the directive line.
pub(crate) fn remap_diagnostics(message: &str, source_path: &str, name: &str) -> String {
    let pattern = format!(r"(?m)^.*{}:(\d+)", regex::escape(source_path));
    let Ok(position) = Regex::new(&pattern) else {
        return message.to_string();
    };

    position
        .replace_all(message, |captures: &Captures<'_>| {
            let line = captures[1].parse::<u64>().unwrap_or(1);
            format!("{name}.ice:{}", line.saturating_sub(1))
        })
        .into_owned()
}
