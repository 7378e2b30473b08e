//! Top-level namespaces shared across files.
//!
//! Every top-level module gets one namespace declaration file that all
//! per-file declarations merge into. It lives in the deepest directory
//! shared by every input file declaring the module: if `A/B/C.ice` and
//! `A/D/E.ice` both declare `Foo`, the file is `A/Foo.ns.d.ts`.

use crate::errors::GenerateError;
use indexmap::IndexMap;
use slice2ts_common::{escape, paths};
use slice2ts_syntax::LoadedModules;

const NAMESPACE_FILE_SUFFIX: &str = ".ns.d.ts";

/// Input files declaring each top-level module, in input order.
pub type NamespaceUsage = IndexMap<String, Vec<String>>;

/// Root-relative path of each top-level module's namespace declaration file.
pub type NamespaceFilePaths = IndexMap<String, String>;

pub fn namespace_usage(
    input_names: &[String],
    modules: &LoadedModules,
) -> Result<NamespaceUsage, GenerateError> {
    let mut usage = NamespaceUsage::new();

    for name in input_names {
        let loaded = modules
            .get(name)
            .ok_or_else(|| GenerateError::ModuleNotLoaded { name: name.clone() })?;

        for module in &loaded.parsed.modules {
            let files = usage.entry(module.name.clone()).or_default();
            if !files.contains(name) {
                files.push(name.clone());
            }
        }
    }

    Ok(usage)
}

pub fn namespace_file_paths(usage: &NamespaceUsage) -> NamespaceFilePaths {
    usage
        .iter()
        .map(|(module, files)| {
            let dir = paths::common_dir(files.iter().map(|file| paths::dirname(file)));
            let path = paths::join(&dir, &format!("{module}{NAMESPACE_FILE_SUFFIX}"));
            (module.clone(), path)
        })
        .collect()
}

/// Module specifier of a namespace file as seen from `file_name`.
pub(crate) fn namespace_module_specifier(file_name: &str, namespace_file: &str) -> String {
    let target = namespace_file
        .strip_suffix(".d.ts")
        .unwrap_or(namespace_file);
    paths::module_specifier(paths::dirname(file_name), target)
}

/// Body of a namespace declaration file.
pub fn generate_namespace(module: &str) -> String {
    format!("export namespace {} {{}}\n", escape(module))
}

/// CommonJS index re-exporting `module` from the first file declaring it and
/// loading the others for their side effects.
pub fn generate_index_module(module: &str, files: &[String]) -> String {
    let mut out = String::new();
    for (index, file) in files.iter().enumerate() {
        if index == 0 {
            out.push_str(&format!("exports.{module} = require('./{file}').{module};\n"));
        } else {
            out.push_str(&format!("require('./{file}');\n"));
        }
    }
    out
}

/// Declarations matching [`generate_index_module`].
pub fn generate_index_declarations(module: &str, files: &[String]) -> String {
    let mut out = String::new();
    for (index, file) in files.iter().enumerate() {
        if index == 0 {
            out.push_str(&format!("export {{{module}}} from './{file}';\n"));
        } else {
            out.push_str(&format!("import './{file}';\n"));
        }
    }
    out
}
