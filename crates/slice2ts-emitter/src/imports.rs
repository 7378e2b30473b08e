//! ES import block of a generated file.
//!
//! Each direct include contributes the top-level modules it declares that
//! no earlier include (and not `Ice` itself) already brought in. Includes
//! from the built-in Slice folders are served by the `ice` package and fold
//! into one aggregated import; everything else is imported by relative path.

use crate::errors::GenerateError;
use indexmap::IndexSet;
use slice2ts_common::{escape, paths};
use slice2ts_syntax::LoadedModules;

const ICE_PACKAGE: &str = "ice";
const ICE_NAMESPACE: &str = "Ice";

/// Top-level folders of the Slice files shipped with the Ice runtime.
pub const BUILT_IN_FOLDERS: &[&str] = &[
    "Ice",
    "Glacier2",
    "IceBox",
    "IceBT",
    "IceDiscovery",
    "IceGrid",
    "IceIAP",
    "IceLocatorDiscovery",
    "IcePatch2",
    "IceSSL",
    "IceStorm",
];

fn is_built_in(module_name: &str) -> bool {
    let folder = module_name.split('/').next().unwrap_or_default();
    BUILT_IN_FOLDERS.contains(&folder)
}

/// Import statements for `file_name`, one per line, newline terminated.
///
/// With `ice_imports`, built-in includes are imported from their own files
/// like any other include instead of from the `ice` package.
pub fn plan_imports(
    file_name: &str,
    modules: &LoadedModules,
    ice_imports: bool,
) -> Result<String, GenerateError> {
    let loaded = modules
        .get(file_name)
        .ok_or_else(|| GenerateError::ModuleNotLoaded {
            name: file_name.to_string(),
        })?;

    let mut seen: IndexSet<&str> = IndexSet::from([ICE_NAMESPACE]);
    let mut ice_namespaces: IndexSet<&str> = IndexSet::from([ICE_NAMESPACE]);
    let mut imports = Vec::new();

    let prefix = "../".repeat(paths::depth(file_name) - 1);

    for include in &loaded.parsed.includes {
        let included = modules
            .get(include)
            .ok_or_else(|| GenerateError::ModuleNotLoaded {
                name: include.clone(),
            })?;

        let namespaces: Vec<&str> = included
            .parsed
            .modules
            .iter()
            .map(|module| module.name.as_str())
            .filter(|namespace| seen.insert(*namespace))
            .collect();

        if !ice_imports && is_built_in(include) {
            ice_namespaces.extend(namespaces);
            continue;
        }

        let path = format!("{prefix}{include}");
        if namespaces.is_empty() {
            imports.push(format!("import \"{path}\";"));
        } else {
            let names = namespaces
                .iter()
                .map(|namespace| escape(namespace))
                .collect::<Vec<_>>()
                .join(", ");
            imports.push(format!("import {{ {names} }} from \"{path}\";"));
        }
    }

    let ice_names = ice_namespaces.into_iter().collect::<Vec<_>>().join(", ");
    imports.insert(0, format!("import {{ {ice_names} }} from \"{ICE_PACKAGE}\";"));

    let mut out = imports.join("\n");
    out.push('\n');
    Ok(out)
}
