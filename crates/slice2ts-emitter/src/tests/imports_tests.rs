use crate::imports::plan_imports;
use crate::test_fixtures::loaded;
use serde_json::json;
use slice2ts_syntax::LoadedModules;

fn modules(entries: Vec<(&str, serde_json::Value)>) -> LoadedModules {
    entries
        .into_iter()
        .map(|(name, tree)| loaded(name, tree))
        .collect()
}

fn declaring(namespaces: &[&str]) -> serde_json::Value {
    let modules: Vec<_> = namespaces
        .iter()
        .map(|name| json!({ "name": name, "content": [] }))
        .collect();
    json!({ "modules": modules })
}

#[test]
fn file_without_includes_imports_ice_only() {
    let modules = modules(vec![("Demo", declaring(&["Demo"]))]);
    let imports = plan_imports("Demo", &modules, false).unwrap();
    assert_eq!(imports, "import { Ice } from \"ice\";\n");
}

#[test]
fn built_in_includes_fold_into_the_ice_import() {
    let modules = modules(vec![
        (
            "App/Main",
            json!({
                "includes": ["Ice/Identity", "Glacier2/Session", "IceStorm/IceStorm"],
                "modules": [{ "name": "App", "content": [] }],
            }),
        ),
        ("Ice/Identity", declaring(&["Ice"])),
        ("Glacier2/Session", declaring(&["Glacier2"])),
        ("IceStorm/IceStorm", declaring(&["IceStorm"])),
    ]);

    let imports = plan_imports("App/Main", &modules, false).unwrap();
    assert_eq!(imports, "import { Ice, Glacier2, IceStorm } from \"ice\";\n");
}

#[test]
fn project_includes_use_depth_relative_paths() {
    let modules = modules(vec![
        (
            "a/b/Main",
            json!({
                "includes": ["shared/Types", "shared/More", "Ice/Identity"],
                "modules": [{ "name": "Main", "content": [] }],
            }),
        ),
        ("shared/Types", declaring(&["Shared", "Common"])),
        // Only re-declares a namespace that was already imported.
        ("shared/More", declaring(&["Shared"])),
        ("Ice/Identity", declaring(&["Ice"])),
    ]);

    let imports = plan_imports("a/b/Main", &modules, false).unwrap();
    assert_eq!(
        imports,
        "import { Ice } from \"ice\";\n\
         import { Shared, Common } from \"../../shared/Types\";\n\
         import \"../../shared/More\";\n"
    );
}

#[test]
fn ice_imports_flag_imports_built_ins_by_path() {
    let modules = modules(vec![
        (
            "Main",
            json!({
                "includes": ["Glacier2/Session", "Ice/Identity"],
                "modules": [{ "name": "Main", "content": [] }],
            }),
        ),
        ("Glacier2/Session", declaring(&["Glacier2"])),
        ("Ice/Identity", declaring(&["Ice"])),
    ]);

    let imports = plan_imports("Main", &modules, true).unwrap();
    assert_eq!(
        imports,
        "import { Ice } from \"ice\";\n\
         import { Glacier2 } from \"Glacier2/Session\";\n\
         import \"Ice/Identity\";\n"
    );
}

#[test]
fn reserved_namespace_names_are_escaped() {
    let modules = modules(vec![
        (
            "Main",
            json!({ "includes": ["lib/Enum"], "modules": [{ "name": "Main", "content": [] }] }),
        ),
        ("lib/Enum", declaring(&["enum"])),
    ]);

    let imports = plan_imports("Main", &modules, false).unwrap();
    assert!(imports.contains("import { _enum } from \"lib/Enum\";"));
}

#[test]
fn missing_include_is_reported() {
    let modules = modules(vec![(
        "Main",
        json!({ "includes": ["Gone"], "modules": [] }),
    )]);

    let err = plan_imports("Main", &modules, false).unwrap_err();
    assert_eq!(err.to_string(), "Slice file was not loaded: Gone.ice");
}
