use serde_json::json;
use slice2ts_emitter::{
    generate_index_declarations, generate_index_module, generate_namespace, namespace_file_paths,
    namespace_usage,
};
use slice2ts_syntax::{LoadedModule, LoadedModules, SliceSource};

fn declaring(name: &str, namespaces: &[&str]) -> LoadedModule {
    let modules: Vec<_> = namespaces
        .iter()
        .map(|namespace| json!({ "name": namespace, "content": [] }))
        .collect();
    let parsed: SliceSource =
        serde_json::from_value(json!({ "modules": modules })).expect("valid declaration tree");
    LoadedModule::new(name, "", parsed)
}

fn names(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

#[test]
fn usage_lists_declaring_inputs_in_order() {
    let modules: LoadedModules = [
        declaring("a/One", &["Shared", "Only"]),
        declaring("b/Two", &["Shared"]),
        declaring("inc/Included", &["Shared", "Extra"]),
    ]
    .into_iter()
    .collect();

    let usage = namespace_usage(&names(&["a/One", "b/Two"]), &modules).unwrap();

    assert_eq!(usage.keys().collect::<Vec<_>>(), ["Shared", "Only"]);
    assert_eq!(usage["Shared"], names(&["a/One", "b/Two"]));
    assert_eq!(usage["Only"], names(&["a/One"]));
}

#[test]
fn namespace_file_sits_in_deepest_shared_directory() {
    let modules: LoadedModules = [
        declaring("A/B/C", &["Foo", "Bar"]),
        declaring("A/D/E", &["Foo"]),
        declaring("Top", &["Baz"]),
        declaring("X/Y", &["Baz"]),
    ]
    .into_iter()
    .collect();

    let usage = namespace_usage(&names(&["A/B/C", "A/D/E", "Top", "X/Y"]), &modules).unwrap();
    let paths = namespace_file_paths(&usage);

    assert_eq!(paths["Foo"], "A/Foo.ns.d.ts");
    assert_eq!(paths["Bar"], "A/B/Bar.ns.d.ts");
    assert_eq!(paths["Baz"], "Baz.ns.d.ts");
}

#[test]
fn unknown_input_is_an_error() {
    let modules = LoadedModules::new();
    let err = namespace_usage(&names(&["Missing"]), &modules).unwrap_err();
    assert_eq!(err.to_string(), "Slice file was not loaded: Missing.ice");
}

#[test]
fn namespace_file_is_an_empty_namespace() {
    assert_eq!(generate_namespace("Demo"), "export namespace Demo {}\n");
    assert_eq!(generate_namespace("default"), "export namespace _default {}\n");
}

#[test]
fn index_files_reexport_from_first_declaring_file() {
    let files = names(&["a/One", "b/Two", "c/Three"]);

    assert_eq!(
        generate_index_module("Shared", &files),
        "exports.Shared = require('./a/One').Shared;\nrequire('./b/Two');\nrequire('./c/Three');\n"
    );
    assert_eq!(
        generate_index_declarations("Shared", &files),
        "export {Shared} from './a/One';\nimport './b/Two';\nimport './c/Three';\n"
    );
}
