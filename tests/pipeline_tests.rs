//! Whole-run behavior over in-memory Slice trees.

use serde_json::{Value, json};
use slice2ts::emitter::GenerateError;
use slice2ts::syntax::{LoadError, MemorySourceFiles};
use slice2ts::{JsonTreeParser, PipelineError, TypingsOptions, generate};

fn files(entries: &[(&str, Value)]) -> MemorySourceFiles {
    let mut files = MemorySourceFiles::new();
    for (name, tree) in entries {
        files.insert(&format!("{name}.ice"), &tree.to_string());
    }
    files
}

fn names(inputs: &[&str]) -> Vec<String> {
    inputs.iter().map(|name| name.to_string()).collect()
}

fn module(name: &str, content: Value) -> Value {
    json!({ "name": name, "content": content })
}

fn field(name: &str, data_type: &str) -> Value {
    json!({ "type": "field", "name": name, "dataType": data_type })
}

/// `Demo/Base` declares `Demo::Base`; `Demo/Derived` reopens `Demo` and
/// extends it.
fn reopened_demo() -> MemorySourceFiles {
    files(&[
        (
            "Demo/Base",
            json!({ "modules": [module("Demo", json!([
                { "type": "class", "name": "Base", "content": [field("id", "long")] }
            ]))] }),
        ),
        (
            "Demo/Derived",
            json!({
                "includes": ["Demo/Base"],
                "modules": [module("Demo", json!([
                    { "type": "class", "name": "Derived", "extends": "Base",
                      "content": [field("label", "string")] },
                    { "type": "dictionary", "name": "ById", "keyType": "long", "valueType": "Base" }
                ]))]
            }),
        ),
    ])
}

#[test]
fn reopened_module_resolves_across_files() {
    let output = generate(
        &names(&["Demo/Base", "Demo/Derived"]),
        &reopened_demo(),
        &JsonTreeParser,
        &TypingsOptions::default(),
        false,
    )
    .expect("pipeline runs");

    assert!(output.failures.is_empty(), "{:?}", output.failures);
    assert_eq!(output.get("Demo/Demo.ns.d.ts"), Some("export namespace Demo {}\n"));

    let derived = output.get("Demo/Derived.d.ts").expect("derived typings");
    assert!(derived.contains("import { Demo } from \"../Demo/Base\";"));
    assert!(derived.contains("class Derived extends Base {"));
    assert!(derived.contains("constructor(id?: Ice.Long, label?: string);"));
    assert!(derived.contains("type ById = Ice.HashMap<Ice.Long, Base | null>;"));
}

#[test]
fn generation_is_deterministic() {
    let run = || {
        generate(
            &names(&["Demo/Derived", "Demo/Base"]),
            &reopened_demo(),
            &JsonTreeParser,
            &TypingsOptions::default(),
            true,
        )
        .expect("pipeline runs")
        .files
    };

    assert_eq!(run(), run());
}

#[test]
fn index_lists_declaring_files_in_input_order() {
    let output = generate(
        &names(&["Demo/Derived", "Demo/Base"]),
        &reopened_demo(),
        &JsonTreeParser,
        &TypingsOptions::default(),
        true,
    )
    .expect("pipeline runs");

    assert_eq!(
        output.get("Demo.js"),
        Some("exports.Demo = require('./Demo/Derived').Demo;\nrequire('./Demo/Base');\n")
    );
    assert_eq!(
        output.get("Demo.d.ts"),
        Some("export {Demo} from './Demo/Derived';\nimport './Demo/Base';\n")
    );
}

#[test]
fn one_failing_file_does_not_stop_the_others() {
    let files = files(&[
        (
            "Good",
            json!({ "modules": [module("Good", json!([
                { "type": "struct", "name": "Ok", "fields": [field("n", "int")] }
            ]))] }),
        ),
        (
            "Bad",
            json!({ "modules": [module("Bad", json!([
                { "type": "struct", "name": "Broken", "fields": [field("n", "Nowhere::Thing")] }
            ]))] }),
        ),
    ]);

    let output = generate(
        &names(&["Bad", "Good"]),
        &files,
        &JsonTreeParser,
        &TypingsOptions::default(),
        false,
    )
    .expect("pipeline runs");

    assert!(output.get("Good.d.ts").is_some());
    assert!(output.get("Bad.d.ts").is_none());
    assert_eq!(output.failures.len(), 1);
    assert!(matches!(
        &output.failures[0],
        GenerateError::InFile { file, .. } if file == "Bad"
    ));
    assert_eq!(
        output.failures[0].to_string(),
        "Bad: Module not found: Nowhere"
    );
}

#[test]
fn missing_include_stops_the_run() {
    let files = files(&[(
        "Main",
        json!({ "includes": ["Gone"], "modules": [module("Main", json!([]))] }),
    )]);

    let err = generate(
        &names(&["Main"]),
        &files,
        &JsonTreeParser,
        &TypingsOptions::default(),
        false,
    )
    .expect_err("include is missing");

    assert!(matches!(err, PipelineError::Load(LoadError::NotFound { ref name }) if name == "Gone"));
}

#[test]
fn duplicate_declarations_stop_the_run() {
    let point = json!({ "modules": [module("Demo", json!([
        { "type": "struct", "name": "Point", "fields": [] }
    ]))] });
    let files = files(&[("A", point.clone()), ("B", point)]);

    let err = generate(
        &names(&["A", "B"]),
        &files,
        &JsonTreeParser,
        &TypingsOptions::default(),
        false,
    )
    .expect_err("Point is declared twice");

    assert!(matches!(err, PipelineError::Bind(_)));
    assert_eq!(err.to_string(), "Duplicate declaration of ::Demo::Point in B");
}
