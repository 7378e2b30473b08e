use slice2ts_syntax::{
    FsSourceFiles, JsonTreeParser, LoadError, MemorySourceFiles, load_modules,
    module_name_for_path,
};
use std::path::PathBuf;

fn tree(includes: &[&str], modules: &[&str]) -> String {
    let includes: Vec<String> = includes.iter().map(|name| format!("\"{name}\"")).collect();
    let modules: Vec<String> = modules
        .iter()
        .map(|name| format!(r#"{{"type": "module", "name": "{name}", "content": []}}"#))
        .collect();
    format!(
        r#"{{"includes": [{}], "modules": [{}]}}"#,
        includes.join(", "),
        modules.join(", ")
    )
}

#[test]
fn loads_transitive_includes_once() {
    let files = MemorySourceFiles::new()
        .with_file("App/Main.ice", &tree(&["App/Shared", "Lib/Util"], &["App"]))
        .with_file("App/Shared.ice", &tree(&["Lib/Util"], &["App"]))
        .with_file("Lib/Util.ice", &tree(&[], &["Lib"]));

    let result = load_modules(&["App/Main".to_string()], &files, &JsonTreeParser)
        .expect("load succeeds");

    assert_eq!(result.input_names, vec!["App/Main".to_string()]);
    assert_eq!(result.modules.len(), 3);
    let names: Vec<_> = result.modules.names().collect();
    assert_eq!(names[0], "App/Main");
    assert!(result.modules.contains("App/Shared"));
    assert!(result.modules.contains("Lib/Util"));
}

#[test]
fn missing_include_is_reported() {
    let files = MemorySourceFiles::new().with_file("Main.ice", &tree(&["Missing"], &["App"]));

    let err = load_modules(&["Main".to_string()], &files, &JsonTreeParser)
        .expect_err("include is missing");

    assert!(matches!(err, LoadError::NotFound { ref name } if name == "Missing"));
    assert_eq!(err.to_string(), "Failed to load slice file: Missing.ice");
}

#[test]
fn parse_errors_carry_the_file_name() {
    let files = MemorySourceFiles::new().with_file("Broken.ice", "{ not json");

    let err = load_modules(&["Broken".to_string()], &files, &JsonTreeParser)
        .expect_err("parse fails");

    assert!(err.to_string().starts_with("Broken.ice\n"));
}

#[test]
fn module_names_use_the_shortest_root_relative_path() {
    let roots = vec![PathBuf::from("/work"), PathBuf::from("/work/slice")];

    let name = module_name_for_path(&PathBuf::from("/work/slice/Demo/Hello.ice"), &roots)
        .expect("inside root");
    assert_eq!(name, "Demo/Hello");

    let err = module_name_for_path(&PathBuf::from("/elsewhere/Hello.ice"), &roots)
        .expect_err("outside roots");
    assert!(matches!(err, LoadError::NotInRootDir { .. }));

    let err = module_name_for_path(&PathBuf::from("/work/Hello.txt"), &roots)
        .expect_err("wrong extension");
    assert!(matches!(err, LoadError::InvalidExtension { .. }));
}

#[test]
fn filesystem_roots_are_searched_in_order() {
    let first = tempfile::tempdir().expect("temp dir");
    let second = tempfile::tempdir().expect("temp dir");

    std::fs::create_dir_all(second.path().join("Lib")).expect("mkdir");
    std::fs::write(first.path().join("Main.ice"), tree(&["Lib/Util"], &["App"]))
        .expect("write main");
    std::fs::write(second.path().join("Lib/Util.ice"), tree(&[], &["Lib"]))
        .expect("write util");

    let files = FsSourceFiles::new(vec![first.path().to_path_buf(), second.path().to_path_buf()]);
    let result =
        load_modules(&["Main".to_string()], &files, &JsonTreeParser).expect("load succeeds");

    let util = result.modules.get("Lib/Util").expect("include loaded");
    assert_eq!(util.root_dir, second.path());
    assert_eq!(util.parsed.modules[0].name, "Lib");
}
