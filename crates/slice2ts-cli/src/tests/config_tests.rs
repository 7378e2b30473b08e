use clap::Parser;
use std::path::{Path, PathBuf};

use super::args::CliArgs;
use super::config::{
    ParserChoice, ProjectConfig, load_options, parse_project, resolve_options,
};

fn args(argv: &[&str]) -> CliArgs {
    let mut full = vec!["slice2ts"];
    full.extend_from_slice(argv);
    CliArgs::try_parse_from(full).expect("args parse")
}

#[test]
fn parses_camel_case_project_file() {
    let config = parse_project(
        r#"{
          "files": ["slice/**/*.ice"],
          "rootDirs": ["slice"],
          "outDir": "generated",
          "noJs": "true",
          "iceImports": true,
          "ignore": ["Demo::Hidden"],
          "noNullableValues": false
        }"#,
    )
    .expect("project parses");

    assert_eq!(config.files, Some(vec!["slice/**/*.ice".to_string()]));
    assert_eq!(config.root_dirs, Some(vec!["slice".to_string()]));
    assert_eq!(config.out_dir.as_deref(), Some("generated"));
    assert_eq!(config.no_js, Some(true));
    assert_eq!(config.ice_imports, Some(true));
    assert_eq!(config.no_nullable_values, Some(false));
    assert!(config.index.is_none());
}

#[test]
fn rejects_unknown_keys_and_bad_booleans() {
    assert!(parse_project(r#"{ "outdir": "x" }"#).is_err());
    assert!(parse_project(r#"{ "noJs": "sometimes" }"#).is_err());
}

#[test]
fn defaults_are_relative_to_the_working_directory() {
    let cwd = Path::new("/work");
    let options = resolve_options(&args(&["Demo.ice"]), None, cwd).expect("resolves");

    assert_eq!(options.files, vec!["/work/Demo.ice".to_string()]);
    assert_eq!(options.root_dirs, vec![PathBuf::from("/work")]);
    assert_eq!(options.out_dir, PathBuf::from("/work"));
    assert_eq!(options.compiler.as_deref(), Some("slice2js"));
    assert_eq!(options.parser, ParserChoice::Command("slice2json".to_string()));
    assert!(options.formatter.is_none());
    assert!(!options.index);
}

#[test]
fn project_paths_are_relative_to_the_project_directory() {
    let config = ProjectConfig {
        files: Some(vec!["./slice/*.ice".to_string()]),
        exclude: Some(vec!["slice/Skip.ice".to_string()]),
        root_dirs: Some(vec!["slice".to_string()]),
        slice_dir: Some("node_modules/ice/slice".to_string()),
        out_dir: Some("out".to_string()),
        ..ProjectConfig::default()
    };

    let options = resolve_options(
        &args(&["-e", "Local.ice"]),
        Some((&config, Path::new("/repo/project"))),
        Path::new("/work"),
    )
    .expect("resolves");

    assert_eq!(options.files, vec!["/repo/project/slice/*.ice".to_string()]);
    assert_eq!(
        options.exclude,
        vec![
            "/repo/project/slice/Skip.ice".to_string(),
            "/work/Local.ice".to_string()
        ]
    );
    assert_eq!(
        options.root_dirs,
        vec![
            PathBuf::from("/repo/project/slice"),
            PathBuf::from("/repo/project/node_modules/ice/slice")
        ]
    );
    assert_eq!(options.out_dir, PathBuf::from("/repo/project/out"));
}

#[test]
fn command_line_overrides_project_file() {
    let config = ProjectConfig {
        files: Some(vec!["slice/*.ice".to_string()]),
        root_dirs: Some(vec!["slice".to_string()]),
        out_dir: Some("out".to_string()),
        parser: Some("my-parser".to_string()),
        ignore: Some(vec!["::Demo::FromProject".to_string()]),
        ..ProjectConfig::default()
    };

    let options = resolve_options(
        &args(&[
            "--root-dir",
            "src",
            "-o",
            "gen",
            "--parser",
            "json",
            "--no-js",
            "-i",
            "Demo::FromArgs",
            "src/Main.ice",
        ]),
        Some((&config, Path::new("/repo"))),
        Path::new("/work"),
    )
    .expect("resolves");

    assert_eq!(options.files, vec!["/work/src/Main.ice".to_string()]);
    assert_eq!(options.root_dirs, vec![PathBuf::from("/work/src")]);
    assert_eq!(options.out_dir, PathBuf::from("/work/gen"));
    assert_eq!(options.parser, ParserChoice::JsonTree);
    assert!(options.compiler.is_none());
    assert!(options.typings.ignore.contains("Demo::FromProject"));
    assert!(options.typings.ignore.contains("Demo::FromArgs"));
}

#[test]
fn missing_inputs_are_an_error() {
    let err = resolve_options(&args(&[]), None, Path::new("/work")).expect_err("no files");
    assert!(err.to_string().contains("no input files"));
}

#[test]
fn load_options_picks_up_the_project_file_in_the_working_directory() {
    let dir = tempfile::tempdir().expect("temp dir");
    std::fs::write(
        dir.path().join("slice2ts.json"),
        r#"{ "files": ["*.ice"], "index": true, "parser": "json" }"#,
    )
    .expect("write project");

    let options = load_options(&args(&[]), dir.path()).expect("options load");

    assert!(options.index);
    assert_eq!(options.parser, ParserChoice::JsonTree);
    assert_eq!(
        options.files,
        vec![dir.path().join("*.ice").to_string_lossy().into_owned()]
    );
}

#[test]
fn explicit_missing_project_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = load_options(&args(&["-p", "nope.json", "A.ice"]), dir.path())
        .expect_err("project is missing");
    assert!(err.to_string().contains("project file not found"));
}

#[test]
fn invalid_project_file_names_the_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    std::fs::write(dir.path().join("slice2ts.json"), "{ not json").expect("write project");

    let err = load_options(&args(&["A.ice"]), dir.path()).expect_err("parse fails");
    assert!(format!("{err:#}").contains("failed to parse project file"));
}
