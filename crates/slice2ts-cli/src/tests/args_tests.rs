use clap::Parser;
use std::path::{Path, PathBuf};

use super::args::CliArgs;

#[test]
fn parses_defaults() {
    let args = CliArgs::try_parse_from(["slice2ts"]).expect("default args should parse");

    assert!(args.files.is_empty());
    assert!(args.root_dirs.is_empty());
    assert!(args.out_dir.is_none());
    assert!(args.project.is_none());
    assert!(!args.no_js);
    assert!(!args.ice_imports);
    assert!(!args.index);
    assert!(!args.no_nullable_values);
    assert!(args.parser.is_none());
}

#[test]
fn parses_all_flags() {
    let args = CliArgs::try_parse_from([
        "slice2ts",
        "--root-dir",
        "slice",
        "--root-dir",
        "vendor/slice",
        "-e",
        "slice/Internal/**",
        "-o",
        "generated",
        "--no-js",
        "--ice-imports",
        "-i",
        "Demo::Hidden",
        "--ignore",
        "::Demo::Secret",
        "--index",
        "--no-nullable-values",
        "--parser",
        "json",
        "--formatter",
        "prettier --stdin-filepath {file}",
        "slice/**/*.ice",
        "extra/Main.ice",
    ])
    .expect("flagged args should parse");

    assert_eq!(
        args.root_dirs,
        vec![PathBuf::from("slice"), PathBuf::from("vendor/slice")]
    );
    assert_eq!(args.exclude, vec!["slice/Internal/**".to_string()]);
    assert_eq!(args.out_dir.as_deref(), Some(Path::new("generated")));
    assert!(args.no_js);
    assert!(args.ice_imports);
    assert_eq!(args.ignore, vec!["Demo::Hidden", "::Demo::Secret"]);
    assert!(args.index);
    assert!(args.no_nullable_values);
    assert_eq!(args.parser.as_deref(), Some("json"));
    assert_eq!(
        args.formatter.as_deref(),
        Some("prettier --stdin-filepath {file}")
    );
    assert_eq!(args.files, vec!["slice/**/*.ice", "extra/Main.ice"]);
}

#[test]
fn rejects_unknown_flags() {
    assert!(CliArgs::try_parse_from(["slice2ts", "--cjs", "A.ice"]).is_err());
}
