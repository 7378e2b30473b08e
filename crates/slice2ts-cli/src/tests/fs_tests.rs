use std::path::{Path, PathBuf};

use super::fs::{absolutize, resolve_globs, write_file};

fn touch(root: &Path, relative: &str) -> PathBuf {
    let path = root.join(relative);
    write_file(&path, "{}").expect("write fixture");
    path
}

fn pattern(root: &Path, glob: &str) -> String {
    root.join(glob).to_string_lossy().into_owned()
}

#[test]
fn absolutize_drops_current_dir_segments() {
    assert_eq!(
        absolutize(Path::new("/work"), Path::new("./slice/./A.ice")),
        PathBuf::from("/work/slice/A.ice")
    );
    assert_eq!(
        absolutize(Path::new("/work"), Path::new("/abs/B.ice")),
        PathBuf::from("/abs/B.ice")
    );
}

#[test]
fn globs_match_recursively_and_sorted() {
    let dir = tempfile::tempdir().expect("temp dir");
    let root = dir.path();
    let b = touch(root, "slice/B.ice");
    let a = touch(root, "slice/A.ice");
    let nested = touch(root, "slice/Inner/C.ice");
    touch(root, "slice/readme.txt");

    let paths = resolve_globs(&[pattern(root, "slice/**/*.ice")], &[]).expect("globs resolve");

    assert_eq!(paths, vec![a, b, nested]);
}

#[test]
fn single_star_stays_in_one_directory() {
    let dir = tempfile::tempdir().expect("temp dir");
    let root = dir.path();
    let top = touch(root, "slice/Top.ice");
    touch(root, "slice/Inner/Deep.ice");

    let paths = resolve_globs(&[pattern(root, "slice/*.ice")], &[]).expect("globs resolve");

    assert_eq!(paths, vec![top]);
}

#[test]
fn excludes_and_duplicates_are_dropped() {
    let dir = tempfile::tempdir().expect("temp dir");
    let root = dir.path();
    let main = touch(root, "slice/Main.ice");
    touch(root, "slice/Internal/Hidden.ice");

    let paths = resolve_globs(
        &[
            pattern(root, "slice/Main.ice"),
            pattern(root, "slice/**/*.ice"),
        ],
        &[pattern(root, "slice/Internal/**")],
    )
    .expect("globs resolve");

    assert_eq!(paths, vec![main]);
}

#[test]
fn plain_paths_keep_pattern_order_and_must_exist() {
    let dir = tempfile::tempdir().expect("temp dir");
    let root = dir.path();
    let z = touch(root, "Z.ice");
    let a = touch(root, "A.ice");

    let paths = resolve_globs(
        &[
            pattern(root, "Z.ice"),
            pattern(root, "Missing.ice"),
            pattern(root, "A.ice"),
        ],
        &[],
    )
    .expect("globs resolve");

    assert_eq!(paths, vec![z, a]);
}

#[test]
fn invalid_glob_is_an_error() {
    let err = resolve_globs(&["/tmp/[unclosed.ice".to_string()], &[]).expect_err("bad glob");
    assert!(err.to_string().contains("invalid glob"));
}
