use anyhow::{Context, Result};
use globset::{Glob, GlobBuilder, GlobMatcher, GlobSet, GlobSetBuilder};
use indexmap::IndexSet;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

const GLOB_META: &[char] = &['*', '?', '[', '{'];

/// `path` joined onto `base` unless already absolute, without `.` segments.
pub fn absolutize(base: &Path, path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };
    joined
        .components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect()
}

/// Files matching any of `patterns` and none of `excludes`.
///
/// Patterns are absolute paths or globs. A plain path matches only an
/// existing file. Matches keep pattern order, sorted within each pattern,
/// and a file matched twice is listed once.
pub fn resolve_globs(patterns: &[String], excludes: &[String]) -> Result<Vec<PathBuf>> {
    let excludes = build_glob_set(excludes)?;
    let mut paths = IndexSet::new();

    for pattern in patterns {
        if !is_glob(pattern) {
            let path = PathBuf::from(pattern);
            if path.is_file() && !excludes.is_match(&path) {
                paths.insert(path);
            }
            continue;
        }

        let matcher = compile_glob(pattern)?.compile_matcher();
        let mut matched = walk_matches(&glob_base(pattern), &matcher, &excludes);
        matched.sort();
        paths.extend(matched);
    }

    Ok(paths.into_iter().collect())
}

fn walk_matches(base: &Path, matcher: &GlobMatcher, excludes: &GlobSet) -> Vec<PathBuf> {
    WalkDir::new(base)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| matcher.is_match(path) && !excludes.is_match(path))
        .collect()
}

fn is_glob(pattern: &str) -> bool {
    pattern.contains(GLOB_META)
}

fn compile_glob(pattern: &str) -> Result<Glob> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .with_context(|| format!("invalid glob: {pattern}"))
}

fn build_glob_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(compile_glob(pattern)?);
    }
    builder.build().context("failed to build exclude globs")
}

/// Deepest directory of `pattern` without glob syntax.
fn glob_base(pattern: &str) -> PathBuf {
    let base: PathBuf = Path::new(pattern)
        .components()
        .take_while(|component| !component.as_os_str().to_string_lossy().contains(GLOB_META))
        .collect();
    if base.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        base
    }
}

/// Write `contents` to `path`, creating parent directories.
pub fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory: {}", parent.display()))?;
    }
    std::fs::write(path, contents)
        .with_context(|| format!("failed to write file: {}", path.display()))
}
