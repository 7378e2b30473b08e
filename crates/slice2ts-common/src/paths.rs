//! Slash separated module-relative paths.
//!
//! Module names (`A/B/C` for `A/B/C.ice`) and every path derived from them
//! are always `/` separated regardless of the host platform, so these helpers
//! work on strings rather than `std::path`.

/// Directory part of a module-relative path; `"."` for a bare name.
pub fn dirname(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) => "/",
        Some(idx) => &path[..idx],
        None => ".",
    }
}

/// Number of `/` separated segments.
pub fn depth(path: &str) -> usize {
    path.split('/').count()
}

/// Normalized segments of a directory, dropping `.` and empty segments.
fn segments(path: &str) -> Vec<&str> {
    path.split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect()
}

/// Join two relative paths.
pub fn join(dir: &str, file: &str) -> String {
    let mut parts = segments(dir);
    parts.extend(segments(file));
    parts.join("/")
}

/// Deepest directory shared by every entry of `dirs`, `""` when they only
/// share the root.
pub fn common_dir<'a, I>(dirs: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut common: Option<Vec<&str>> = None;

    for dir in dirs {
        let parts = segments(dir);
        common = Some(match common {
            None => parts,
            Some(prev) => prev
                .into_iter()
                .zip(parts)
                .take_while(|(a, b)| a == b)
                .map(|(a, _)| a)
                .collect(),
        });
    }

    common.unwrap_or_default().join("/")
}

/// Relative path from directory `from` to path `to`, both relative to the
/// same root.
pub fn relative(from: &str, to: &str) -> String {
    let from = segments(from);
    let to = segments(to);

    let shared = from
        .iter()
        .zip(to.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<&str> = Vec::with_capacity(from.len() - shared + to.len() - shared);
    parts.extend(std::iter::repeat_n("..", from.len() - shared));
    parts.extend(&to[shared..]);
    parts.join("/")
}

/// Relative path usable as an ES module specifier (always starts with `.`).
pub fn module_specifier(from_dir: &str, to: &str) -> String {
    let rel = relative(from_dir, to);
    if rel.starts_with('.') {
        rel
    } else {
        format!("./{rel}")
    }
}
