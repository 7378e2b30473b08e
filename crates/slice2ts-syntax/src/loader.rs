//! Loading input Slice files and their transitive includes.
//!
//! Every file is identified by its module name: the path relative to the
//! root dir it was found in, `/` separated, without the `.ice` extension.
//! Includes are resolved against the root dirs in order, and each distinct
//! name is read and parsed exactly once no matter how many files include it.
//! Each include frontier is loaded in parallel.

use crate::ast::SliceSource;
use crate::parser::{SliceParser, SyntaxError};
use indexmap::IndexMap;
use rayon::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, debug_span};

const SLICE_EXTENSION: &str = "ice";

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Slice file {} is not contained in any of the root dirs", path.display())]
    NotInRootDir { path: PathBuf },
    #[error("Invalid slice file extension: {path}")]
    InvalidExtension { path: String },
    #[error("Failed to load slice file: {name}.ice")]
    NotFound { name: String },
    #[error("Failed to read slice file {name}.ice: {source}")]
    Io {
        name: String,
        #[source]
        source: io::Error,
    },
    #[error("{name}.ice\n{source}")]
    Parse {
        name: String,
        #[source]
        source: SyntaxError,
    },
}

/// Raw text of a Slice file together with the root dir it came from.
#[derive(Debug, Clone)]
pub struct SourceText {
    pub root_dir: PathBuf,
    pub contents: String,
}

/// Lookup of Slice files relative to a set of root dirs.
pub trait SourceFiles: Sync {
    /// Read `relative_path` from the first root dir containing it.
    ///
    /// Returns `Ok(None)` when no root dir has the file.
    fn read(&self, relative_path: &str) -> io::Result<Option<SourceText>>;
}

/// Root dirs on the local filesystem.
#[derive(Debug, Clone)]
pub struct FsSourceFiles {
    root_dirs: Vec<PathBuf>,
}

impl FsSourceFiles {
    pub fn new(root_dirs: Vec<PathBuf>) -> Self {
        FsSourceFiles { root_dirs }
    }

    pub fn root_dirs(&self) -> &[PathBuf] {
        &self.root_dirs
    }
}

impl SourceFiles for FsSourceFiles {
    fn read(&self, relative_path: &str) -> io::Result<Option<SourceText>> {
        for root_dir in &self.root_dirs {
            let path = root_dir.join(relative_path);
            match std::fs::read_to_string(&path) {
                Ok(contents) => {
                    return Ok(Some(SourceText {
                        root_dir: root_dir.clone(),
                        contents,
                    }));
                }
                Err(err) if err.kind() == io::ErrorKind::NotFound => continue,
                Err(err) => return Err(err),
            }
        }
        Ok(None)
    }
}

/// In-memory files keyed by relative path, all under one virtual root.
#[derive(Debug, Clone, Default)]
pub struct MemorySourceFiles {
    files: FxHashMap<String, String>,
}

impl MemorySourceFiles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, relative_path: &str, contents: &str) -> Self {
        self.insert(relative_path, contents);
        self
    }

    pub fn insert(&mut self, relative_path: &str, contents: &str) {
        self.files
            .insert(relative_path.to_string(), contents.to_string());
    }
}

impl SourceFiles for MemorySourceFiles {
    fn read(&self, relative_path: &str) -> io::Result<Option<SourceText>> {
        Ok(self.files.get(relative_path).map(|contents| SourceText {
            root_dir: PathBuf::new(),
            contents: contents.clone(),
        }))
    }
}

/// One parsed Slice file.
#[derive(Debug, Clone)]
pub struct LoadedModule {
    /// Module name, e.g. `Ice/Identity`.
    pub name: String,
    /// Root dir the file was found in.
    pub root_dir: PathBuf,
    /// Raw Slice text.
    pub contents: String,
    pub parsed: SliceSource,
}

impl LoadedModule {
    pub fn new(name: impl Into<String>, contents: impl Into<String>, parsed: SliceSource) -> Self {
        LoadedModule {
            name: name.into(),
            root_dir: PathBuf::new(),
            contents: contents.into(),
            parsed,
        }
    }
}

/// Every loaded file keyed by module name, in load order.
#[derive(Debug, Clone, Default)]
pub struct LoadedModules {
    modules: IndexMap<String, LoadedModule>,
}

impl LoadedModules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, module: LoadedModule) {
        self.modules.insert(module.name.clone(), module);
    }

    pub fn get(&self, name: &str) -> Option<&LoadedModule> {
        self.modules.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LoadedModule> {
        self.modules.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.modules.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl FromIterator<LoadedModule> for LoadedModules {
    fn from_iter<I: IntoIterator<Item = LoadedModule>>(iter: I) -> Self {
        let mut modules = LoadedModules::new();
        for module in iter {
            modules.insert(module);
        }
        modules
    }
}

/// Result of [`load_modules`].
#[derive(Debug, Clone)]
pub struct LoadResult {
    /// Module names of the input files, in input order.
    pub input_names: Vec<String>,
    /// Inputs plus everything they transitively include.
    pub modules: LoadedModules,
}

/// Module name of an input file: its path relative to the root dir that
/// yields the shortest relative path, without the `.ice` extension.
pub fn module_name_for_path(path: &Path, root_dirs: &[PathBuf]) -> Result<String, LoadError> {
    let relative = root_dirs
        .iter()
        .filter_map(|root_dir| path.strip_prefix(root_dir).ok())
        .filter(|relative| !relative.as_os_str().is_empty())
        .min_by_key(|relative| relative.as_os_str().len())
        .ok_or_else(|| LoadError::NotInRootDir {
            path: path.to_path_buf(),
        })?;

    let relative = relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");

    match relative.strip_suffix(SLICE_EXTENSION) {
        Some(stem) if stem.ends_with('.') && stem.len() > 1 => {
            Ok(stem[..stem.len() - 1].to_string())
        }
        _ => Err(LoadError::InvalidExtension { path: relative }),
    }
}

fn load_module(
    name: &str,
    files: &dyn SourceFiles,
    parser: &dyn SliceParser,
) -> Result<LoadedModule, LoadError> {
    let relative_path = format!("{name}.{SLICE_EXTENSION}");

    let source = files
        .read(&relative_path)
        .map_err(|source| LoadError::Io {
            name: name.to_string(),
            source,
        })?
        .ok_or_else(|| LoadError::NotFound {
            name: name.to_string(),
        })?;

    let parsed = parser
        .parse(&source.contents)
        .map_err(|source| LoadError::Parse {
            name: name.to_string(),
            source,
        })?;

    debug!(
        module = name,
        root_dir = %source.root_dir.display(),
        includes = parsed.includes.len(),
        "loaded slice"
    );

    Ok(LoadedModule {
        name: name.to_string(),
        root_dir: source.root_dir,
        contents: source.contents,
        parsed,
    })
}

/// Load `input_names` and everything they transitively include.
pub fn load_modules(
    input_names: &[String],
    files: &dyn SourceFiles,
    parser: &dyn SliceParser,
) -> Result<LoadResult, LoadError> {
    let _span = debug_span!("load_modules", inputs = input_names.len()).entered();

    let mut seen: FxHashSet<String> = FxHashSet::default();
    let mut frontier: Vec<String> = Vec::new();
    for name in input_names {
        if seen.insert(name.clone()) {
            frontier.push(name.clone());
        }
    }

    let mut modules = LoadedModules::new();

    while !frontier.is_empty() {
        let loaded: Vec<Result<LoadedModule, LoadError>> = frontier
            .par_iter()
            .map(|name| load_module(name, files, parser))
            .collect();

        let mut next = Vec::new();
        for module in loaded {
            let module = module?;
            for include in &module.parsed.includes {
                if seen.insert(include.clone()) {
                    next.push(include.clone());
                }
            }
            modules.insert(module);
        }
        frontier = next;
    }

    Ok(LoadResult {
        input_names: input_names.to_vec(),
        modules,
    })
}
