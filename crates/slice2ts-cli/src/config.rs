//! Project file loading and option resolution.
//!
//! A `slice2ts.json` project file supplies defaults for every CLI option.
//! Relative paths and globs in it are taken relative to the file's own
//! directory; those given on the command line are relative to the working
//! directory. Command line values win.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Deserializer};
use slice2ts_emitter::TypingsOptions;
use std::path::{Path, PathBuf};

use crate::args::CliArgs;
use crate::fs::absolutize;

pub const PROJECT_FILE_NAME: &str = "slice2ts.json";

const DEFAULT_PARSER: &str = "slice2json";
const DEFAULT_COMPILER: &str = "slice2js";
const JSON_TREE_PARSER: &str = "json";

/// Accepts `true` as well as `"true"` for boolean options.
fn deserialize_bool_or_string<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        String(String),
    }

    match Option::<BoolOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(BoolOrString::Bool(b)) => Ok(Some(b)),
        Some(BoolOrString::String(s)) => match s.trim().to_lowercase().as_str() {
            "true" => Ok(Some(true)),
            "false" => Ok(Some(false)),
            _ => Err(Error::custom(format!(
                "invalid boolean value: '{s}'. Expected true or false"
            ))),
        },
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProjectConfig {
    #[serde(default)]
    pub files: Option<Vec<String>>,
    #[serde(default)]
    pub exclude: Option<Vec<String>>,
    #[serde(default)]
    pub root_dirs: Option<Vec<String>>,
    #[serde(default)]
    pub slice_dir: Option<String>,
    #[serde(default)]
    pub out_dir: Option<String>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub no_js: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub ice_imports: Option<bool>,
    #[serde(default)]
    pub ignore: Option<Vec<String>>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub index: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub no_nullable_values: Option<bool>,
    #[serde(default)]
    pub parser: Option<String>,
    #[serde(default)]
    pub compiler: Option<String>,
    #[serde(default)]
    pub formatter: Option<String>,
}

/// How Slice text is turned into declaration trees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParserChoice {
    /// Input files already are JSON declaration trees.
    JsonTree,
    Command(String),
}

/// Options for one run, all paths absolute.
#[derive(Debug, Clone)]
pub struct ResolvedOptions {
    /// Absolute input paths or globs.
    pub files: Vec<String>,
    pub exclude: Vec<String>,
    /// Include search path, slice dir last.
    pub root_dirs: Vec<PathBuf>,
    pub out_dir: PathBuf,
    /// Runtime modules are produced with this compiler when set.
    pub compiler: Option<String>,
    pub index: bool,
    pub typings: TypingsOptions,
    pub parser: ParserChoice,
    pub formatter: Option<String>,
}

pub fn parse_project(source: &str) -> Result<ProjectConfig> {
    serde_json::from_str(source).context("invalid project file")
}

pub fn load_project(path: &Path) -> Result<ProjectConfig> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read project file: {}", path.display()))?;
    parse_project(&source)
        .with_context(|| format!("failed to parse project file: {}", path.display()))
}

/// Project file to use: the explicit one, else `slice2ts.json` in `cwd` if
/// present.
pub fn find_project(args: &CliArgs, cwd: &Path) -> Result<Option<PathBuf>> {
    match &args.project {
        Some(project) => {
            let path = absolutize(cwd, project);
            if path.is_dir() {
                return Ok(Some(path.join(PROJECT_FILE_NAME)));
            }
            if !path.is_file() {
                bail!("project file not found: {}", path.display());
            }
            Ok(Some(path))
        }
        None => {
            let path = cwd.join(PROJECT_FILE_NAME);
            Ok(path.is_file().then_some(path))
        }
    }
}

/// Resolve the options of a run started from `cwd`.
pub fn load_options(args: &CliArgs, cwd: &Path) -> Result<ResolvedOptions> {
    let project = match find_project(args, cwd)? {
        Some(path) => {
            let config = load_project(&path)?;
            let dir = path.parent().unwrap_or(cwd).to_path_buf();
            Some((config, dir))
        }
        None => None,
    };

    resolve_options(
        args,
        project.as_ref().map(|(config, dir)| (config, dir.as_path())),
        cwd,
    )
}

/// Merge command line arguments over a project file read from `project_dir`.
pub fn resolve_options(
    args: &CliArgs,
    project: Option<(&ProjectConfig, &Path)>,
    cwd: &Path,
) -> Result<ResolvedOptions> {
    let empty = ProjectConfig::default();
    let (config, config_dir) = project.unwrap_or((&empty, cwd));

    let from_args = |values: &[String]| -> Vec<String> {
        values.iter().map(|value| absolute_pattern(cwd, value)).collect()
    };
    let from_config = |values: &Option<Vec<String>>| -> Vec<String> {
        values
            .iter()
            .flatten()
            .map(|value| absolute_pattern(config_dir, value))
            .collect()
    };

    let files = if args.files.is_empty() {
        from_config(&config.files)
    } else {
        from_args(&args.files)
    };
    if files.is_empty() {
        bail!("no input files; pass Slice files or globs, or set \"files\" in {PROJECT_FILE_NAME}");
    }

    let mut exclude = from_config(&config.exclude);
    exclude.extend(from_args(&args.exclude));

    let mut root_dirs: Vec<PathBuf> = if !args.root_dirs.is_empty() {
        args.root_dirs.iter().map(|dir| absolutize(cwd, dir)).collect()
    } else if let Some(dirs) = &config.root_dirs {
        dirs.iter()
            .map(|dir| absolutize(config_dir, Path::new(dir)))
            .collect()
    } else {
        vec![absolutize(config_dir, Path::new("."))]
    };

    let slice_dir = match (&args.slice_dir, &config.slice_dir) {
        (Some(dir), _) => Some(absolutize(cwd, dir)),
        (None, Some(dir)) => Some(absolutize(config_dir, Path::new(dir))),
        (None, None) => None,
    };
    if let Some(dir) = slice_dir {
        if !root_dirs.contains(&dir) {
            root_dirs.push(dir);
        }
    }

    let out_dir = match (&args.out_dir, &config.out_dir) {
        (Some(dir), _) => absolutize(cwd, dir),
        (None, Some(dir)) => absolutize(config_dir, Path::new(dir)),
        (None, None) => absolutize(cwd, Path::new(".")),
    };

    let no_js = args.no_js || config.no_js.unwrap_or(false);
    let compiler = (!no_js).then(|| {
        args.compiler
            .clone()
            .or_else(|| config.compiler.clone())
            .unwrap_or_else(|| DEFAULT_COMPILER.to_string())
    });

    let parser = match args
        .parser
        .as_deref()
        .or(config.parser.as_deref())
        .unwrap_or(DEFAULT_PARSER)
    {
        JSON_TREE_PARSER => ParserChoice::JsonTree,
        command => ParserChoice::Command(command.to_string()),
    };

    let typings = TypingsOptions {
        ice_imports: args.ice_imports || config.ice_imports.unwrap_or(false),
        no_nullable_values: args.no_nullable_values
            || config.no_nullable_values.unwrap_or(false),
        ..TypingsOptions::default()
    }
    .with_ignored(config.ignore.iter().flatten().chain(args.ignore.iter()));

    Ok(ResolvedOptions {
        files,
        exclude,
        root_dirs,
        out_dir,
        compiler,
        index: args.index || config.index.unwrap_or(false),
        typings,
        parser,
        formatter: args.formatter.clone().or_else(|| config.formatter.clone()),
    })
}

fn absolute_pattern(base: &Path, pattern: &str) -> String {
    absolutize(base, Path::new(pattern))
        .to_string_lossy()
        .into_owned()
}
