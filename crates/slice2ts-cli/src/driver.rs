//! One generation run: resolve inputs, load, bind, then write every output.
//!
//! Failures before generation (bad globs, unreadable or unparsable Slice
//! files, conflicting declarations) abort the run. Once the scope tree is
//! built, each input file is generated independently and in parallel; a
//! failure there is recorded for that file and the others are still written.

use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use slice2ts_binder::build_scope;
use slice2ts_emitter::{
    Formatter, GenerateContext, GenerateError, IdentityFormatter, JsError, RuntimeCompiler,
    generate_index_declarations, generate_index_module, generate_js, generate_namespace,
    generate_typings, namespace_file_paths, namespace_usage,
};
use slice2ts_syntax::{
    FsSourceFiles, JsonTreeParser, SliceParser, load_modules, module_name_for_path,
};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{debug, info, info_span, warn};

use crate::command::{CommandCompiler, CommandFormatter, CommandParser};
use crate::config::{ParserChoice, ResolvedOptions};
use crate::fs::{resolve_globs, write_file};

/// An input file whose outputs could not be generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    /// Module name of the input, e.g. `Demo/Shapes`.
    pub file: String,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub written: Vec<PathBuf>,
    pub failures: Vec<FileFailure>,
}

impl RunSummary {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// External tools used by a run.
#[derive(Clone, Copy)]
pub struct Toolchain<'t> {
    pub parser: &'t dyn SliceParser,
    /// Runtime modules are skipped without one.
    pub compiler: Option<&'t dyn RuntimeCompiler>,
    pub formatter: &'t dyn Formatter,
}

/// Run with the tools named in `options`.
pub fn run(options: &ResolvedOptions) -> Result<RunSummary> {
    let parser: Box<dyn SliceParser> = match &options.parser {
        ParserChoice::JsonTree => Box::new(JsonTreeParser),
        ParserChoice::Command(command) => {
            Box::new(CommandParser::new(command).context("invalid parser command")?)
        }
    };
    let compiler = match &options.compiler {
        Some(command) => Some(
            CommandCompiler::new(command, options.root_dirs.clone())
                .context("invalid compiler command")?,
        ),
        None => None,
    };
    let formatter: Box<dyn Formatter> = match &options.formatter {
        Some(command) => {
            Box::new(CommandFormatter::new(command).context("invalid formatter command")?)
        }
        None => Box::new(IdentityFormatter),
    };

    let tools = Toolchain {
        parser: parser.as_ref(),
        compiler: compiler
            .as_ref()
            .map(|compiler| compiler as &dyn RuntimeCompiler),
        formatter: formatter.as_ref(),
    };
    run_with(options, tools)
}

pub fn run_with(options: &ResolvedOptions, tools: Toolchain<'_>) -> Result<RunSummary> {
    let _span = info_span!("slice2ts", out_dir = %options.out_dir.display()).entered();

    let paths = resolve_globs(&options.files, &options.exclude)?;
    if paths.is_empty() {
        bail!("no Slice files matched {}", options.files.join(", "));
    }
    debug!(count = paths.len(), "resolved input files");

    let mut input_names: Vec<String> = Vec::with_capacity(paths.len());
    for path in &paths {
        let name = module_name_for_path(path, &options.root_dirs)?;
        if !input_names.contains(&name) {
            input_names.push(name);
        }
    }

    let files = FsSourceFiles::new(options.root_dirs.clone());
    let loaded = load_modules(&input_names, &files, tools.parser)?;
    let scopes = build_scope(&loaded.modules)?;
    let usage = namespace_usage(&loaded.input_names, &loaded.modules)?;
    let namespace_paths = namespace_file_paths(&usage);

    let mut summary = RunSummary::default();

    for (module, path) in &namespace_paths {
        let target = options.out_dir.join(path);
        write_output(tools.formatter, &target, &generate_namespace(module))?;
        summary.written.push(target);

        if options.index {
            let files = usage.get(module).map(Vec::as_slice).unwrap_or_default();

            let target = options.out_dir.join(format!("{module}.js"));
            write_output(tools.formatter, &target, &generate_index_module(module, files))?;
            summary.written.push(target);

            let target = options.out_dir.join(format!("{module}.d.ts"));
            write_output(
                tools.formatter,
                &target,
                &generate_index_declarations(module, files),
            )?;
            summary.written.push(target);
        }
    }

    let ctx = GenerateContext {
        scopes: &scopes,
        modules: &loaded.modules,
        namespace_file_paths: &namespace_paths,
        options: &options.typings,
    };

    let outcomes: Vec<Result<Vec<PathBuf>, FileFailure>> = loaded
        .input_names
        .par_iter()
        .map(|name| generate_file(&ctx, name, options, tools))
        .collect();

    for outcome in outcomes {
        match outcome {
            Ok(written) => summary.written.extend(written),
            Err(failure) => {
                warn!(file = %failure.file, "generation failed");
                summary.failures.push(failure);
            }
        }
    }

    info!(
        written = summary.written.len(),
        failed = summary.failures.len(),
        "run finished"
    );
    Ok(summary)
}

fn generate_file(
    ctx: &GenerateContext<'_>,
    name: &str,
    options: &ResolvedOptions,
    tools: Toolchain<'_>,
) -> Result<Vec<PathBuf>, FileFailure> {
    let base = options.out_dir.join(name);
    let fail = |message: String| FileFailure {
        file: name.to_string(),
        message,
    };
    let mut written = Vec::new();

    if let Some(compiler) = tools.compiler {
        let js = generate_js(name, ctx.modules, compiler, ctx.options.ice_imports)
            .map_err(|err| fail(js_error_message(&err)))?;
        let target = with_suffix(&base, ".js");
        write_output(tools.formatter, &target, &js).map_err(|err| fail(format!("{err:#}")))?;
        written.push(target);
    }

    let typings =
        generate_typings(ctx, name).map_err(|err| fail(generate_error_message(&err)))?;
    let target = with_suffix(&base, ".d.ts");
    write_output(tools.formatter, &target, &typings).map_err(|err| fail(format!("{err:#}")))?;
    written.push(target);

    Ok(written)
}

fn write_output(formatter: &dyn Formatter, path: &Path, text: &str) -> Result<()> {
    let file_name = path.to_string_lossy();
    let formatted = formatter
        .format(text, &file_name)
        .with_context(|| format!("failed to format {file_name}"))?;
    write_file(path, &formatted)
}

fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let mut path = OsString::from(base.as_os_str());
    path.push(suffix);
    PathBuf::from(path)
}

/// Message without the file prefix; the reporter prints the file itself.
fn generate_error_message(err: &GenerateError) -> String {
    match err {
        GenerateError::InFile { source, .. } => source.to_string(),
        other => other.to_string(),
    }
}

fn js_error_message(err: &JsError) -> String {
    match err {
        JsError::Generate(err) => generate_error_message(err),
        other => other.to_string(),
    }
}
