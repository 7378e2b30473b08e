use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for the slice2ts binary.
#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "slice2ts",
    version,
    about = "Generates TypeScript typings for Slice files"
)]
pub struct CliArgs {
    // ==================== Inputs ====================
    /// Slice file paths or globs.
    #[arg(value_name = "FILE")]
    pub files: Vec<String>,

    /// Root dirs. Output files mirror the input layout relative to these,
    /// and includes are resolved in them.
    #[arg(long = "root-dir", value_name = "DIR")]
    pub root_dirs: Vec<PathBuf>,

    /// File paths or globs to exclude.
    #[arg(short = 'e', long = "exclude", value_name = "FILE")]
    pub exclude: Vec<String>,

    /// Directory holding the bundled Ice Slice files, searched after the
    /// root dirs.
    #[arg(long = "slice-dir", value_name = "DIR")]
    pub slice_dir: Option<PathBuf>,

    /// Project file with default options.
    #[arg(short = 'p', long = "project", value_name = "FILE")]
    pub project: Option<PathBuf>,

    // ==================== Output ====================
    /// Directory where to put generated files.
    #[arg(short = 'o', long = "out-dir", value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Only generate the typings.
    #[arg(long = "no-js")]
    pub no_js: bool,

    /// Import Ice modules from their own files instead of "ice".
    #[arg(long = "ice-imports")]
    pub ice_imports: bool,

    /// Don't generate typings for these types.
    #[arg(short = 'i', long = "ignore", value_name = "TYPE")]
    pub ignore: Vec<String>,

    /// Generate an index file for each top-level Slice module.
    #[arg(long = "index")]
    pub index: bool,

    /// Don't add `| null` to class-typed fields, parameters and results.
    #[arg(long = "no-nullable-values")]
    pub no_nullable_values: bool,

    // ==================== External tools ====================
    /// Command that turns Slice text on stdin into a JSON declaration tree.
    /// `json` reads the input files as declaration trees directly.
    #[arg(long = "parser", value_name = "CMD")]
    pub parser: Option<String>,

    /// Slice-to-JavaScript compiler used for the runtime modules.
    #[arg(long = "compiler", value_name = "CMD")]
    pub compiler: Option<String>,

    /// Formatter that generated text is piped through. `{file}` in the
    /// command is replaced with the output file path.
    #[arg(long = "formatter", value_name = "CMD")]
    pub formatter: Option<String>,
}
