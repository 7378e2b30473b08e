#![allow(clippy::print_stderr)]

use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;

use slice2ts_cli::args::CliArgs;
use slice2ts_cli::reporter::Reporter;
use slice2ts_cli::{config, driver, tracing_config};

const EXIT_FAILURES: i32 = 1;

fn main() -> Result<()> {
    // No-op unless SLICE2TS_LOG or RUST_LOG is set.
    tracing_config::init_tracing();

    let args = CliArgs::parse();
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;

    let options = config::load_options(&args, &cwd)?;
    let summary = driver::run(&options)?;

    let reporter = Reporter::new(std::io::stderr().is_terminal());
    eprintln!("{}", reporter.render(&summary));

    if !summary.is_success() {
        std::process::exit(EXIT_FAILURES);
    }
    Ok(())
}
