//! Command line driver for slice2ts.
//!
//! [`config`] merges CLI flags over a `slice2ts.json` project file,
//! [`fs`] expands input globs, [`command`] wraps the external parser,
//! compiler and formatter, and [`driver`] runs the whole pipeline.

pub mod args;
pub mod command;
pub mod config;
pub mod driver;
pub mod fs;
pub mod reporter;
pub mod tracing_config;

#[cfg(test)]
#[path = "tests/args_tests.rs"]
mod args_tests;
#[cfg(test)]
#[path = "tests/command_tests.rs"]
mod command_tests;
#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod config_tests;
#[cfg(test)]
#[path = "tests/fs_tests.rs"]
mod fs_tests;
#[cfg(test)]
#[path = "tests/reporter_tests.rs"]
mod reporter_tests;
#[cfg(test)]
#[path = "tests/tracing_config_tests.rs"]
mod tracing_config_tests;
