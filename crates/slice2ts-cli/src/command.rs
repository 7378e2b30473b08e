//! Process-backed parser, runtime compiler and formatter.

use anyhow::{Result, bail};
use slice2ts_emitter::{CompileFailure, CompiledModule, Formatter, RuntimeCompiler};
use slice2ts_syntax::{JsonTreeParser, SliceParser, SliceSource, SyntaxError};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};
use tracing::debug;

/// Placeholder replaced by the output file path in formatter commands.
pub const FILE_PLACEHOLDER: &str = "{file}";

/// A program and its leading arguments, split on whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ExternalCommand {
    pub fn parse(command: &str) -> Result<Self> {
        let mut words = command.split_whitespace().map(str::to_string);
        let Some(program) = words.next() else {
            bail!("empty command");
        };
        Ok(ExternalCommand {
            program,
            args: words.collect(),
        })
    }

    /// Run with `extra_args` appended, feeding `stdin` if given.
    pub fn run(&self, extra_args: &[String], stdin: Option<&str>) -> io::Result<Output> {
        debug!(program = %self.program, args = ?self.args, extra = ?extra_args, "running command");

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .args(extra_args)
            .stdin(if stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| {
                io::Error::new(err.kind(), format!("failed to run {}: {err}", self.program))
            })?;

        // Feed stdin from its own thread so a child filling its stdout pipe
        // can't block us.
        std::thread::scope(|scope| {
            let writer = match (child.stdin.take(), stdin) {
                (Some(mut pipe), Some(text)) => {
                    Some(scope.spawn(move || pipe.write_all(text.as_bytes())))
                }
                _ => None,
            };
            let output = child.wait_with_output()?;
            if let Some(writer) = writer {
                match writer.join() {
                    Ok(Ok(())) => {}
                    // The child may exit without reading all of its input.
                    Ok(Err(err)) if err.kind() == io::ErrorKind::BrokenPipe => {}
                    Ok(Err(err)) => return Err(err),
                    Err(_) => return Err(io::Error::other("stdin writer panicked")),
                }
            }
            Ok(output)
        })
    }
}

fn failure_text(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let text = if stderr.trim().is_empty() {
        String::from_utf8_lossy(&output.stdout)
    } else {
        stderr
    };
    let text = text.trim();
    if text.is_empty() {
        format!("exited with {}", output.status)
    } else {
        text.to_string()
    }
}

/// Parser that pipes Slice text through a `slice2json` compatible program.
#[derive(Debug, Clone)]
pub struct CommandParser {
    command: ExternalCommand,
}

impl CommandParser {
    pub fn new(command: &str) -> Result<Self> {
        Ok(CommandParser {
            command: ExternalCommand::parse(command)?,
        })
    }
}

impl SliceParser for CommandParser {
    fn parse(&self, text: &str) -> Result<SliceSource, SyntaxError> {
        let output = self
            .command
            .run(&[], Some(text))
            .map_err(|err| SyntaxError::new(err.to_string()))?;
        if !output.status.success() {
            return Err(SyntaxError::new(failure_text(&output)));
        }
        JsonTreeParser.parse(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Runs a `slice2js` compatible compiler on a temporary copy of the file.
#[derive(Debug, Clone)]
pub struct CommandCompiler {
    command: ExternalCommand,
    include_dirs: Vec<PathBuf>,
}

impl CommandCompiler {
    pub fn new(command: &str, include_dirs: Vec<PathBuf>) -> Result<Self> {
        Ok(CommandCompiler {
            command: ExternalCommand::parse(command)?,
            include_dirs,
        })
    }
}

impl RuntimeCompiler for CommandCompiler {
    fn compile(&self, name: &str, source: &str) -> Result<CompiledModule, CompileFailure> {
        let mut file = tempfile::Builder::new()
            .prefix("slice2ts-")
            .suffix(".ice")
            .tempfile()?;
        file.write_all(source.as_bytes())?;
        file.flush()?;

        let source_path = file.path().to_string_lossy().into_owned();
        let mut args: Vec<String> = self
            .include_dirs
            .iter()
            .map(|dir| format!("-I{}", dir.display()))
            .collect();
        args.push("--stdout".to_string());
        args.push(source_path.clone());

        debug!(module = name, temp = %source_path, "compiling runtime module");
        let output = self.command.run(&args, None)?;
        if !output.status.success() {
            return Err(CompileFailure::Diagnostics {
                message: failure_text(&output),
                source_path,
            });
        }

        Ok(CompiledModule {
            code: String::from_utf8_lossy(&output.stdout).into_owned(),
            source_path,
        })
    }
}

/// Pipes generated text through an external formatter.
#[derive(Debug, Clone)]
pub struct CommandFormatter {
    command: ExternalCommand,
}

impl CommandFormatter {
    pub fn new(command: &str) -> Result<Self> {
        Ok(CommandFormatter {
            command: ExternalCommand::parse(command)?,
        })
    }

    fn command_for(&self, file_name: &str) -> ExternalCommand {
        ExternalCommand {
            program: self.command.program.clone(),
            args: self
                .command
                .args
                .iter()
                .map(|arg| arg.replace(FILE_PLACEHOLDER, file_name))
                .collect(),
        }
    }
}

impl Formatter for CommandFormatter {
    fn format(&self, source: &str, file_name: &str) -> io::Result<String> {
        let output = self.command_for(file_name).run(&[], Some(source))?;
        if !output.status.success() {
            return Err(io::Error::other(format!(
                "formatter failed on {file_name}: {}",
                failure_text(&output)
            )));
        }
        String::from_utf8(output.stdout).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
    }
}
