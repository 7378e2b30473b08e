use colored::Colorize;

use crate::driver::{FileFailure, RunSummary};

/// Renders per-file failures and the run summary for the terminal.
pub struct Reporter {
    color: bool,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter { color }
    }

    /// `error: <file>.ice` followed by the indented message.
    pub fn format_failure(&self, failure: &FileFailure) -> String {
        let mut output = format!("{}: {}.ice", self.label("error"), failure.file);
        for line in failure.message.lines() {
            output.push_str("\n  ");
            output.push_str(line);
        }
        output
    }

    pub fn render(&self, summary: &RunSummary) -> String {
        let mut out = String::new();
        for failure in &summary.failures {
            out.push_str(&self.format_failure(failure));
            out.push('\n');
        }
        out.push_str(&self.format_summary(summary));
        out
    }

    pub fn format_summary(&self, summary: &RunSummary) -> String {
        let written = format!(
            "Wrote {} {}.",
            summary.written.len(),
            plural(summary.written.len(), "file", "files")
        );
        if summary.failures.is_empty() {
            return written;
        }

        let failed = format!(
            "{} {} failed.",
            summary.failures.len(),
            plural(summary.failures.len(), "file", "files")
        );
        let failed = if self.color {
            failed.red().to_string()
        } else {
            failed
        };
        format!("{written} {failed}")
    }

    fn label(&self, label: &str) -> String {
        if self.color {
            label.red().bold().to_string()
        } else {
            label.to_string()
        }
    }
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}
