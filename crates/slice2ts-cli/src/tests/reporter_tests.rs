use std::path::PathBuf;

use super::driver::{FileFailure, RunSummary};
use super::reporter::Reporter;

#[test]
fn failure_lists_the_file_then_the_indented_message() {
    let reporter = Reporter::new(false);
    let failure = FileFailure {
        file: "Demo/Shapes".to_string(),
        message: "Demo/Shapes.ice:3: syntax error\nDemo/Shapes.ice:4: missing ;".to_string(),
    };

    assert_eq!(
        reporter.format_failure(&failure),
        "error: Demo/Shapes.ice\n  Demo/Shapes.ice:3: syntax error\n  Demo/Shapes.ice:4: missing ;"
    );
}

#[test]
fn summary_counts_written_and_failed_files() {
    let reporter = Reporter::new(false);
    let mut summary = RunSummary {
        written: vec![PathBuf::from("Demo.ns.d.ts")],
        failures: Vec::new(),
    };
    assert_eq!(reporter.format_summary(&summary), "Wrote 1 file.");

    summary.written.push(PathBuf::from("Demo.d.ts"));
    summary.failures.push(FileFailure {
        file: "Broken".to_string(),
        message: "Could not find type: Missing".to_string(),
    });
    assert_eq!(
        reporter.render(&summary),
        "error: Broken.ice\n  Could not find type: Missing\nWrote 2 files. 1 file failed."
    );
}
