use std::path::{Path, PathBuf};
use std::time::Duration;

use super::*;
use crate::runner::CheckOutcome;

fn record() -> CheckRecord {
    CheckRecord {
        index: 1,
        name: "pragma_once".to_string(),
        path_count: 1,
        outcome: CheckOutcome::Pass,
        elapsed: Duration::from_millis(100),
    }
}

fn drive(reporter: &mut ConsoleReporter<Vec<u8>>) {
    let paths = vec![PathBuf::from("a.h")];
    reporter.run_started(&RunPlan {
        repository_root: Path::new("/tmp/widgets"),
        paths: &paths,
        registered: 2,
        executed: 1,
    });
    reporter.check_started(1, 1, "pragma_once", 1);
    let record = record();
    reporter.check_finished(&record, 1);
    reporter.run_finished(&RunSummary::new(1, vec![record], Duration::ZERO), 1);
}

#[test]
fn streams_the_full_report_matching_render() {
    let mut reporter = ConsoleReporter::new(TextReporter::new(ColorMode::Never), Vec::new(), false);

    drive(&mut reporter);

    let output = String::from_utf8(reporter.into_inner()).unwrap();
    let paths = vec![PathBuf::from("a.h")];
    let summary = RunSummary::new(1, vec![record()], Duration::ZERO);
    let expected = TextReporter::new(ColorMode::Never).render(&crate::output::RunReport {
        repository_root: Path::new("/tmp/widgets"),
        paths: &paths,
        summary: &summary,
    });
    assert_eq!(output, expected);
}

#[test]
fn quiet_mode_prints_only_the_summary() {
    let mut reporter = ConsoleReporter::new(TextReporter::new(ColorMode::Never), Vec::new(), true);

    drive(&mut reporter);

    let output = String::from_utf8(reporter.into_inner()).unwrap();
    assert!(!output.contains("Presubmit checks for"));
    assert!(!output.contains("1/1"));
    assert!(output.contains("1 checks on 1 file: 1 passed"));
    assert_eq!(output.lines().count(), 3);
}
