use std::path::{Path, PathBuf};
use std::time::Duration;

use super::*;

fn record(index: usize, name: &str, outcome: CheckOutcome) -> CheckRecord {
    CheckRecord {
        index,
        name: name.to_string(),
        path_count: 2,
        outcome,
        elapsed: Duration::from_millis(1500),
    }
}

fn assert_box_width(rendered: &str) {
    for line in rendered.lines() {
        assert_eq!(visible_width(line), WIDTH, "{line:?}");
    }
}

#[test]
fn visible_width_ignores_escape_sequences() {
    assert_eq!(visible_width("PASSED"), 6);
    assert_eq!(visible_width("\x1b[30m\x1b[42mPASSED\x1b[0m"), 6);
    assert_eq!(visible_width("═║"), 2);
}

#[test]
fn title_names_the_repository() {
    let reporter = TextReporter::new(ColorMode::Never);

    let title = reporter.title(Path::new("/work/pigweed"));

    assert_box_width(&title);
    let lines: Vec<_> = title.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with('═'));
    assert!(lines[0].ends_with('╗'));
    assert!(lines[1].contains(" Presubmit checks for pigweed "));
    assert!(lines[1].ends_with('║'));
    assert!(lines[2].ends_with('╝'));
}

#[test]
fn check_started_box_layout() {
    let reporter = TextReporter::new(ColorMode::Never);

    let header = reporter.check_started(1, 3, "lint", 2);

    assert_box_width(&header);
    let lines: Vec<_> = header.lines().collect();
    assert_eq!(lines[0], format!("{}┓", "━".repeat(WIDTH - 1)));
    assert!(lines[1].starts_with("    1/3   lint "));
    assert!(lines[1].ends_with(" 2 files  "));
    assert_eq!(lines[2].trim(), "");
}

#[test]
fn single_file_is_not_pluralized() {
    let reporter = TextReporter::new(ColorMode::Never);

    let header = reporter.check_started(2, 2, "format", 1);

    assert!(header.contains(" 1 file "));
    assert!(!header.contains("1 files"));
}

#[test]
fn check_finished_shows_outcome_and_time() {
    let reporter = TextReporter::new(ColorMode::Never);

    let footer = reporter.check_finished(&record(1, "lint", CheckOutcome::Fail));

    assert_box_width(&footer);
    let lines: Vec<_> = footer.lines().collect();
    assert_eq!(lines[0].trim(), "");
    assert!(lines[1].starts_with(" FAILED   lint "));
    assert!(lines[1].ends_with(" 0:01.5  "));
    assert_eq!(lines[2], format!(" {}┛", "━".repeat(WIDTH - 2)));
}

#[test]
fn summary_lists_nonzero_counts() {
    let reporter = TextReporter::new(ColorMode::Never);
    let summary = RunSummary::new(
        3,
        vec![
            record(1, "a", CheckOutcome::Pass),
            record(2, "b", CheckOutcome::Fail),
        ],
        Duration::from_secs(61),
    );

    let rendered = reporter.summary(&summary, 4);

    assert_box_width(&rendered);
    assert!(rendered.contains(" FAILED ║"));
    assert!(rendered.contains("3 checks on 4 files: 1 passed, 1 failed, 1 not run"));
    assert!(rendered.contains(" 1:01.0 ║"));
}

#[test]
fn summary_passes_when_everything_passed() {
    let reporter = TextReporter::new(ColorMode::Never);
    let summary = RunSummary::new(
        1,
        vec![record(1, "a", CheckOutcome::Pass)],
        Duration::ZERO,
    );

    let rendered = reporter.summary(&summary, 1);

    assert!(rendered.contains(" PASSED ║"));
    assert!(rendered.contains("1 checks on 1 file: 1 passed"));
    assert!(!rendered.contains("failed"));
}

#[test]
fn summary_of_empty_program_says_nothing_was_done() {
    let reporter = TextReporter::new(ColorMode::Never);
    let summary = RunSummary::new(0, Vec::new(), Duration::ZERO);

    let rendered = reporter.summary(&summary, 0);

    assert!(rendered.contains("0 checks on 0 files: nothing was done"));
    assert!(rendered.contains("PASSED"));
}

#[test]
fn colored_boxes_keep_their_width() {
    let reporter = TextReporter::new(ColorMode::Always);
    let summary = RunSummary::new(
        1,
        vec![record(1, "a", CheckOutcome::Fail)],
        Duration::ZERO,
    );

    let footer = reporter.check_finished(&summary.records[0]);
    let rendered = reporter.summary(&summary, 2);

    assert!(footer.contains(ansi::RED));
    assert!(rendered.contains(ansi::BLACK_ON_RED));
    assert_box_width(&footer);
    assert_box_width(&rendered);
}

#[test]
fn cancel_is_shown_in_yellow() {
    let reporter = TextReporter::new(ColorMode::Always);

    let footer = reporter.check_finished(&record(1, "slow", CheckOutcome::Cancel));

    assert!(footer.contains(&format!("{}CANCEL{}", ansi::BOLD_YELLOW, ansi::RESET)));
}

#[test]
fn file_overview_warns_when_there_are_no_paths() {
    let reporter = TextReporter::new(ColorMode::Never);

    assert_eq!(reporter.file_overview(&[]), "No files are being checked!\n");
}

#[test]
fn file_overview_lists_directories() {
    let reporter = TextReporter::new(ColorMode::Never);
    let paths = vec![PathBuf::from("src/a.rs"), PathBuf::from("src/b.rs")];

    let overview = reporter.file_overview(&paths);

    assert!(overview.contains("src/"));
    assert!(overview.contains("2 files (2 .rs)"));
    assert!(!overview.contains("No files"));
}

#[test]
fn render_includes_every_executed_check() {
    let reporter = TextReporter::new(ColorMode::Never);
    let paths = vec![PathBuf::from("a.h"), PathBuf::from("b.h")];
    let summary = RunSummary::new(
        2,
        vec![
            record(1, "pragma_once", CheckOutcome::Pass),
            record(2, "lint", CheckOutcome::Fail),
        ],
        Duration::ZERO,
    );
    let report = RunReport {
        repository_root: Path::new("/src/project"),
        paths: &paths,
        summary: &summary,
    };

    let output = reporter.format(&report).unwrap();

    assert!(output.contains("Presubmit checks for project"));
    assert!(output.contains("1/2   pragma_once"));
    assert!(output.contains("2/2   lint"));
    assert!(output.contains("2 checks on 2 files: 1 passed, 1 failed"));
    let title_at = output.find("Presubmit checks").unwrap();
    let first_at = output.find("pragma_once").unwrap();
    let summary_at = output.find("2 checks on").unwrap();
    assert!(title_at < first_at && first_at < summary_at);
}
