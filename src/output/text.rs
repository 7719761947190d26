//! Boxed terminal report.
//!
//! Every method is a pure function of its arguments; printing is left to the
//! caller (see [`ConsoleReporter`](super::ConsoleReporter)).

use std::fmt::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::runner::{CheckOutcome, CheckRecord, RunSummary};

use super::summary::{FileSummaryOptions, file_summary};
use super::{ColorMode, OutputFormatter, ansi, format_time, plural};

/// Total width of every box line.
pub const WIDTH: usize = 80;

const LEFT: usize = 7;
const RIGHT: usize = 11;
const MIDDLE: usize = WIDTH - LEFT - RIGHT - 4;

#[derive(Debug, Clone, Copy)]
enum Align {
    Left,
    Center,
    Right,
}

/// Box drawing characters, in order: top-left, top fill, top separator,
/// top-right, mid-left, mid separator, mid-right, bottom-left, bottom fill,
/// bottom separator, bottom-right.
struct BoxStyle([char; 11]);

const SUMMARY_BOX: BoxStyle = BoxStyle(['═', '═', '╦', '╗', ' ', '║', '║', '═', '═', '╩', '╝']);
const CHECK_UPPER: BoxStyle = BoxStyle(['━', '━', '━', '┓', ' ', ' ', ' ', ' ', ' ', ' ', ' ']);
const CHECK_LOWER: BoxStyle = BoxStyle([' ', ' ', ' ', ' ', ' ', ' ', ' ', '━', '━', '━', '┛']);

/// Number of terminal columns `text` occupies, ignoring ANSI escapes.
fn visible_width(text: &str) -> usize {
    let mut width = 0;
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            // Skip to the end of the CSI sequence.
            for c in chars.by_ref() {
                if c == 'm' {
                    break;
                }
            }
        } else {
            width += 1;
        }
    }
    width
}

fn align(text: &str, alignment: Align, width: usize) -> String {
    let pad = width.saturating_sub(visible_width(text));
    match alignment {
        Align::Left => format!("{text}{}", " ".repeat(pad)),
        Align::Right => format!("{}{text}", " ".repeat(pad)),
        Align::Center => {
            let left = pad / 2;
            format!("{}{text}{}", " ".repeat(left), " ".repeat(pad - left))
        }
    }
}

fn make_box(style: &BoxStyle, sections: &[(&str, Align, usize)]) -> String {
    let s = &style.0;
    let fill = |c: char| {
        sections
            .iter()
            .map(|(_, _, width)| c.to_string().repeat(*width))
            .collect::<Vec<_>>()
    };
    let middle: Vec<_> = sections
        .iter()
        .map(|(text, alignment, width)| align(text, *alignment, *width))
        .collect();

    format!(
        "{}{}{}\n{}{}{}\n{}{}{}",
        s[0],
        fill(s[1]).join(&s[2].to_string()),
        s[3],
        s[4],
        middle.join(&s[5].to_string()),
        s[6],
        s[7],
        fill(s[8]).join(&s[9].to_string()),
        s[10],
    )
}

fn check_box(style: &BoxStyle, left: &str, middle: &str, right: &str) -> String {
    let left = if left.ends_with(' ') {
        left.to_string()
    } else {
        format!("{left} ")
    };
    let middle = format!(" {middle}");
    let right = format!("{right} ");

    make_box(
        style,
        &[
            (&left, Align::Right, LEFT),
            (&middle, Align::Left, MIDDLE),
            (&right, Align::Right, RIGHT),
        ],
    )
}

/// Everything needed to render a complete run after the fact.
#[derive(Debug, Clone, Copy)]
pub struct RunReport<'a> {
    pub repository_root: &'a Path,
    pub paths: &'a [PathBuf],
    pub summary: &'a RunSummary,
}

pub struct TextReporter {
    use_colors: bool,
    summary_options: FileSummaryOptions,
}

impl TextReporter {
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        Self {
            use_colors: mode.use_colors(),
            summary_options: FileSummaryOptions::default(),
        }
    }

    #[must_use]
    pub const fn with_summary_options(mut self, options: FileSummaryOptions) -> Self {
        self.summary_options = options;
        self
    }

    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.use_colors {
            return text.to_string();
        }
        format!("{color}{text}{}", ansi::RESET)
    }

    /// Outcome label centred in `width`, colored by outcome.
    fn status(&self, outcome: CheckOutcome, width: usize, invert: bool) -> String {
        let label = outcome.as_str();
        let color = match (outcome, invert) {
            (CheckOutcome::Pass, false) => ansi::GREEN,
            (CheckOutcome::Pass, true) => ansi::BLACK_ON_GREEN,
            (CheckOutcome::Fail, false) => ansi::RED,
            (CheckOutcome::Fail, true) => ansi::BLACK_ON_RED,
            (CheckOutcome::Cancel, _) => ansi::BOLD_YELLOW,
        };
        let padding = " ".repeat(width.saturating_sub(label.len()) / 2);
        format!("{padding}{}{padding}", self.colorize(label, color))
    }

    /// Title box naming the repository.
    #[must_use]
    pub fn title(&self, repository_root: &Path) -> String {
        let name = repository_root.file_name().map_or_else(
            || repository_root.display().to_string(),
            |n| n.to_string_lossy().to_string(),
        );
        let message = align(
            &format!(" Presubmit checks for {name} "),
            Align::Center,
            WIDTH - 2,
        );
        let width = visible_width(&message);
        make_box(&SUMMARY_BOX, &[(&message, Align::Center, width)])
    }

    /// Directory/extension breakdown of the input paths, one entry per line.
    #[must_use]
    pub fn file_overview(&self, paths: &[PathBuf]) -> String {
        let mut output = String::new();
        for line in file_summary(paths, &self.summary_options) {
            let _ = writeln!(output, "{line}");
        }
        if paths.is_empty() {
            let _ = writeln!(
                output,
                "{}",
                self.colorize("No files are being checked!", ansi::BOLD_YELLOW)
            );
        }
        output
    }

    /// Box printed when a check starts.
    #[must_use]
    pub fn check_started(&self, index: usize, total: usize, name: &str, path_count: usize) -> String {
        check_box(
            &CHECK_UPPER,
            &format!("{index}/{total}"),
            name,
            &plural(path_count, "file"),
        )
    }

    /// Box printed when a check ends.
    #[must_use]
    pub fn check_finished(&self, record: &CheckRecord) -> String {
        check_box(
            &CHECK_LOWER,
            &self.status(record.outcome, LEFT, false),
            &record.name,
            &format_time(record.elapsed),
        )
    }

    /// Final summary box.
    #[must_use]
    pub fn summary(&self, summary: &RunSummary, path_count: usize) -> String {
        let mut items = Vec::new();
        if summary.passed > 0 {
            items.push(format!("{} passed", summary.passed));
        }
        if summary.failed > 0 {
            items.push(format!("{} failed", summary.failed));
        }
        if summary.skipped > 0 {
            items.push(format!("{} not run", summary.skipped));
        }
        let items = if items.is_empty() {
            "nothing was done".to_string()
        } else {
            items.join(", ")
        };

        check_box(
            &SUMMARY_BOX,
            &self.status(summary.outcome(), LEFT, true),
            &format!(
                "{} checks on {}: {items}",
                summary.total(),
                plural(path_count, "file")
            ),
            &format_time(summary.total_elapsed),
        )
    }

    /// Render a complete run: title, file overview, a box pair per executed
    /// check and the summary.
    #[must_use]
    pub fn render(&self, report: &RunReport<'_>) -> String {
        let mut output = String::new();
        let _ = writeln!(output, "{}", self.title(report.repository_root));
        output.push('\n');
        output.push_str(&self.file_overview(report.paths));
        output.push('\n');

        let total = report.summary.total();
        for record in &report.summary.records {
            let _ = writeln!(
                output,
                "{}",
                self.check_started(record.index, total, &record.name, record.path_count)
            );
            let _ = writeln!(output, "{}", self.check_finished(record));
        }

        let _ = writeln!(
            output,
            "{}",
            self.summary(report.summary, report.paths.len())
        );
        output
    }
}

impl Default for TextReporter {
    fn default() -> Self {
        Self::new(ColorMode::Auto)
    }
}

impl OutputFormatter for TextReporter {
    fn format(&self, report: &RunReport<'_>) -> Result<String> {
        Ok(self.render(report))
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
