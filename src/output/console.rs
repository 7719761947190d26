use std::io::{self, Write};

use crate::runner::{CheckRecord, RunObserver, RunPlan, RunSummary};

use super::{ColorMode, TextReporter};

/// Streams the text report while a run is in progress.
///
/// In quiet mode only the final summary box is written.
pub struct ConsoleReporter<W: Write = io::Stdout> {
    reporter: TextReporter,
    writer: W,
    quiet: bool,
}

impl ConsoleReporter {
    #[must_use]
    pub fn stdout(mode: ColorMode, quiet: bool) -> Self {
        Self::new(TextReporter::new(mode), io::stdout(), quiet)
    }
}

impl<W: Write> ConsoleReporter<W> {
    #[must_use]
    pub const fn new(reporter: TextReporter, writer: W, quiet: bool) -> Self {
        Self {
            reporter,
            writer,
            quiet,
        }
    }

    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn emit(&mut self, text: &str) {
        writeln!(self.writer, "{text}").ok();
        self.writer.flush().ok();
    }
}

impl<W: Write> RunObserver for ConsoleReporter<W> {
    fn run_started(&mut self, plan: &RunPlan<'_>) {
        if self.quiet {
            return;
        }
        let title = self.reporter.title(plan.repository_root);
        let overview = self.reporter.file_overview(plan.paths);
        self.emit(&title);
        self.emit("");
        write!(self.writer, "{overview}").ok();
        self.emit("");
    }

    fn check_started(&mut self, index: usize, total: usize, name: &str, path_count: usize) {
        if !self.quiet {
            let header = self.reporter.check_started(index, total, name, path_count);
            self.emit(&header);
        }
    }

    fn check_finished(&mut self, record: &CheckRecord, _total: usize) {
        if !self.quiet {
            let footer = self.reporter.check_finished(record);
            self.emit(&footer);
        }
    }

    fn run_finished(&mut self, summary: &RunSummary, path_count: usize) {
        let rendered = self.reporter.summary(summary, path_count);
        self.emit(&rendered);
    }
}

#[cfg(test)]
#[path = "console_tests.rs"]
mod tests;
