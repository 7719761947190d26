mod console;
mod json;
mod summary;
mod text;

pub use console::ConsoleReporter;
pub use json::JsonReporter;
pub use summary::{FileSummaryOptions, file_summary};
pub use text::{RunReport, TextReporter, WIDTH};

use std::time::Duration;

use crate::error::Result;

/// Trait for rendering a finished run into an output format.
pub trait OutputFormatter {
    /// Format the finished run into a string.
    ///
    /// # Errors
    /// Returns an error if the formatting fails.
    fn format(&self, report: &RunReport<'_>) -> Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown output format: {s}")),
        }
    }
}

/// Color output mode for terminal display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Auto-detect: use colors if stdout is a TTY and `NO_COLOR` is not set
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl ColorMode {
    #[must_use]
    pub fn use_colors(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => {
                // Respect NO_COLOR environment variable
                if std::env::var_os("NO_COLOR").is_some() {
                    return false;
                }
                std::io::IsTerminal::is_terminal(&std::io::stdout())
            }
        }
    }
}

/// ANSI color codes
pub(crate) mod ansi {
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const BOLD_YELLOW: &str = "\x1b[33m\x1b[1m";
    pub const BLACK_ON_RED: &str = "\x1b[30m\x1b[41m";
    pub const BLACK_ON_GREEN: &str = "\x1b[30m\x1b[42m";
    pub const RESET: &str = "\x1b[0m";
}

/// Count followed by the singular or plural form of `singular`.
///
/// `plural(1, "file")` is `"1 file"`, `plural(2, "entry")` is `"2 entries"`,
/// `plural(3, "pass")` is `"3 passes"`.
#[must_use]
pub fn plural(count: usize, singular: &str) -> String {
    if count == 1 {
        return format!("{count} {singular}");
    }
    if let Some(stem) = singular.strip_suffix('y') {
        return format!("{count} {stem}ies");
    }
    if singular.ends_with('s') {
        return format!("{count} {singular}es");
    }
    format!("{count} {singular}s")
}

/// Elapsed time as `" m:ss.s"`, with the leading space.
#[must_use]
pub fn format_time(elapsed: Duration) -> String {
    let total = elapsed.as_secs_f64();
    let minutes = (total / 60.0).floor();
    let seconds = total - minutes * 60.0;
    format!(" {minutes:.0}:{seconds:04.1}")
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
