use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::output::OutputFormat;

/// Color output control
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal capability
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Parser, Debug)]
#[command(name = "presubmit-guard")]
#[command(author, version, about = "Run presubmit checks over the files of a git repository")]
#[command(long_about = "Runs a program of presubmit checks, in order, over the files tracked \
    by a git repository (or only those changed since --base).\n\n\
    Exit codes:\n  \
    0 - All checks passed\n  \
    1 - A check failed, was cancelled, or did not run\n  \
    2 - Configuration, repository or runtime error\n  \
    130 - Interrupted twice")]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Restrict the run to these files or directories
    pub paths: Vec<PathBuf>,

    /// Only check files whose working-tree content changed since this git revision
    #[arg(short, long)]
    pub base: Option<String>,

    /// Exclude paths matching this regex (searched, can be repeated)
    #[arg(short, long)]
    pub exclude: Vec<String>,

    /// Directory inside the git repository to check
    #[arg(short, long, default_value = ".")]
    pub repository: PathBuf,

    /// Continue running checks after one fails
    #[arg(short, long)]
    pub keep_going: bool,

    /// Where check artifacts go (default: <repository root>/.presubmit)
    #[arg(short, long)]
    pub output_directory: Option<PathBuf>,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Skip loading configuration file
    #[arg(long, conflicts_with = "config")]
    pub no_config: bool,

    /// Output format [possible values: text, json]
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,

    /// Control color output
    #[arg(long, value_enum, default_value = "auto")]
    pub color: ColorChoice,

    /// Increase output verbosity (-v, -vv for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long)]
    pub quiet: bool,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
