use std::path::{Path, PathBuf};

use clap::Parser;
use regex::Regex;

use presubmit_guard::cli::{Cli, ColorChoice};
use presubmit_guard::config::{Config, ConfigLoader, FileConfigLoader, build_program};
use presubmit_guard::git::{FileQuery, GitRepository, PathSource};
use presubmit_guard::{interrupt, logging};
use presubmit_guard::output::{
    ColorMode, ConsoleReporter, JsonReporter, OutputFormat, OutputFormatter, RunReport,
};
use presubmit_guard::runner::{Presubmit, RunOptions, SilentObserver};
use presubmit_guard::{EXIT_CHECKS_FAILED, EXIT_CONFIG_ERROR, EXIT_SUCCESS, PresubmitError};

/// Output directory used when neither the command line nor the configuration
/// names one, relative to the repository root.
const DEFAULT_OUTPUT_DIRECTORY: &str = ".presubmit";

const fn color_choice_to_mode(choice: ColorChoice) -> ColorMode {
    match choice {
        ColorChoice::Auto => ColorMode::Auto,
        ColorChoice::Always => ColorMode::Always,
        ColorChoice::Never => ColorMode::Never,
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    std::process::exit(run(&cli));
}

fn run(cli: &Cli) -> i32 {
    match run_impl(cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            if e.is_not_a_repository() {
                tracing::error!("Presubmit checks must be run from a Git repo");
            }
            eprintln!("Error: {e}");
            if let Some(suggestion) = e.suggestion() {
                eprintln!("  {suggestion}");
            }
            EXIT_CONFIG_ERROR
        }
    }
}

fn run_impl(cli: &Cli) -> presubmit_guard::Result<i32> {
    // 1. Locate the repository; nothing runs outside one
    let repo = GitRepository::discover(&cli.repository)?;
    let root = repo.root().to_path_buf();

    // 2. Load configuration and build the program
    let config = load_config(cli, &root)?;
    let program = build_program(&config)?;

    // 3. List the files to check
    let exclude = compile_excludes(config.run.exclude.iter().chain(&cli.exclude))?;
    let paths = repo.list_files(&FileQuery {
        base: cli.base.clone(),
        paths: cli.paths.clone(),
        exclude,
    })?;

    // 4. Run
    let output_directory = resolve_output_directory(cli.output_directory.as_deref(), &config, &root);
    let presubmit = Presubmit::new(root, output_directory, paths);
    let options = RunOptions::keep_going(cli.keep_going || config.run.keep_going);
    if let Err(e) = interrupt::cancel_on_interrupt(options.cancel.clone()) {
        tracing::warn!("Ctrl-C will not cancel the run cleanly: {e}");
    }

    let summary = match cli.format {
        OutputFormat::Text => {
            let mut reporter = ConsoleReporter::stdout(color_choice_to_mode(cli.color), cli.quiet);
            presubmit.run(&program, &options, &mut reporter)?
        }
        OutputFormat::Json => {
            let summary = presubmit.run(&program, &options, &mut SilentObserver)?;
            let report = RunReport {
                repository_root: presubmit.repository_root(),
                paths: presubmit.paths(),
                summary: &summary,
            };
            println!("{}", JsonReporter.format(&report)?);
            summary
        }
    };

    Ok(if summary.success() {
        EXIT_SUCCESS
    } else {
        EXIT_CHECKS_FAILED
    })
}

fn load_config(cli: &Cli, root: &Path) -> presubmit_guard::Result<Config> {
    if cli.no_config {
        return Ok(Config::default());
    }
    let loader = FileConfigLoader::new();
    match &cli.config {
        Some(path) => loader.load_from_path(path),
        None => loader.load(root),
    }
}

fn compile_excludes<'a, I>(patterns: I) -> presubmit_guard::Result<Vec<Regex>>
where
    I: IntoIterator<Item = &'a String>,
{
    patterns
        .into_iter()
        .map(|pattern| {
            Regex::new(pattern).map_err(|source| PresubmitError::InvalidPattern {
                pattern: pattern.clone(),
                source,
            })
        })
        .collect()
}

/// Command line (relative to the working directory), then configuration
/// (relative to the repository root), then the default.
fn resolve_output_directory(from_cli: Option<&Path>, config: &Config, root: &Path) -> PathBuf {
    if let Some(dir) = from_cli {
        return std::path::absolute(dir).unwrap_or_else(|_| dir.to_path_buf());
    }
    config.run.output_directory.as_ref().map_or_else(
        || root.join(DEFAULT_OUTPUT_DIRECTORY),
        |dir| root.join(dir),
    )
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
