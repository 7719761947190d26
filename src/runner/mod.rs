//! Sequential execution of a presubmit program.
//!
//! A run resolves the program against the path list, then walks the executed
//! program in order: build a context, invoke the check, classify the outcome,
//! and decide whether to continue. Cancel always stops the run; Fail stops it
//! unless keep-going is set.

mod observer;
mod outcome;
mod resolve;

pub use observer::{RunObserver, RunPlan, SilentObserver};
pub use outcome::{CheckOutcome, CheckRecord, RunSummary};
pub use resolve::{ResolvedCheck, resolve_program};

use std::any::Any;
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::check::{CancellationToken, CheckContext, CheckDefinition, CheckError, StepLog};
use crate::error::{PresubmitError, Result};
use crate::output::{format_time, plural};

/// File name of the per-check log inside its output directory.
pub const STEP_LOG_NAME: &str = "step.log";

/// Policy for a single run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Continue after a failing check instead of stopping.
    pub keep_going: bool,
    /// Polled before each check and handed to the running check.
    pub cancel: CancellationToken,
}

impl RunOptions {
    #[must_use]
    pub fn keep_going(keep_going: bool) -> Self {
        Self {
            keep_going,
            ..Self::default()
        }
    }
}

/// Runs presubmit programs over a fixed set of repository-relative paths.
#[derive(Debug, Clone)]
pub struct Presubmit {
    repository_root: PathBuf,
    output_directory: PathBuf,
    paths: Vec<PathBuf>,
}

impl Presubmit {
    #[must_use]
    pub fn new(repository_root: PathBuf, output_directory: PathBuf, paths: Vec<PathBuf>) -> Self {
        Self {
            repository_root,
            output_directory,
            paths,
        }
    }

    #[must_use]
    pub fn repository_root(&self) -> &Path {
        &self.repository_root
    }

    #[must_use]
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Execute `program` and return the aggregated result.
    ///
    /// # Errors
    /// Returns an error only if a check's output directory or log file cannot
    /// be created. Check failures are reported through the summary.
    pub fn run(
        &self,
        program: &[CheckDefinition],
        options: &RunOptions,
        observer: &mut dyn RunObserver,
    ) -> Result<RunSummary> {
        let resolved = resolve_program(program, &self.paths);

        tracing::info!(
            "Running {} of {} on {} in {}",
            resolved.len(),
            plural(program.len(), "check"),
            plural(self.paths.len(), "file"),
            self.repository_root.display()
        );
        tracing::debug!(
            "Paths:\n{}",
            self.paths
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join("\n")
        );
        tracing::debug!(
            "Checks:\n{}",
            resolved
                .iter()
                .map(|r| r.check.name())
                .collect::<Vec<_>>()
                .join("\n")
        );

        observer.run_started(&RunPlan {
            repository_root: &self.repository_root,
            paths: &self.paths,
            registered: program.len(),
            executed: resolved.len(),
        });

        let start = Instant::now();
        let records = self.execute_checks(&resolved, options, observer)?;
        let summary = RunSummary::new(resolved.len(), records, start.elapsed());

        tracing::debug!(
            "Finished running {} checks on {} in {:.1} s",
            summary.total(),
            plural(self.paths.len(), "file"),
            summary.total_elapsed.as_secs_f64()
        );

        observer.run_finished(&summary, self.paths.len());
        Ok(summary)
    }

    fn execute_checks(
        &self,
        program: &[ResolvedCheck<'_>],
        options: &RunOptions,
        observer: &mut dyn RunObserver,
    ) -> Result<Vec<CheckRecord>> {
        let total = program.len();
        let mut records = Vec::with_capacity(total);

        for (index, resolved) in (1..).zip(program) {
            let name = resolved.check.name();
            if options.cancel.is_cancelled() {
                tracing::warn!("Run cancelled before {name} started");
                break;
            }

            observer.check_started(index, total, name, resolved.paths.len());

            let ctx = self.context(resolved, &options.cancel)?;
            ctx.log.debug(format!(
                "[{index}/{total}] Running {name} on {}",
                plural(ctx.paths.len(), "file")
            ));

            let start = Instant::now();
            let outcome = run_and_classify(resolved.check, &ctx);
            let elapsed = start.elapsed();

            ctx.log.debug(format!("{name} {outcome}"));
            ctx.log.debug(format!("{name} duration:{}", format_time(elapsed)));
            ctx.log.flush();

            let record = CheckRecord {
                index,
                name: name.to_string(),
                path_count: resolved.paths.len(),
                outcome,
                elapsed,
            };
            observer.check_finished(&record, total);
            records.push(record);

            match outcome {
                CheckOutcome::Pass => {}
                CheckOutcome::Cancel => break,
                CheckOutcome::Fail if !options.keep_going => break,
                CheckOutcome::Fail => {}
            }
        }

        Ok(records)
    }

    /// Prepare the output directory and step log for one check.
    fn context(
        &self,
        resolved: &ResolvedCheck<'_>,
        cancel: &CancellationToken,
    ) -> Result<CheckContext> {
        let output_directory =
            absolute(&self.output_directory.join(resolved.check.log_directory_name()));
        fs::create_dir_all(&output_directory).map_err(|source| {
            PresubmitError::OutputDirectory {
                path: output_directory.clone(),
                source,
            }
        })?;

        let log_path = output_directory.join(STEP_LOG_NAME);
        let log = StepLog::create(&log_path, resolved.check.name()).map_err(|source| {
            PresubmitError::OutputDirectory {
                path: log_path.clone(),
                source,
            }
        })?;

        Ok(CheckContext {
            repository_root: absolute(&self.repository_root),
            output_directory,
            paths: resolved.paths.clone(),
            log,
            cancel: cancel.clone(),
        })
    }
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Invoke the check and turn whatever happened into an outcome.
///
/// Cancellation observed during the call wins over the returned value.
fn run_and_classify(check: &CheckDefinition, ctx: &CheckContext) -> CheckOutcome {
    let result = panic::catch_unwind(AssertUnwindSafe(|| check.run(ctx)));

    if ctx.is_cancelled() {
        ctx.log.warn(format!("{} was cancelled", check.name()));
        return CheckOutcome::Cancel;
    }

    match result {
        Ok(Ok(())) => CheckOutcome::Pass,
        Ok(Err(CheckError::Cancelled)) => {
            ctx.log.warn(format!("{} was cancelled", check.name()));
            CheckOutcome::Cancel
        }
        Ok(Err(CheckError::Failure(failure))) => {
            let message = failure.to_string();
            if !message.is_empty() {
                ctx.log.warn(message);
            }
            CheckOutcome::Fail
        }
        Ok(Err(err)) => {
            ctx.log.error(format!(
                "Presubmit check {} failed!\n{}",
                check.name(),
                err.diagnostic()
            ));
            CheckOutcome::Fail
        }
        Err(payload) => {
            ctx.log.error(format!(
                "Presubmit check {} panicked: {}",
                check.name(),
                panic_message(&*payload)
            ));
            CheckOutcome::Fail
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic payload".to_string())
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
