use std::path::{Path, PathBuf};

use super::{CancellationToken, StepLog};

/// Everything a check receives when it runs.
///
/// Built by the orchestrator right before the check is invoked and dropped
/// right after. `paths` are repository-relative; use [`CheckContext::absolute_paths`]
/// when a check needs to open the files from an arbitrary working directory.
#[derive(Debug, Clone)]
pub struct CheckContext {
    pub repository_root: PathBuf,
    pub output_directory: PathBuf,
    pub paths: Vec<PathBuf>,
    pub log: StepLog,
    pub cancel: CancellationToken,
}

impl CheckContext {
    /// Context with a discarding log and a fresh cancellation token.
    #[must_use]
    pub fn new(repository_root: PathBuf, output_directory: PathBuf, paths: Vec<PathBuf>) -> Self {
        Self {
            repository_root,
            output_directory,
            paths,
            log: StepLog::discard("check"),
            cancel: CancellationToken::new(),
        }
    }

    #[must_use]
    pub fn with_log(mut self, log: StepLog) -> Self {
        self.log = log;
        self
    }

    #[must_use]
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Resolve a repository-relative path against the repository root.
    #[must_use]
    pub fn absolute(&self, path: &Path) -> PathBuf {
        self.repository_root.join(path)
    }

    #[must_use]
    pub fn absolute_paths(&self) -> Vec<PathBuf> {
        self.paths.iter().map(|p| self.absolute(p)).collect()
    }

    /// Long-running checks should poll this and return
    /// [`CheckError::Cancelled`](super::CheckError::Cancelled) once it is set.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}
