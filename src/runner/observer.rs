use std::path::{Path, PathBuf};

use super::{CheckRecord, RunSummary};

/// What is about to run.
#[derive(Debug, Clone, Copy)]
pub struct RunPlan<'a> {
    pub repository_root: &'a Path,
    pub paths: &'a [PathBuf],
    /// Checks registered by the caller.
    pub registered: usize,
    /// Checks left after dropping those with no relevant paths.
    pub executed: usize,
}

/// Receives run progress as it happens.
///
/// Observers only look; they never influence which checks run.
pub trait RunObserver {
    fn run_started(&mut self, _plan: &RunPlan<'_>) {}

    fn check_started(&mut self, _index: usize, _total: usize, _name: &str, _path_count: usize) {}

    fn check_finished(&mut self, _record: &CheckRecord, _total: usize) {}

    fn run_finished(&mut self, _summary: &RunSummary, _path_count: usize) {}
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentObserver;

impl RunObserver for SilentObserver {}
