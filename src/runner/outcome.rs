use std::time::Duration;

/// How a single check ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Check completed successfully.
    Pass,
    /// Check failed.
    Fail,
    /// Check didn't complete.
    Cancel,
}

impl CheckOutcome {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "PASSED",
            Self::Fail => "FAILED",
            Self::Cancel => "CANCEL",
        }
    }
}

impl std::fmt::Display for CheckOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one executed check, as seen by reporters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckRecord {
    /// 1-based position in the executed program.
    pub index: usize,
    pub name: String,
    pub path_count: usize,
    pub outcome: CheckOutcome,
    pub elapsed: Duration,
}

/// Aggregated counts for a run.
///
/// `skipped` counts checks of the executed program that were never reached
/// because the run stopped early. Checks dropped before execution for having
/// no matching paths are not part of any count.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub total_elapsed: Duration,
    pub records: Vec<CheckRecord>,
}

impl RunSummary {
    /// Build a summary for a program of `program_len` checks.
    #[must_use]
    pub fn new(program_len: usize, records: Vec<CheckRecord>, total_elapsed: Duration) -> Self {
        let passed = records
            .iter()
            .filter(|r| r.outcome == CheckOutcome::Pass)
            .count();
        let failed = records
            .iter()
            .filter(|r| r.outcome == CheckOutcome::Fail)
            .count();

        Self {
            passed,
            failed,
            skipped: program_len.saturating_sub(passed + failed),
            total_elapsed,
            records,
        }
    }

    /// Number of checks in the executed program.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.passed + self.failed + self.skipped
    }

    #[must_use]
    pub const fn success(&self) -> bool {
        self.failed == 0 && self.skipped == 0
    }

    #[must_use]
    pub fn was_cancelled(&self) -> bool {
        self.records
            .iter()
            .any(|r| r.outcome == CheckOutcome::Cancel)
    }

    /// Overall outcome shown in the summary line.
    #[must_use]
    pub const fn outcome(&self) -> CheckOutcome {
        if self.success() {
            CheckOutcome::Pass
        } else {
            CheckOutcome::Fail
        }
    }
}
