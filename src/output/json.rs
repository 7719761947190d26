use serde::Serialize;

use crate::error::Result;
use crate::runner::CheckRecord;

use super::{OutputFormatter, RunReport};

pub struct JsonReporter;

#[derive(Serialize)]
struct JsonOutput {
    success: bool,
    passed: usize,
    failed: usize,
    skipped: usize,
    total_elapsed_seconds: f64,
    checks: Vec<CheckEntry>,
}

#[derive(Serialize)]
struct CheckEntry {
    index: usize,
    name: String,
    path_count: usize,
    outcome: &'static str,
    elapsed_seconds: f64,
}

impl OutputFormatter for JsonReporter {
    fn format(&self, report: &RunReport<'_>) -> Result<String> {
        let summary = report.summary;
        let output = JsonOutput {
            success: summary.success(),
            passed: summary.passed,
            failed: summary.failed,
            skipped: summary.skipped,
            total_elapsed_seconds: summary.total_elapsed.as_secs_f64(),
            checks: summary.records.iter().map(convert_record).collect(),
        };

        Ok(serde_json::to_string_pretty(&output)?)
    }
}

fn convert_record(record: &CheckRecord) -> CheckEntry {
    CheckEntry {
        index: record.index,
        name: record.name.clone(),
        path_count: record.path_count,
        outcome: record.outcome.as_str(),
        elapsed_seconds: record.elapsed.as_secs_f64(),
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
