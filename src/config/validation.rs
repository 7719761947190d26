//! Configuration semantic validation.
//!
//! Runs after parsing, before any check is built or run.

use regex::Regex;

use crate::checks::BUILTIN_NAMES;
use crate::config::{CheckConfig, Config};
use crate::error::{PresubmitError, Result};

/// Validates semantic correctness of a configuration.
///
/// # Errors
/// Returns an error if a `[[check]]` entry does not name exactly one of
/// `command` and `builtin`, a command is empty or unnamed, a built-in is
/// unknown, or any exclude pattern fails to compile.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_patterns(&config.run.exclude)?;
    for (i, check) in config.checks.iter().enumerate() {
        validate_check(i, check)?;
    }
    Ok(())
}

fn validate_check(i: usize, check: &CheckConfig) -> Result<()> {
    match (&check.command, &check.builtin) {
        (Some(_), Some(_)) => {
            return Err(PresubmitError::Config(format!(
                "check[{i}] sets both `command` and `builtin`; choose one"
            )));
        }
        (None, None) => {
            return Err(PresubmitError::Config(format!(
                "check[{i}] needs either `command` or `builtin`"
            )));
        }
        (Some(command), None) => {
            if command.is_empty() || command[0].is_empty() {
                return Err(PresubmitError::Config(format!(
                    "check[{i}].command must name a program"
                )));
            }
            if check.name.as_deref().is_none_or(str::is_empty) {
                return Err(PresubmitError::Config(format!(
                    "check[{i}] runs a command and needs a `name`"
                )));
            }
        }
        (None, Some(builtin)) => {
            if !BUILTIN_NAMES.contains(&builtin.as_str()) {
                return Err(PresubmitError::Config(format!(
                    "check[{i}].builtin: unknown check '{builtin}' (available: {})",
                    BUILTIN_NAMES.join(", ")
                )));
            }
        }
    }
    validate_patterns(&check.exclude)
}

fn validate_patterns(patterns: &[String]) -> Result<()> {
    for pattern in patterns {
        Regex::new(pattern).map_err(|source| PresubmitError::InvalidPattern {
            pattern: pattern.clone(),
            source,
        })?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
