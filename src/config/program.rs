use crate::check::CheckDefinition;
use crate::checks::{CommandCheck, builtin, default_program};
use crate::error::{PresubmitError, Result};
use crate::filter::PathFilter;

use super::{CheckConfig, Config};

/// Build the program described by `config`.
///
/// With no `[[check]]` entries the built-in checks form the program.
///
/// # Errors
/// Returns a configuration error for entries that do not describe a check, or
/// an invalid-pattern error for exclude patterns that do not compile.
pub fn build_program(config: &Config) -> Result<Vec<CheckDefinition>> {
    if config.checks.is_empty() {
        return default_program();
    }
    config.checks.iter().map(build_check).collect()
}

fn build_check(entry: &CheckConfig) -> Result<CheckDefinition> {
    let definition = match (&entry.command, &entry.builtin) {
        (Some(command), None) => {
            let (program, args) = command.split_first().ok_or_else(|| {
                PresubmitError::Config("check command must name a program".to_string())
            })?;
            let name = entry.name.clone().unwrap_or_else(|| program.clone());
            CheckDefinition::new(
                CommandCheck::new(name, program.clone(), args.to_vec())
                    .with_pass_paths(entry.pass_paths),
            )
        }
        (None, Some(name)) => builtin(name)?.ok_or_else(|| {
            PresubmitError::Config(format!("unknown built-in check '{name}'"))
        })?,
        _ => {
            return Err(PresubmitError::Config(
                "check needs exactly one of `command` and `builtin`".to_string(),
            ));
        }
    };

    let filter = match &entry.endswith {
        Some(suffixes) => PathFilter::new(suffixes.clone(), entry.exclude.clone()),
        None => definition.filter().excluding(entry.exclude.clone()),
    };
    let always_run = entry.always_run || definition.always_run();

    let definition = definition.with_filter(filter)?.with_always_run(always_run);
    Ok(match &entry.name {
        Some(name) if entry.builtin.is_some() => definition.named(name.clone()),
        _ => definition,
    })
}

#[cfg(test)]
#[path = "program_tests.rs"]
mod tests;
