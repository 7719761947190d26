//! Checks shipped with the tool and the subprocess helper configured checks
//! are built on.

mod command;
mod pragma_once;

pub use command::{CommandCheck, call};
pub use pragma_once::pragma_once;

use crate::check::{CheckDefinition, define};
use crate::error::Result;
use crate::filter::PathFilter;

/// Names accepted by `builtin = "..."` in the configuration file.
pub const BUILTIN_NAMES: &[&str] = &["pragma_once"];

/// Look up a built-in check by name, with its default filter.
///
/// # Errors
/// Returns an error if the built-in's filter fails to compile.
pub fn builtin(name: &str) -> Result<Option<CheckDefinition>> {
    match name {
        "pragma_once" => define(pragma_once, PathFilter::ends_with([".h"]), false).map(Some),
        _ => Ok(None),
    }
}

/// Program used when the configuration does not list any checks.
///
/// # Errors
/// Returns an error if a built-in's filter fails to compile.
pub fn default_program() -> Result<Vec<CheckDefinition>> {
    Ok(BUILTIN_NAMES
        .iter()
        .map(|name| builtin(name))
        .collect::<Result<Vec<_>>>()?
        .into_iter()
        .flatten()
        .collect())
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
