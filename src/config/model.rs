use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Contents of `.presubmit.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub run: RunConfig,

    /// `[[check]]` entries, in program order.
    #[serde(default, rename = "check")]
    pub checks: Vec<CheckConfig>,
}

/// Run-wide settings under `[run]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// Continue after failing checks. OR-ed with `--keep-going`.
    #[serde(default)]
    pub keep_going: bool,

    /// Where check artifacts go, relative to the repository root.
    #[serde(default)]
    pub output_directory: Option<PathBuf>,

    /// Regexes removing paths from the whole run.
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// One `[[check]]` entry.
///
/// Exactly one of `command` and `builtin` must be set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CheckConfig {
    /// Display name. Required for commands; overrides a built-in's name.
    #[serde(default)]
    pub name: Option<String>,

    /// Program followed by its arguments.
    #[serde(default)]
    pub command: Option<Vec<String>>,

    /// Name of a check shipped with the tool.
    #[serde(default)]
    pub builtin: Option<String>,

    /// Path suffixes. Unset keeps the built-in's filter, or matches
    /// everything for commands.
    #[serde(default)]
    pub endswith: Option<Vec<String>>,

    /// Regexes that must match a whole path to exclude it.
    #[serde(default)]
    pub exclude: Vec<String>,

    #[serde(default)]
    pub always_run: bool,

    /// Append the matched paths to the command line.
    #[serde(default = "default_true")]
    pub pass_paths: bool,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            name: None,
            command: None,
            builtin: None,
            endswith: None,
            exclude: Vec::new(),
            always_run: false,
            pass_paths: true,
        }
    }
}

const fn default_true() -> bool {
    true
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
