use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PresubmitError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid regular expression: {pattern}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to prepare output directory: {}", path.display())]
    OutputDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON serialization error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    #[error("Git error: {0}")]
    Git(String),

    #[error("Not a git repository: {0}")]
    GitRepoNotFound(String),
}

impl PresubmitError {
    /// Short category name used when printing errors.
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::Config(_) | Self::InvalidPattern { .. } | Self::TomlParse(_) => "Config",
            Self::Io(_) | Self::OutputDirectory { .. } => "IO",
            Self::JsonSerialize(_) => "Output",
            Self::Git(_) | Self::GitRepoNotFound(_) => "Git",
        }
    }

    /// Actionable hint for the user, when one exists.
    #[must_use]
    pub const fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::Config(_) | Self::TomlParse(_) => {
                Some("Check the .presubmit.toml file format and check definitions")
            }
            Self::InvalidPattern { .. } => {
                Some("Patterns are regular expressions, not globs (use '.*' instead of '*')")
            }
            Self::GitRepoNotFound(_) => {
                Some("Run from inside a git working tree, or use --repository to point at one")
            }
            Self::OutputDirectory { .. } => Some("Check that the output directory is writable"),
            Self::Io(_) | Self::JsonSerialize(_) | Self::Git(_) => None,
        }
    }

    /// Returns true when the error was raised because the target is not a repository.
    #[must_use]
    pub const fn is_not_a_repository(&self) -> bool {
        matches!(self, Self::GitRepoNotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, PresubmitError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
