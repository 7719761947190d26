use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Expected failure raised by a check, optionally pointing at a file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckFailure {
    pub message: String,
    pub path: Option<PathBuf>,
}

impl CheckFailure {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: None,
        }
    }

    /// Failure without a message. Nothing is logged for it.
    #[must_use]
    pub fn silent() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn at(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }
}

impl fmt::Display for CheckFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "{}: {}", path.display(), self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for CheckFailure {}

/// Everything a check implementation can return besides success.
#[derive(Error, Debug)]
pub enum CheckError {
    /// Designated check failure. Recorded as FAILED, message logged if non-empty.
    #[error("{0}")]
    Failure(CheckFailure),

    /// The check observed cancellation and stopped. Halts the whole run.
    #[error("check was cancelled")]
    Cancelled,

    /// Any other error. Recorded as FAILED with its full source chain.
    #[error("{0}")]
    Other(Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl CheckError {
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure(CheckFailure::new(message))
    }

    pub fn other<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Other(Box::new(error))
    }

    /// Renders the error and every source beneath it, one per line.
    #[must_use]
    pub fn diagnostic(&self) -> String {
        let mut lines = vec![format!("{self}")];
        let mut source = match self {
            Self::Other(inner) => inner.source(),
            Self::Failure(_) | Self::Cancelled => None,
        };
        while let Some(err) = source {
            lines.push(format!("caused by: {err}"));
            source = err.source();
        }
        lines.join("\n")
    }
}

impl From<CheckFailure> for CheckError {
    fn from(failure: CheckFailure) -> Self {
        Self::Failure(failure)
    }
}

impl From<std::io::Error> for CheckError {
    fn from(err: std::io::Error) -> Self {
        Self::other(err)
    }
}

impl From<crate::error::PresubmitError> for CheckError {
    fn from(err: crate::error::PresubmitError) -> Self {
        Self::other(err)
    }
}

pub type CheckResult = std::result::Result<(), CheckError>;
