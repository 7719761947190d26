//! Listing the files a presubmit run should look at.

mod repository;

pub use repository::GitRepository;

use std::path::PathBuf;

use regex::Regex;

use crate::error::Result;

/// Which files to list.
#[derive(Debug, Clone, Default)]
pub struct FileQuery {
    /// Only list files whose working-tree content differs from this revision,
    /// staged or not, plus files added since.
    pub base: Option<String>,
    /// Restrict to these files or directories, relative to the directory the
    /// repository was discovered from. Empty means everything.
    pub paths: Vec<PathBuf>,
    /// Drop paths in which any of these patterns is found.
    pub exclude: Vec<Regex>,
}

/// Produces the repository-relative path list for a run.
pub trait PathSource {
    /// List matching files, sorted and without duplicates.
    ///
    /// # Errors
    /// Returns an error if the underlying repository cannot be read or the
    /// base revision cannot be resolved.
    fn list_files(&self, query: &FileQuery) -> Result<Vec<PathBuf>>;
}
