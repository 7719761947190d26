//! Path filters: which repository paths a check cares about.
//!
//! A [`PathFilter`] is a plain value (suffix allow-list plus exclude regexes)
//! so that checks sharing an equal filter can be grouped by value. Matching is
//! done through a [`CompiledFilter`], built once when a check is defined.

use std::path::{Path, PathBuf};

use regex::Regex;

use crate::error::{PresubmitError, Result};

pub trait FileFilter {
    fn should_include(&self, path: &Path) -> bool;
}

/// Suffix allow-list and full-match exclude patterns.
///
/// The default filter has a single empty suffix and no excludes, so it
/// matches every path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathFilter {
    endswith: Vec<String>,
    exclude: Vec<String>,
}

impl PathFilter {
    #[must_use]
    pub fn new<E, X>(endswith: E, exclude: X) -> Self
    where
        E: IntoIterator,
        E::Item: Into<String>,
        X: IntoIterator,
        X::Item: Into<String>,
    {
        Self {
            endswith: endswith.into_iter().map(Into::into).collect(),
            exclude: exclude.into_iter().map(Into::into).collect(),
        }
    }

    /// Filter that keeps paths ending with any of `suffixes`.
    #[must_use]
    pub fn ends_with<E>(suffixes: E) -> Self
    where
        E: IntoIterator,
        E::Item: Into<String>,
    {
        Self::new(suffixes, Vec::<String>::new())
    }

    /// Returns a copy of this filter with `patterns` appended to the excludes.
    #[must_use]
    pub fn excluding<X>(&self, patterns: X) -> Self
    where
        X: IntoIterator,
        X::Item: Into<String>,
    {
        let mut exclude = self.exclude.clone();
        exclude.extend(patterns.into_iter().map(Into::into));
        Self {
            endswith: self.endswith.clone(),
            exclude,
        }
    }

    #[must_use]
    pub fn endswith(&self) -> &[String] {
        &self.endswith
    }

    #[must_use]
    pub fn exclude(&self) -> &[String] {
        &self.exclude
    }

    /// Compile the exclude patterns.
    ///
    /// # Errors
    /// Returns an error if any exclude pattern is not a valid regular expression.
    pub fn compile(&self) -> Result<CompiledFilter> {
        let exclude = self
            .exclude
            .iter()
            .map(|pattern| compile_full_match(pattern))
            .collect::<Result<Vec<_>>>()?;

        Ok(CompiledFilter {
            endswith: self.endswith.clone(),
            exclude,
        })
    }
}

impl Default for PathFilter {
    fn default() -> Self {
        Self {
            endswith: vec![String::new()],
            exclude: Vec::new(),
        }
    }
}

/// Anchors `pattern` so it only matches the whole path text.
fn compile_full_match(pattern: &str) -> Result<Regex> {
    // Validate the bare pattern first so the error points at what the user wrote.
    Regex::new(pattern).map_err(|source| PresubmitError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })?;

    Regex::new(&format!("^(?:{pattern})$")).map_err(|source| PresubmitError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// A [`PathFilter`] with its exclude patterns compiled.
#[derive(Debug, Clone)]
pub struct CompiledFilter {
    endswith: Vec<String>,
    exclude: Vec<Regex>,
}

impl CompiledFilter {
    fn has_matching_suffix(&self, text: &str) -> bool {
        self.endswith.iter().any(|suffix| text.ends_with(suffix.as_str()))
    }

    fn is_excluded(&self, text: &str) -> bool {
        self.exclude.iter().any(|re| re.is_match(text))
    }

    /// Keep the paths of `universe` this filter accepts, in their original order.
    #[must_use]
    pub fn resolve(&self, universe: &[PathBuf]) -> Vec<PathBuf> {
        universe
            .iter()
            .filter(|path| self.should_include(path))
            .cloned()
            .collect()
    }
}

impl Default for CompiledFilter {
    fn default() -> Self {
        Self {
            endswith: vec![String::new()],
            exclude: Vec::new(),
        }
    }
}

impl FileFilter for CompiledFilter {
    fn should_include(&self, path: &Path) -> bool {
        let text = path.to_string_lossy();
        self.has_matching_suffix(&text) && !self.is_excluded(&text)
    }
}

/// Compute the subset of `universe` matched by `filter`.
///
/// # Errors
/// Returns an error if an exclude pattern of `filter` is invalid.
pub fn resolve(filter: &PathFilter, universe: &[PathBuf]) -> Result<Vec<PathBuf>> {
    Ok(filter.compile()?.resolve(universe))
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
