use std::path::{Path, PathBuf};

use crate::error::{PresubmitError, Result};

use super::Config;
use super::validation::validate_config;

/// File looked up at the repository root.
pub const CONFIG_FILE_NAME: &str = ".presubmit.toml";

/// Trait for loading configuration from various sources.
pub trait ConfigLoader {
    /// Load `.presubmit.toml` from `repository_root`, or the default
    /// configuration when there is none.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read, parsed or
    /// validated.
    fn load(&self, repository_root: &Path) -> Result<Config>;

    /// Load configuration from a specific path, which must exist.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, parsed or validated.
    fn load_from_path(&self, path: &Path) -> Result<Config>;
}

/// Trait for filesystem operations (for testability).
pub trait FileSystem {
    /// Read file contents as a string.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read.
    fn read_to_string(&self, path: &Path) -> std::io::Result<String>;

    /// Check if a path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Real filesystem implementation.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// Loads and validates `.presubmit.toml`.
#[derive(Debug)]
pub struct FileConfigLoader<F: FileSystem = RealFileSystem> {
    fs: F,
}

impl Default for FileConfigLoader<RealFileSystem> {
    fn default() -> Self {
        Self::new()
    }
}

impl FileConfigLoader<RealFileSystem> {
    #[must_use]
    pub const fn new() -> Self {
        Self { fs: RealFileSystem }
    }
}

impl<F: FileSystem> FileConfigLoader<F> {
    #[must_use]
    pub const fn with_fs(fs: F) -> Self {
        Self { fs }
    }

    /// Parse and validate configuration text.
    ///
    /// # Errors
    /// Returns an error if the text is not valid TOML, has unknown keys, or
    /// fails semantic validation.
    pub fn parse(content: &str) -> Result<Config> {
        let config: Config = toml::from_str(content)?;
        validate_config(&config)?;
        Ok(config)
    }

    fn read(&self, path: &Path) -> Result<Config> {
        let content = self.fs.read_to_string(path).map_err(|e| {
            PresubmitError::Config(format!("Failed to read {}: {e}", path.display()))
        })?;
        tracing::debug!("Loading configuration from {}", path.display());
        Self::parse(&content)
    }
}

impl<F: FileSystem> ConfigLoader for FileConfigLoader<F> {
    fn load(&self, repository_root: &Path) -> Result<Config> {
        let path: PathBuf = repository_root.join(CONFIG_FILE_NAME);
        if !self.fs.exists(&path) {
            tracing::debug!("No {CONFIG_FILE_NAME} in {}", repository_root.display());
            return Ok(Config::default());
        }
        self.read(&path)
    }

    fn load_from_path(&self, path: &Path) -> Result<Config> {
        self.read(path)
    }
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
