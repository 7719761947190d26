#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

/// Creates an `assert_cmd` Command for the presubmit-guard binary.
#[macro_export]
macro_rules! presubmit_guard {
    () => {
        assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("presubmit-guard"))
    };
}

/// A temporary git repository for integration tests.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    /// Creates an empty, initialized repository.
    pub fn new() -> Self {
        let fixture = Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        };
        fixture.git(&["init", "-q"]);
        fixture.git(&["config", "user.email", "test@test.com"]);
        fixture.git(&["config", "user.name", "Test User"]);
        fixture.git(&["config", "commit.gpgsign", "false"]);
        fixture
    }

    /// Runs git in the repository and asserts it succeeded.
    pub fn git(&self, args: &[&str]) {
        let output = Command::new("git")
            .args(args)
            .current_dir(self.dir.path())
            .output()
            .expect("Failed to run git");
        assert!(output.status.success(), "git {args:?} failed: {output:?}");
    }

    /// Creates a file with the given content in the repository.
    pub fn create_file(&self, relative_path: &str, content: &str) {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
    }

    /// Creates a file and stages it.
    pub fn add_file(&self, relative_path: &str, content: &str) {
        self.create_file(relative_path, content);
        self.git(&["add", relative_path]);
    }

    /// Stages everything and commits.
    pub fn commit(&self, message: &str) {
        self.git(&["add", "-A"]);
        self.git(&["commit", "-q", "-m", message]);
    }

    /// Writes `.presubmit.toml` and stages it.
    pub fn create_config(&self, content: &str) {
        self.add_file(".presubmit.toml", content);
    }

    /// Returns the path to the repository.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Reads a file relative to the repository root.
    pub fn read(&self, relative_path: &str) -> String {
        fs::read_to_string(self.dir.path().join(relative_path)).expect("Failed to read file")
    }
}
