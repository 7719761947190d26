pub mod check;
pub mod checks;
pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod git;
pub mod interrupt;
pub mod logging;
pub mod output;
pub mod runner;

pub use error::{PresubmitError, Result};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_CHECKS_FAILED: i32 = 1;
pub const EXIT_CONFIG_ERROR: i32 = 2;
/// Exit code after a second interrupt ends the process outright.
pub const EXIT_INTERRUPTED: i32 = 130;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
