mod cancel;
mod context;
mod definition;
mod failure;
mod log;

pub use cancel::CancellationToken;
pub use context::CheckContext;
pub use definition::{Check, CheckDefinition, define, derive_name, sanitize_name};
pub use failure::{CheckError, CheckFailure, CheckResult};
pub use log::{LogLevel, StepLog};

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
