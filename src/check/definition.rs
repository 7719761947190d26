use std::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::filter::{CompiledFilter, PathFilter};

use super::{CheckContext, CheckResult};

/// A single validation unit.
///
/// Any `Fn(&CheckContext) -> CheckResult` is a check. The single context
/// parameter is enforced by the type system, so there is nothing left to
/// validate about the signature at runtime.
pub trait Check: Send + Sync {
    /// Run the check against the paths in `ctx`.
    ///
    /// # Errors
    /// Returns [`CheckError`](super::CheckError) when the check does not pass.
    fn run(&self, ctx: &CheckContext) -> CheckResult;

    /// Stable name used in reports and as the log directory key.
    ///
    /// Defaults to the last path segment of the implementing type, which for
    /// a plain `fn` item is the function's own name.
    fn name(&self) -> String {
        derive_name(std::any::type_name::<Self>())
    }
}

impl<F> Check for F
where
    F: Fn(&CheckContext) -> CheckResult + Send + Sync,
{
    fn run(&self, ctx: &CheckContext) -> CheckResult {
        self(ctx)
    }
}

/// Reduce a fully qualified type name to its last segment, without generics.
///
/// `my_crate::checks::pragma_once` becomes `pragma_once`.
#[must_use]
pub fn derive_name(type_name: &str) -> String {
    let base = type_name.split('<').next().unwrap_or(type_name);
    base.rsplit("::").next().unwrap_or(base).to_string()
}

/// Turn a check name into a directory name.
///
/// Every maximal run of characters that are neither alphanumeric nor `_`
/// becomes a single `_`, then the result is lower-cased.
#[must_use]
pub fn sanitize_name(name: &str) -> String {
    let mut sanitized = String::with_capacity(name.len());
    let mut in_run = false;
    for c in name.chars() {
        if c.is_alphanumeric() || c == '_' {
            sanitized.push(c);
            in_run = false;
        } else if !in_run {
            sanitized.push('_');
            in_run = true;
        }
    }
    sanitized.to_lowercase()
}

/// A check bound to its path filter, ready to be placed in a program.
///
/// Immutable once built. Cloning is cheap and clones share the implementation.
#[derive(Clone)]
pub struct CheckDefinition {
    name: String,
    filter: PathFilter,
    compiled: CompiledFilter,
    always_run: bool,
    check: Arc<dyn Check>,
}

impl CheckDefinition {
    /// Wrap `check` with the match-everything filter; it is dropped from a run
    /// only when the run has no paths at all.
    pub fn new<C: Check + 'static>(check: C) -> Self {
        Self {
            name: check.name(),
            filter: PathFilter::default(),
            compiled: CompiledFilter::default(),
            always_run: false,
            check: Arc::new(check),
        }
    }

    /// Wrap a closure under an explicit name.
    pub fn from_fn<F>(name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&CheckContext) -> CheckResult + Send + Sync + 'static,
    {
        Self::new(check).named(name)
    }

    /// Replace the path filter.
    ///
    /// # Errors
    /// Returns a configuration error if an exclude pattern is invalid.
    pub fn with_filter(mut self, filter: PathFilter) -> Result<Self> {
        self.compiled = filter.compile()?;
        self.filter = filter;
        Ok(self)
    }

    #[must_use]
    pub const fn with_always_run(mut self, always_run: bool) -> Self {
        self.always_run = always_run;
        self
    }

    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn filter(&self) -> &PathFilter {
        &self.filter
    }

    #[must_use]
    pub const fn compiled_filter(&self) -> &CompiledFilter {
        &self.compiled
    }

    #[must_use]
    pub const fn always_run(&self) -> bool {
        self.always_run
    }

    /// Directory name under the output directory holding this check's artifacts.
    #[must_use]
    pub fn log_directory_name(&self) -> String {
        sanitize_name(&self.name)
    }

    /// Invoke the wrapped implementation.
    ///
    /// # Errors
    /// Propagates whatever the implementation returns.
    pub fn run(&self, ctx: &CheckContext) -> CheckResult {
        self.check.run(ctx)
    }
}

impl fmt::Debug for CheckDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckDefinition")
            .field("name", &self.name)
            .field("filter", &self.filter)
            .field("always_run", &self.always_run)
            .finish_non_exhaustive()
    }
}

/// Build a check definition in one step.
///
/// # Errors
/// Returns a configuration error if `filter` contains an invalid exclude pattern.
/// Nothing is deferred to run time.
pub fn define<C: Check + 'static>(
    check: C,
    filter: PathFilter,
    always_run: bool,
) -> Result<CheckDefinition> {
    Ok(CheckDefinition::new(check)
        .with_filter(filter)?
        .with_always_run(always_run))
}
