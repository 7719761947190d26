use std::path::PathBuf;

use indexmap::IndexMap;

use crate::check::CheckDefinition;
use crate::filter::PathFilter;

/// A check of the executed program with the paths it will receive.
#[derive(Debug, Clone)]
pub struct ResolvedCheck<'a> {
    pub check: &'a CheckDefinition,
    pub paths: Vec<PathBuf>,
}

/// Map every check of `program` to its matched paths.
///
/// Filtering runs once per distinct filter value; checks with field-equal
/// filters share the result. A check whose subset is empty is dropped unless
/// it is always-run. Registration order is preserved.
#[must_use]
pub fn resolve_program<'a>(
    program: &'a [CheckDefinition],
    universe: &[PathBuf],
) -> Vec<ResolvedCheck<'a>> {
    let mut by_filter: IndexMap<PathFilter, Vec<PathBuf>> = IndexMap::new();
    for check in program {
        by_filter
            .entry(check.filter().clone())
            .or_insert_with(|| check.compiled_filter().resolve(universe));
    }

    program
        .iter()
        .filter_map(|check| {
            let paths = by_filter.get(check.filter()).cloned().unwrap_or_default();
            if paths.is_empty() && !check.always_run() {
                tracing::debug!("Skipping \"{}\": no relevant files", check.name());
                return None;
            }
            Some(ResolvedCheck { check, paths })
        })
        .collect()
}

#[cfg(test)]
#[path = "resolve_tests.rs"]
mod tests;
