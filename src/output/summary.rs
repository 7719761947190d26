use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use super::plural;

/// Shape of the directory overview printed before a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileSummaryOptions {
    /// Directory depth to group by, counting the file itself as a level.
    pub levels: usize,
    /// Maximum number of lines before small directories are folded together.
    pub max_lines: usize,
    /// Extensions listed per directory before the rest become "other".
    pub max_types: usize,
}

impl Default for FileSummaryOptions {
    fn default() -> Self {
        Self {
            levels: 2,
            max_lines: 12,
            max_types: 3,
        }
    }
}

type Counts = IndexMap<String, usize>;

fn group_of(path: &Path, levels: usize) -> PathBuf {
    let directories: Vec<_> = path
        .parent()
        .map(|parent| parent.components().collect())
        .unwrap_or_default();
    let depth = levels.saturating_sub(1).min(directories.len());
    if depth == 0 {
        return PathBuf::from(".");
    }
    directories[..depth].iter().collect()
}

fn suffix_of(path: &Path) -> String {
    match path.extension().map(|ext| ext.to_string_lossy()) {
        Some(ext) if !ext.is_empty() => format!(".{ext}"),
        _ => String::new(),
    }
}

fn total(counts: &Counts) -> usize {
    counts.values().sum()
}

/// Summarize `paths` by file type in each top-level directory.
///
/// Returns one line per directory, e.g. `"src/  4 files (3 .rs, 1 other)"`.
/// Files without an extension are counted in the total and folded into
/// "other" but never listed on their own.
#[must_use]
pub fn file_summary(paths: &[PathBuf], options: &FileSummaryOptions) -> Vec<String> {
    let mut all_counts: IndexMap<PathBuf, Counts> = IndexMap::new();
    for path in paths {
        *all_counts
            .entry(group_of(path, options.levels))
            .or_default()
            .entry(suffix_of(path))
            .or_default() += 1;
    }

    let mut groups: Vec<(String, Counts)> = if all_counts.len() > options.max_lines {
        let mut by_size: Vec<_> = all_counts.into_iter().collect();
        by_size.sort_by_key(|(_, counts)| std::cmp::Reverse(total(counts)));

        let keep = options.max_lines.saturating_sub(1);
        let others = by_size.split_off(keep.min(by_size.len()));
        by_size.sort_by(|a, b| a.0.cmp(&b.0));

        let mut merged = Counts::new();
        for (_, counts) in &others {
            for (suffix, count) in counts {
                *merged.entry(suffix.clone()).or_default() += count;
            }
        }

        let mut groups: Vec<_> = by_size
            .into_iter()
            .map(|(dir, counts)| (dir.display().to_string(), counts))
            .collect();
        groups.push((format!("({})", plural(others.len(), "other")), merged));
        groups
    } else {
        let mut sorted: Vec<_> = all_counts.into_iter().collect();
        sorted.sort_by(|a, b| a.0.cmp(&b.0));
        sorted
            .into_iter()
            .map(|(dir, counts)| (dir.display().to_string(), counts))
            .collect()
    };

    let width = groups
        .iter()
        .map(|(dir, _)| dir.chars().count() + 1)
        .max()
        .unwrap_or(0)
        + 1;

    groups
        .iter_mut()
        .map(|(dir, counts)| {
            let file_total = total(counts);
            counts.shift_remove("");

            let types = if counts.is_empty() {
                String::new()
            } else {
                let mut extensions: Vec<(String, usize)> =
                    counts.iter().map(|(s, c)| (s.clone(), *c)).collect();
                extensions.sort_by_key(|(_, count)| std::cmp::Reverse(*count));
                extensions.truncate(options.max_types);

                let shown: usize = extensions.iter().map(|(_, c)| c).sum();
                if file_total > shown {
                    extensions.push(("other".to_string(), file_total - shown));
                }
                let listed: Vec<_> = extensions
                    .iter()
                    .map(|(ext, count)| format!("{count} {ext}"))
                    .collect();
                format!(" ({})", listed.join(", "))
            };

            let root = format!("{dir}/ ");
            format!(
                "{root:<width$} {}{types}",
                plural(file_total, "file")
            )
        })
        .collect()
}

#[cfg(test)]
#[path = "summary_tests.rs"]
mod tests;
