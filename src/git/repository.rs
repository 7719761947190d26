use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::error::{PresubmitError, Result};

use super::{FileQuery, PathSource};

/// Path source backed by a git repository's index and working tree.
#[derive(Debug, Clone)]
pub struct GitRepository {
    repo_path: PathBuf,
    workdir: PathBuf,
    subdirectory: PathBuf,
}

impl GitRepository {
    /// Find the repository containing `dir`.
    ///
    /// Files are later listed relative to the repository root but restricted
    /// to the part of the tree under `dir`.
    ///
    /// # Errors
    /// Returns [`PresubmitError::GitRepoNotFound`] if `dir` is not inside a
    /// git working tree.
    pub fn discover(dir: &Path) -> Result<Self> {
        let repo = gix::discover(dir)
            .map_err(|_| PresubmitError::GitRepoNotFound(dir.display().to_string()))?;
        let workdir = repo
            .workdir()
            .ok_or_else(|| PresubmitError::GitRepoNotFound(dir.display().to_string()))?;

        let workdir = dunce::canonicalize(workdir).unwrap_or_else(|_| workdir.to_path_buf());
        let subdirectory = dunce::canonicalize(dir)
            .ok()
            .and_then(|dir| dir.strip_prefix(&workdir).ok().map(Path::to_path_buf))
            .unwrap_or_default();

        Ok(Self {
            repo_path: repo.path().to_path_buf(),
            workdir,
            subdirectory,
        })
    }

    /// Root of the working tree.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.workdir
    }

    /// Directory the repository was discovered from, relative to [`root`](Self::root).
    #[must_use]
    pub fn subdirectory(&self) -> &Path {
        &self.subdirectory
    }

    fn open_repo(&self) -> Result<gix::Repository> {
        gix::open(&self.repo_path)
            .map_err(|e| PresubmitError::Git(format!("Failed to open git repository: {e}")))
    }

    fn base_tree_paths(repo: &gix::Repository, base: &str) -> Result<HashMap<PathBuf, gix::ObjectId>> {
        let commit = repo
            .rev_parse_single(base)
            .map_err(|e| PresubmitError::Git(format!("Failed to parse reference '{base}': {e}")))?
            .object()
            .map_err(|e| PresubmitError::Git(format!("Failed to get object for '{base}': {e}")))?
            .peel_to_commit()
            .map_err(|e| PresubmitError::Git(format!("Failed to peel to commit '{base}': {e}")))?;
        let tree = commit
            .tree()
            .map_err(|e| PresubmitError::Git(format!("Failed to get tree for '{base}': {e}")))?;

        let mut paths = HashMap::new();
        collect_tree_paths(&tree, Path::new(""), &mut paths)?;
        Ok(paths)
    }

    /// Whether `path` equals or lies under one of the explicit paths, or
    /// under the discovery directory when none were given.
    fn in_scope(&self, path: &Path, roots: &[PathBuf]) -> bool {
        if roots.is_empty() {
            return path.starts_with(&self.subdirectory);
        }
        roots.iter().any(|root| path.starts_with(root))
    }

    /// Whether the working-tree copy of `path` differs from the blob `base_id`.
    ///
    /// When the staged blob is the base blob, a size that no longer matches
    /// the index entry means the file changed, and it is not read.
    fn worktree_differs(
        &self,
        repo: &gix::Repository,
        entry: &gix::index::Entry,
        path: &Path,
        base_id: gix::ObjectId,
    ) -> Result<bool> {
        let file = self.workdir.join(path);
        let metadata = fs::symlink_metadata(&file)?;
        if entry.id == base_id && u32::try_from(metadata.len()).ok() != Some(entry.stat.size) {
            return Ok(true);
        }

        let current = if metadata.file_type().is_symlink() {
            fs::read_link(&file)?
                .to_string_lossy()
                .into_owned()
                .into_bytes()
        } else {
            fs::read(&file)?
        };
        let base = repo
            .find_object(base_id)
            .map_err(|e| PresubmitError::Git(format!("Failed to read blob {base_id}: {e}")))?;
        Ok(base.data != current)
    }
}

fn collect_tree_paths(
    tree: &gix::Tree<'_>,
    prefix: &Path,
    paths: &mut HashMap<PathBuf, gix::ObjectId>,
) -> Result<()> {
    for entry in tree.iter() {
        let entry =
            entry.map_err(|e| PresubmitError::Git(format!("Failed to read tree entry: {e}")))?;
        let name = std::str::from_utf8(entry.filename())
            .map_err(|e| PresubmitError::Git(format!("Invalid filename encoding: {e}")))?;
        let path = prefix.join(name);

        match entry.mode().kind() {
            gix::object::tree::EntryKind::Blob
            | gix::object::tree::EntryKind::BlobExecutable
            | gix::object::tree::EntryKind::Link => {
                paths.insert(path, entry.oid().into());
            }
            gix::object::tree::EntryKind::Tree => {
                let subtree = entry.object().map_err(|e| {
                    PresubmitError::Git(format!("Failed to get subtree object: {e}"))
                })?;
                collect_tree_paths(&subtree.into_tree(), &path, paths)?;
            }
            gix::object::tree::EntryKind::Commit => {}
        }
    }
    Ok(())
}

/// Resolve `.` and `..` lexically so `./src`, `src` and `lib/../src` compare equal.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                _ => normalized.push(component),
            },
            other => normalized.push(other),
        }
    }
    normalized
}

impl PathSource for GitRepository {
    fn list_files(&self, query: &FileQuery) -> Result<Vec<PathBuf>> {
        let repo = self.open_repo()?;
        let index = repo
            .index_or_empty()
            .map_err(|e| PresubmitError::Git(format!("Failed to open git index: {e}")))?;

        let base_paths = query
            .base
            .as_deref()
            .map(|base| Self::base_tree_paths(&repo, base))
            .transpose()?;

        let roots: Vec<PathBuf> = query
            .paths
            .iter()
            .map(|p| normalize(&self.subdirectory.join(p)))
            .collect();

        let mut files = BTreeSet::new();
        for entry in index.entries() {
            let path = PathBuf::from(String::from_utf8_lossy(entry.path(&index)).as_ref());

            if !self.in_scope(&path, &roots) || !self.workdir.join(&path).exists() {
                continue;
            }
            let text = path.to_string_lossy();
            if query.exclude.iter().any(|re| re.is_match(&text)) {
                continue;
            }
            // Compared against the working tree, so unstaged edits count too.
            if let Some(base_paths) = &base_paths
                && let Some(&base_id) = base_paths.get(&path)
                && !self.worktree_differs(&repo, entry, &path, base_id)?
            {
                continue;
            }
            files.insert(path);
        }

        tracing::debug!(
            "Listed {} files{}",
            files.len(),
            query
                .base
                .as_deref()
                .map(|b| format!(" changed since {b}"))
                .unwrap_or_default()
        );
        Ok(files.into_iter().collect())
    }
}

#[cfg(test)]
#[path = "repository_tests.rs"]
mod tests;
