//! Repository data source: commit history, changed files and ignore rules,
//! read through libgit2.

use std::error::Error;
use std::path::{Path, PathBuf};

use git2::{Delta, DiffOptions, Repository, Sort};
use indexmap::IndexMap;
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum GitError {
    #[error("not a git repository (or any parent): {0}")]
    NotARepository(#[source] git2::Error),
    #[error("bare repositories are not supported")]
    BareRepository,
}

pub struct GitRepo {
    repo: Repository,
    root: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeStatus {
    Added,
    Modified,
    Deleted,
    Renamed,
    Other,
}

impl From<Delta> for ChangeStatus {
    fn from(delta: Delta) -> Self {
        match delta {
            Delta::Added => ChangeStatus::Added,
            Delta::Modified => ChangeStatus::Modified,
            Delta::Deleted => ChangeStatus::Deleted,
            Delta::Renamed => ChangeStatus::Renamed,
            _ => ChangeStatus::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangedFile {
    pub path: String,
    pub status: ChangeStatus,
}

/// One non-merge commit with its first-parent file changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub author: String,
    pub email: String,
    pub time: i64,
    pub subject: String,
    pub files: Vec<ChangedFile>,
}

/// Shortlog-style line: author and number of commits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorSummary {
    pub name: String,
    pub email: String,
    pub commits: usize,
}

impl GitRepo {
    pub fn open(path: &Path) -> Result<Self, GitError> {
        let repo = Repository::discover(path).map_err(GitError::NotARepository)?;
        let root = repo
            .workdir()
            .ok_or(GitError::BareRepository)?
            .to_path_buf();
        Ok(Self { repo, root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory name of the work tree, used as the repository identity.
    pub fn name(&self) -> String {
        self.root
            .canonicalize()
            .unwrap_or_else(|_| self.root.clone())
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "repository".to_string())
    }

    pub fn branch(&self) -> Option<String> {
        let head = self.repo.head().ok()?;
        head.shorthand().map(str::to_string)
    }

    pub fn remote_url(&self) -> Option<String> {
        let remote = self.repo.find_remote("origin").ok()?;
        remote.url().map(str::to_string)
    }

    /// Non-merge commits reachable from HEAD, newest first. `depth` caps the
    /// number returned; `since` drops commits older than the timestamp.
    /// An unborn HEAD yields an empty history.
    pub fn commits(
        &self,
        depth: Option<usize>,
        since: Option<i64>,
    ) -> Result<Vec<CommitRecord>, Box<dyn Error>> {
        if self.repo.is_empty()? {
            return Ok(Vec::new());
        }

        let mut revwalk = self.repo.revwalk()?;
        revwalk.push_head()?;
        revwalk.set_sorting(Sort::TIME)?;

        let limit = depth.unwrap_or(usize::MAX);
        let mut result = Vec::new();

        for oid in revwalk {
            if result.len() >= limit {
                break;
            }
            let Ok(oid) = oid else { continue };
            let Ok(commit) = self.repo.find_commit(oid) else {
                continue;
            };

            // Skip merge commits
            if commit.parent_count() > 1 {
                continue;
            }

            let time = commit.time().seconds();
            if let Some(since_ts) = since
                && time < since_ts
            {
                continue;
            }

            let files = match self.changed_files(&commit) {
                Ok(f) => f,
                Err(err) => {
                    tracing::debug!("diff {oid}: {err}");
                    Vec::new()
                }
            };

            let author = commit.author();
            result.push(CommitRecord {
                author: author.name().unwrap_or("unknown").to_string(),
                email: author.email().unwrap_or("unknown").to_string(),
                time,
                subject: commit.summary().unwrap_or_default().to_string(),
                files,
            });
        }

        Ok(result)
    }

    /// Location of `dir` inside the work tree; empty for the root itself or
    /// for a directory outside it.
    pub fn relative_dir(&self, dir: &Path) -> PathBuf {
        let (Ok(dir), Ok(root)) = (dir.canonicalize(), self.root.canonicalize()) else {
            return PathBuf::new();
        };
        dir.strip_prefix(&root)
            .map(Path::to_path_buf)
            .unwrap_or_default()
    }

    /// Whether `rel_path` (relative to the work tree) is excluded by the
    /// repository's ignore rules. Lookup failures count as not ignored.
    pub fn is_ignored(&self, rel_path: &Path) -> bool {
        self.repo.is_path_ignored(rel_path).unwrap_or(false)
    }

    fn changed_files(&self, commit: &git2::Commit) -> Result<Vec<ChangedFile>, Box<dyn Error>> {
        let tree = commit.tree()?;
        let parent_tree = if commit.parent_count() > 0 {
            Some(commit.parent(0)?.tree()?)
        } else {
            None
        };

        let mut opts = DiffOptions::new();
        let diff =
            self.repo
                .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), Some(&mut opts))?;

        let mut files = Vec::new();
        for delta in diff.deltas() {
            let path = delta.new_file().path().or_else(|| delta.old_file().path());
            if let Some(path) = path {
                files.push(ChangedFile {
                    path: path.to_string_lossy().replace('\\', "/"),
                    status: delta.status().into(),
                });
            }
        }
        Ok(files)
    }
}

/// Group commits by author email (first-seen name wins) and count them,
/// most commits first; ties keep first-seen order.
pub fn shortlog(commits: &[CommitRecord]) -> Vec<AuthorSummary> {
    let mut by_email: IndexMap<String, AuthorSummary> = IndexMap::new();
    for c in commits {
        by_email
            .entry(c.email.to_lowercase())
            .and_modify(|a| a.commits += 1)
            .or_insert_with(|| AuthorSummary {
                name: c.author.clone(),
                email: c.email.clone(),
                commits: 1,
            });
    }
    let mut result: Vec<AuthorSummary> = by_email.into_values().collect();
    result.sort_by(|a, b| b.commits.cmp(&a.commits));
    result
}

#[cfg(test)]
#[path = "mod_test.rs"]
pub(crate) mod tests;
