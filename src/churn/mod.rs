//! File churn: how often each source file shows up as modified across
//! the commit history.

mod report;

use std::error::Error;
use std::path::Path;

use serde::Serialize;

use crate::git::{ChangeStatus, CommitRecord, GitRepo};
use crate::report_helpers;
use crate::util::{OrderedCounter, basename, extension, parse_since};

use report::{print_json, print_report};

/// Extensions counted as source code for churn.
pub const CHURN_EXTENSIONS: &[&str] = &[
    "js", "jsx", "ts", "tsx", "mjs", "cjs", "vue", "svelte", "astro", "py", "go", "rs", "java",
    "kt", "rb", "php", "cs", "swift", "c", "cpp", "h", "css", "scss",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileChurn {
    /// Basename, for display.
    pub name: String,
    pub path: String,
    pub changes: usize,
}

pub fn is_churn_source(path: &str) -> bool {
    extension(path).is_some_and(|e| CHURN_EXTENSIONS.contains(&e.as_str()))
}

/// Paths of every "modified" diff entry across `commits`, restricted to
/// source extensions.
pub fn modified_paths(commits: &[CommitRecord]) -> impl Iterator<Item = &str> {
    commits
        .iter()
        .flat_map(|c| c.files.iter())
        .filter(|f| f.status == ChangeStatus::Modified)
        .map(|f| f.path.as_str())
        .filter(|p| is_churn_source(p))
}

/// Count occurrences per path and keep the `top` most changed. Ties keep
/// the order in which paths were first seen.
pub fn rank<'a>(paths: impl IntoIterator<Item = &'a str>, top: usize) -> Vec<FileChurn> {
    let counter: OrderedCounter = paths.into_iter().collect();
    counter
        .top(top)
        .into_iter()
        .map(|(path, changes)| FileChurn {
            name: basename(&path).to_string(),
            path,
            changes,
        })
        .collect()
}

pub fn run(
    path: &Path,
    json: bool,
    top: usize,
    since: Option<&str>,
) -> Result<(), Box<dyn Error>> {
    let git_repo = GitRepo::open(path)?;
    let since_ts = since.map(parse_since).transpose()?;

    let commits = git_repo.commits(None, since_ts)?;
    let mut ranked = rank(modified_paths(&commits), top);

    report_helpers::output_results(&mut ranked, top, json, print_json, print_report)
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
