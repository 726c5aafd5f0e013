//! Text search source: recursive line search over the work tree.
//!
//! Dependency and build directories are always pruned (see
//! [`crate::walk::EXCLUDED_DIRS`]). Unreadable and binary files are skipped,
//! so a search never fails; it only finds less.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::util::{extension, is_binary};
use crate::walk::{ExcludeFilter, relative_files};

/// Files above this size are treated as generated and not searched.
const MAX_FILE_BYTES: u64 = 1024 * 1024;

/// A matching line with `path:line` provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub path: String,
    pub line: usize,
    pub text: String,
}

pub trait SearchSource {
    /// Every searchable file, as sorted `/`-separated relative paths.
    fn files(&self) -> &[String];

    /// Contents of a file from [`SearchSource::files`]; `None` when the file
    /// is unreadable, binary, or too large.
    fn read(&self, path: &str) -> Option<String>;

    /// Whether `path` exists, listed or not (ignored files are not listed).
    fn exists(&self, path: &str) -> bool {
        self.files().iter().any(|f| f == path)
    }

    /// Lines matching `pattern` in files whose extension is in `exts`
    /// (all files when `exts` is empty), in file then line order.
    fn grep(&self, pattern: &Regex, exts: &[&str]) -> Vec<SearchHit> {
        let mut hits = Vec::new();
        for path in self.files() {
            if !has_extension(path, exts) {
                continue;
            }
            let Some(content) = self.read(path) else {
                continue;
            };
            for (idx, line) in content.lines().enumerate() {
                if pattern.is_match(line) {
                    hits.push(SearchHit {
                        path: path.clone(),
                        line: idx + 1,
                        text: line.trim().to_string(),
                    });
                }
            }
        }
        hits
    }
}

pub fn has_extension(path: &str, exts: &[&str]) -> bool {
    exts.is_empty() || extension(path).is_some_and(|e| exts.contains(&e.as_str()))
}

/// [`SearchSource`] over the files of a directory tree.
pub struct TreeSearch {
    root: PathBuf,
    files: Vec<String>,
}

impl TreeSearch {
    pub fn new(root: &Path, filter: &ExcludeFilter) -> Self {
        Self {
            root: root.to_path_buf(),
            files: relative_files(root, filter),
        }
    }
}

impl SearchSource for TreeSearch {
    fn files(&self) -> &[String] {
        &self.files
    }

    fn exists(&self, path: &str) -> bool {
        self.root.join(path).is_file()
    }

    fn read(&self, path: &str) -> Option<String> {
        let full = self.root.join(path);
        let meta = fs::metadata(&full).ok()?;
        if meta.len() > MAX_FILE_BYTES {
            tracing::debug!(path, "skipping large file");
            return None;
        }
        let bytes = fs::read(&full).ok()?;
        if is_binary(&bytes) {
            return None;
        }
        Some(String::from_utf8_lossy(&bytes).into_owned())
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
pub(crate) mod tests;
