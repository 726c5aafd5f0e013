use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;

use crate::util::{basename, dir_segments, extension};

/// Dependency, build-output and tool directories that are never scanned.
pub const EXCLUDED_DIRS: &[&str] = &[
    ".git",
    "node_modules",
    "bower_components",
    "dist",
    "build",
    "out",
    ".next",
    ".nuxt",
    ".output",
    ".svelte-kit",
    ".vercel",
    ".turbo",
    "target",
    "vendor",
    "coverage",
    "__pycache__",
    ".venv",
    "venv",
];

/// Test directory names.
pub const TEST_DIRS: &[&str] = &["tests", "test", "__tests__", "spec", "e2e", "cypress"];

/// Directory and glob exclusions applied on top of `.gitignore`.
#[derive(Debug, Clone, Default)]
pub struct ExcludeFilter {
    dirs: Vec<String>,
    globs: Option<GlobSet>,
}

impl ExcludeFilter {
    pub fn new(extra_dirs: &[String], globs: &[String]) -> Result<Self, globset::Error> {
        let mut dirs: Vec<String> = EXCLUDED_DIRS.iter().map(|d| d.to_string()).collect();
        dirs.extend(extra_dirs.iter().cloned());

        let globs = if globs.is_empty() {
            None
        } else {
            let mut builder = GlobSetBuilder::new();
            for pattern in globs {
                builder.add(Glob::new(pattern)?);
            }
            Some(builder.build()?)
        };

        Ok(Self { dirs, globs })
    }

    pub fn excludes_dir(&self, name: &str) -> bool {
        EXCLUDED_DIRS.contains(&name) || self.dirs.iter().any(|d| d == name)
    }

    /// `rel` is a `/`-separated path relative to the walk root.
    pub fn excludes_file(&self, rel: &str) -> bool {
        if dir_segments(rel).any(|seg| self.excludes_dir(seg)) {
            return true;
        }
        self.globs.as_ref().is_some_and(|g| g.is_match(rel))
    }
}

/// Build a directory walker that respects `.gitignore`, keeps dotfiles
/// (so `.env` style files stay visible), and prunes excluded directories.
pub fn walk(root: &Path, filter: &ExcludeFilter) -> ignore::Walk {
    let filter = filter.clone();
    WalkBuilder::new(root)
        .hidden(false)
        .follow_links(false)
        .filter_entry(move |entry| {
            if entry.file_type().is_some_and(|ft| ft.is_dir())
                && entry.depth() > 0
                && let Some(name) = entry.file_name().to_str()
            {
                return !filter.excludes_dir(name);
            }
            true
        })
        .build()
}

/// Every regular file under `root`, as sorted `/`-separated relative paths.
pub fn relative_files(root: &Path, filter: &ExcludeFilter) -> Vec<String> {
    let mut files = Vec::new();
    for entry in walk(root, filter) {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                tracing::debug!("walk: {err}");
                continue;
            }
        };
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        let Ok(rel) = entry.path().strip_prefix(root) else {
            continue;
        };
        let rel = rel.to_string_lossy().replace('\\', "/");
        if !filter.excludes_file(&rel) {
            files.push(rel);
        }
    }
    files.sort();
    files
}

/// Check whether a repository path is a test file, either by living under a
/// test directory or by following a per-language test naming convention.
pub fn is_test_file(path: &str) -> bool {
    if dir_segments(path).any(|seg| TEST_DIRS.contains(&seg)) {
        return true;
    }

    let file_name = basename(path);
    let Some(ext) = extension(path) else {
        return false;
    };
    let base = &file_name[..file_name.len() - ext.len() - 1];

    match ext.as_str() {
        "rs" | "go" | "exs" | "dart" => base.ends_with("_test"),
        "py" => base.starts_with("test_") || base.ends_with("_test"),
        "rb" => base.ends_with("_test") || base.ends_with("_spec"),
        "php" => base.ends_with("Test") || base.ends_with("_test"),
        "js" | "jsx" | "mjs" | "cjs" | "ts" | "tsx" | "mts" | "cts" | "vue" | "svelte" => {
            base.ends_with(".test") || base.ends_with(".spec") || base.ends_with(".stories")
        }
        "java" | "kt" | "kts" | "cs" | "swift" => {
            base.ends_with("Test") || base.ends_with("Tests")
        }
        _ => false,
    }
}

#[cfg(test)]
#[path = "walk_test.rs"]
mod tests;
