//! Text classifier: multi-label keyword classification against a fixed
//! taxonomy.
//!
//! A taxonomy is an enum implementing [`Category`]; each variant carries an
//! ordered list of lowercase keyword stems. A line belongs to every category
//! with at least one stem contained in the lowercased line, so categories
//! are never mutually exclusive.

mod paths;
pub mod routes;

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

pub use paths::path_areas;

pub trait Category: Copy + Eq + 'static {
    /// Every category of the taxonomy, in display order.
    const ALL: &'static [Self];

    /// Lowercase keyword stems matched by containment.
    fn patterns(self) -> &'static [&'static str];

    /// Stable machine key (used in JSON output).
    fn key(self) -> &'static str;

    fn index(self) -> usize {
        Self::ALL.iter().position(|c| *c == self).unwrap_or(0)
    }
}

/// Categories of `C` whose stems occur in `line`, in taxonomy order.
/// Blank input classifies to nothing.
pub fn classify<C: Category>(line: &str) -> Vec<C> {
    let lower = line.trim().to_lowercase();
    if lower.is_empty() {
        return Vec::new();
    }
    C::ALL
        .iter()
        .copied()
        .filter(|c| c.patterns().iter().any(|p| lower.contains(p)))
        .collect()
}

/// A count for every category of a taxonomy, defaulting to 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTally<C: Category> {
    counts: Vec<(C, usize)>,
}

impl<C: Category> Default for CategoryTally<C> {
    fn default() -> Self {
        Self {
            counts: C::ALL.iter().map(|&c| (c, 0)).collect(),
        }
    }
}

impl<C: Category> CategoryTally<C> {
    pub fn add(&mut self, category: C, n: usize) {
        self.counts[category.index()].1 += n;
    }

    pub fn add_all(&mut self, categories: &[C]) {
        for &c in categories {
            self.add(c, 1);
        }
    }

    pub fn get(&self, category: C) -> usize {
        self.counts[category.index()].1
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, n)| n).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (C, usize)> + '_ {
        self.counts.iter().copied()
    }

    /// Each count as a rounded percentage of the total; all zero when the
    /// total is zero.
    pub fn percentages(&self) -> CategoryTally<C> {
        let total = self.total();
        CategoryTally {
            counts: self
                .counts
                .iter()
                .map(|&(c, n)| (c, crate::util::percent(n, total)))
                .collect(),
        }
    }

    /// Category with the highest count; the first in taxonomy order wins ties.
    /// `None` when everything is zero.
    pub fn leader(&self) -> Option<C> {
        let mut best: Option<(C, usize)> = None;
        for &(c, n) in &self.counts {
            if n > 0 && best.is_none_or(|(_, b)| n > b) {
                best = Some((c, n));
            }
        }
        best.map(|(c, _)| c)
    }
}

impl<C: Category> Serialize for CategoryTally<C> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.counts.len()))?;
        for (c, n) in &self.counts {
            map.serialize_entry(c.key(), n)?;
        }
        map.end()
    }
}

/// Contributor expertise areas (the radar axes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpertiseArea {
    Frontend,
    Backend,
    Database,
    Devops,
    Docs,
    Testing,
}

impl ExpertiseArea {
    pub fn label(self) -> &'static str {
        match self {
            ExpertiseArea::Frontend => "Frontend",
            ExpertiseArea::Backend => "Backend",
            ExpertiseArea::Database => "Database",
            ExpertiseArea::Devops => "DevOps",
            ExpertiseArea::Docs => "Docs",
            ExpertiseArea::Testing => "Testing",
        }
    }
}

impl Category for ExpertiseArea {
    const ALL: &'static [Self] = &[
        ExpertiseArea::Frontend,
        ExpertiseArea::Backend,
        ExpertiseArea::Database,
        ExpertiseArea::Devops,
        ExpertiseArea::Docs,
        ExpertiseArea::Testing,
    ];

    fn patterns(self) -> &'static [&'static str] {
        match self {
            ExpertiseArea::Frontend => &[
                "frontend",
                "front-end",
                "component",
                "css",
                "style",
                "layout",
                "button",
                "modal",
                "navbar",
                "react",
                "vue",
                "svelte",
                "tailwind",
                "responsive",
                "animation",
                "dark mode",
            ],
            ExpertiseArea::Backend => &[
                "backend",
                "back-end",
                "api",
                "endpoint",
                "server",
                "middleware",
                "controller",
                "webhook",
                "graphql",
                "cron",
                "queue",
            ],
            ExpertiseArea::Database => &[
                "database",
                "schema",
                "migration",
                "sql",
                "prisma",
                "supabase",
                "mongo",
                "postgres",
                "redis",
                "seed data",
            ],
            ExpertiseArea::Devops => &[
                "deploy",
                "docker",
                "ci:",
                "ci/cd",
                "pipeline",
                "workflow",
                "kubernetes",
                "k8s",
                "terraform",
                "nginx",
                "vercel",
                "netlify",
                "infra",
            ],
            ExpertiseArea::Docs => &[
                "docs",
                "readme",
                "documentation",
                "changelog",
                "typo",
                "guide",
            ],
            ExpertiseArea::Testing => &[
                "test",
                "jest",
                "vitest",
                "cypress",
                "playwright",
                "coverage",
                "e2e",
                "mock",
            ],
        }
    }

    fn key(self) -> &'static str {
        match self {
            ExpertiseArea::Frontend => "frontend",
            ExpertiseArea::Backend => "backend",
            ExpertiseArea::Database => "database",
            ExpertiseArea::Devops => "devops",
            ExpertiseArea::Docs => "docs",
            ExpertiseArea::Testing => "testing",
        }
    }
}

/// Commit-category bars for the whole history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitKind {
    Feature,
    Fix,
    Refactor,
    Docs,
    Test,
    Chore,
}

impl CommitKind {
    pub fn label(self) -> &'static str {
        match self {
            CommitKind::Feature => "Features",
            CommitKind::Fix => "Fixes",
            CommitKind::Refactor => "Refactors",
            CommitKind::Docs => "Docs",
            CommitKind::Test => "Tests",
            CommitKind::Chore => "Chores",
        }
    }
}

impl Category for CommitKind {
    const ALL: &'static [Self] = &[
        CommitKind::Feature,
        CommitKind::Fix,
        CommitKind::Refactor,
        CommitKind::Docs,
        CommitKind::Test,
        CommitKind::Chore,
    ];

    fn patterns(self) -> &'static [&'static str] {
        match self {
            CommitKind::Feature => &["feat", "add", "implement", "introduce", "create", "support"],
            CommitKind::Fix => &["fix", "bug", "patch", "resolve", "hotfix", "crash", "broken"],
            CommitKind::Refactor => &[
                "refactor",
                "cleanup",
                "clean up",
                "restructure",
                "rename",
                "simplify",
                "reorganize",
            ],
            CommitKind::Docs => &["docs", "readme", "documentation", "changelog"],
            CommitKind::Test => &["test", "coverage"],
            CommitKind::Chore => &[
                "chore", "bump", "deps", "upgrade", "config", "ci:", "release", "version",
            ],
        }
    }

    fn key(self) -> &'static str {
        match self {
            CommitKind::Feature => "feature",
            CommitKind::Fix => "fix",
            CommitKind::Refactor => "refactor",
            CommitKind::Docs => "docs",
            CommitKind::Test => "test",
            CommitKind::Chore => "chore",
        }
    }
}

/// Commit subjects folded into per-kind counts; subjects matching no kind
/// are counted as `uncategorized`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommitKindBreakdown {
    pub kinds: CategoryTally<CommitKind>,
    pub uncategorized: usize,
}

impl CommitKindBreakdown {
    pub fn from_subjects<'a>(subjects: impl IntoIterator<Item = &'a str>) -> Self {
        subjects.into_iter().fold(Self::default(), |mut acc, s| {
            let kinds = classify::<CommitKind>(s);
            if kinds.is_empty() {
                acc.uncategorized += 1;
            } else {
                acc.kinds.add_all(&kinds);
            }
            acc
        })
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
