use indexmap::IndexMap;
use serde::Serialize;

use crate::classify::{CategoryTally, ExpertiseArea, classify, path_areas};
use crate::git::CommitRecord;
use crate::util::{OrderedCounter, basename, dir_segments, extension};

/// Directory names too generic to describe an area of the codebase.
const AREA_STOPLIST: &[&str] = &["src", "app", "lib", ".", "packages", "source"];

const FRONTEND_EXTS: &[&str] = &[
    "tsx", "jsx", "vue", "svelte", "astro", "css", "scss", "sass", "less", "html",
];
/// Extensions that only appear in projects using a component framework.
const FRAMEWORK_EXTS: &[&str] = &["tsx", "jsx", "vue", "svelte"];
const BACKEND_EXTS: &[&str] = &[
    "py", "go", "rs", "java", "rb", "php", "cs", "kt", "scala", "ex", "exs", "c", "cpp", "h",
    "swift",
];
/// Script extensions shared by browser and server code.
const AMBIGUOUS_EXTS: &[&str] = &["js", "ts", "mjs", "cjs"];
const DOC_EXTS: &[&str] = &["md", "mdx", "rst", "adoc", "txt"];
const CONFIG_EXTS: &[&str] = &[
    "yml",
    "yaml",
    "json",
    "toml",
    "ini",
    "env",
    "cfg",
    "conf",
    "tf",
    "sh",
    "dockerfile",
    "makefile",
];

pub const TOP_AREAS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Focus {
    Frontend,
    Backend,
    Fullstack,
    Docs,
    ConfigDevops,
    General,
}

impl Focus {
    pub fn label(&self) -> &'static str {
        match self {
            Focus::Frontend => "frontend",
            Focus::Backend => "backend",
            Focus::Fullstack => "fullstack",
            Focus::Docs => "docs",
            Focus::ConfigDevops => "config-devops",
            Focus::General => "general",
        }
    }
}

/// One commit as seen by the aggregator: its subject and changed paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitEntry {
    pub subject: String,
    pub files: Vec<String>,
}

/// A contributor's history, newest commit first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContributorHistory {
    pub name: String,
    pub email: String,
    pub commits: Vec<CommitEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contributor {
    pub name: String,
    pub email: String,
    pub commits: usize,
    pub categories: CategoryTally<ExpertiseArea>,
    pub radar: CategoryTally<ExpertiseArea>,
    pub focus: Focus,
    pub top_areas: Vec<String>,
    /// Area touch counts, highest first (feeds the heatmap).
    #[serde(skip)]
    pub area_touches: Vec<(String, usize)>,
}

/// Running totals while folding over a contributor's commits.
#[derive(Default)]
struct Tally {
    categories: CategoryTally<ExpertiseArea>,
    extensions: OrderedCounter,
    areas: OrderedCounter,
}

impl Tally {
    fn absorb(mut self, commit: &CommitEntry) -> Self {
        // Subject and each file count separately: one commit can add weight
        // from both signals.
        self.categories
            .add_all(&classify::<ExpertiseArea>(&commit.subject));
        for path in &commit.files {
            self.categories.add_all(&path_areas(path));
            if let Some(ext) = extension_key(path) {
                self.extensions.bump(&ext);
            }
            if let Some(area) = area_of(path) {
                self.areas.bump(area);
            }
        }
        self
    }
}

/// Extension used for focus detection; `Dockerfile` and `Makefile` count
/// under their own name.
fn extension_key(path: &str) -> Option<String> {
    extension(path).or_else(|| {
        let name = basename(path).to_ascii_lowercase();
        matches!(name.as_str(), "dockerfile" | "makefile").then_some(name)
    })
}

/// First directory segment that is not a generic container name.
/// Root-level files have no area.
pub fn area_of(path: &str) -> Option<&str> {
    dir_segments(path).find(|seg| !AREA_STOPLIST.contains(seg))
}

/// Map the most-touched extension to a focus label. Ties go to the
/// extension seen first.
fn derive_focus(extensions: &OrderedCounter) -> Focus {
    let Some((top, _)) = extensions.top(1).into_iter().next() else {
        return Focus::General;
    };
    let top = top.as_str();

    if FRONTEND_EXTS.contains(&top) {
        Focus::Frontend
    } else if BACKEND_EXTS.contains(&top) {
        Focus::Backend
    } else if AMBIGUOUS_EXTS.contains(&top) {
        if extensions.keys().any(|e| FRAMEWORK_EXTS.contains(&e)) {
            Focus::Fullstack
        } else {
            Focus::Backend
        }
    } else if DOC_EXTS.contains(&top) {
        Focus::Docs
    } else if CONFIG_EXTS.contains(&top) {
        Focus::ConfigDevops
    } else {
        Focus::General
    }
}

/// Fold one contributor's history (at most `depth` most recent commits)
/// into a profile. An empty history yields all-zero counts and `General`.
pub fn aggregate(history: &ContributorHistory, depth: usize) -> Contributor {
    let tally = history
        .commits
        .iter()
        .take(depth)
        .fold(Tally::default(), Tally::absorb);

    let area_touches = tally.areas.ranked();
    let top_areas = area_touches
        .iter()
        .take(TOP_AREAS)
        .map(|(a, _)| a.clone())
        .collect();

    Contributor {
        name: history.name.clone(),
        email: history.email.clone(),
        commits: history.commits.len(),
        radar: tally.categories.percentages(),
        categories: tally.categories,
        focus: derive_focus(&tally.extensions),
        top_areas,
        area_touches,
    }
}

/// Split a repository-wide commit stream (newest first) into per-author
/// histories keyed by email; the first name seen for an email is kept.
pub fn histories(commits: &[CommitRecord]) -> Vec<ContributorHistory> {
    let mut by_email: IndexMap<String, ContributorHistory> = IndexMap::new();
    for c in commits {
        let entry = by_email
            .entry(c.email.to_lowercase())
            .or_insert_with(|| ContributorHistory {
                name: c.author.clone(),
                email: c.email.clone(),
                commits: Vec::new(),
            });
        entry.commits.push(CommitEntry {
            subject: c.subject.clone(),
            files: c.files.iter().map(|f| f.path.clone()).collect(),
        });
    }
    by_email.into_values().collect()
}

/// Aggregate every author in the stream, most commits first (ties keep
/// first-seen order).
pub fn aggregate_all(commits: &[CommitRecord], depth: usize) -> Vec<Contributor> {
    let mut contributors: Vec<Contributor> = histories(commits)
        .iter()
        .map(|h| aggregate(h, depth))
        .collect();
    contributors.sort_by(|a, b| b.commits.cmp(&a.commits));
    contributors
}

/// Contributor × area matrix over the busiest areas.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Heatmap {
    pub areas: Vec<String>,
    pub rows: Vec<HeatmapRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeatmapRow {
    pub name: String,
    pub cells: Vec<usize>,
}

pub fn heatmap(contributors: &[Contributor], max_areas: usize) -> Heatmap {
    let totals = contributors
        .iter()
        .flat_map(|c| c.area_touches.iter())
        .fold(OrderedCounter::new(), |mut acc, (area, n)| {
            acc.add(area, *n);
            acc
        });
    let areas: Vec<String> = totals
        .top(max_areas)
        .into_iter()
        .map(|(a, _)| a)
        .collect();

    let rows = contributors
        .iter()
        .map(|c| HeatmapRow {
            name: c.name.clone(),
            cells: areas
                .iter()
                .map(|area| {
                    c.area_touches
                        .iter()
                        .find(|(a, _)| a == area)
                        .map_or(0, |(_, n)| *n)
                })
                .collect(),
        })
        .collect();

    Heatmap { areas, rows }
}

#[cfg(test)]
#[path = "analyzer_test.rs"]
mod tests;
