use std::sync::OnceLock;

use clap::ValueEnum;
use regex::Regex;
use serde::Serialize;

use super::index::{ExcerptIndex, OccurrenceIndex};
use crate::inventory::is_component_file;
use crate::search::{SearchHit, SearchSource};
use crate::util::{basename, dir_segments, extension, file_stem, to_kebab_case};
use crate::walk::is_test_file;

/// Files checked by the file sub-scan.
pub const FILE_EXTS: &[&str] = &["js", "jsx", "ts", "tsx", "mjs", "vue", "svelte", "py"];
/// Files whose `export` declarations are checked.
pub const EXPORT_EXTS: &[&str] = &["js", "jsx", "ts", "tsx", "mjs"];
/// Files that contribute import/usage lines to the occurrence index.
pub const INDEX_EXTS: &[&str] = &[
    "js", "jsx", "ts", "tsx", "mjs", "cjs", "vue", "svelte", "astro", "mdx", "html", "py",
];

/// Names loaded by convention rather than by import.
const ENTRY_NAMES: &[&str] = &[
    "main",
    "index",
    "app",
    "server",
    "_app",
    "_document",
    "_error",
    "layout",
    "page",
    "route",
    "middleware",
    "error",
    "loading",
    "not-found",
    "+page",
    "+layout",
    "+server",
    "vite-env",
    "setup",
    "__init__",
    "manage",
    "wsgi",
    "asgi",
    "conftest",
];

/// Support modules (configuration, type and constant collections).
const SUPPORT_NAMES: &[&str] = &[
    "types",
    "constants",
    "consts",
    "config",
    "env",
    "globals",
    "theme",
];

/// Directories whose files are picked up by a router.
const ROUTED_DIRS: &[&str] = &["pages", "api", "routes"];

/// Exports a framework calls by name.
const FRAMEWORK_EXPORTS: &[&str] = &[
    "default",
    "handler",
    "GET",
    "POST",
    "PUT",
    "PATCH",
    "DELETE",
    "getServerSideProps",
    "getStaticProps",
    "getStaticPaths",
    "generateMetadata",
    "generateStaticParams",
    "metadata",
    "loader",
    "action",
    "load",
    "revalidate",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DeadKind {
    Component,
    File,
    Export,
}

impl DeadKind {
    pub fn label(&self) -> &'static str {
        match self {
            DeadKind::Component => "component",
            DeadKind::File => "file",
            DeadKind::Export => "export",
        }
    }
}

/// A named artifact to look up in the occurrence index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub kind: DeadKind,
    pub name: String,
    pub path: String,
    /// Naming-convention equivalent that also counts as a reference
    /// (`UserCard` is used as `<user-card>` in templates).
    pub alias: Option<String>,
}

impl Candidate {
    fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.alias.as_deref())
    }
}

/// An artifact judged unreferenced.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct DeadCodeCandidate {
    pub kind: DeadKind,
    pub path: String,
    pub name: String,
}

/// Candidates excluded before testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkipList {
    pub min_name_len: usize,
}

impl SkipList {
    pub fn skips(&self, c: &Candidate) -> bool {
        let name = c.name.as_str();
        if name.chars().count() < self.min_name_len || is_hook_name(name) {
            return true;
        }
        if c.kind == DeadKind::Export && FRAMEWORK_EXPORTS.contains(&name) {
            return true;
        }

        let lower = name.to_lowercase();
        if ENTRY_NAMES.contains(&lower.as_str()) || SUPPORT_NAMES.contains(&lower.as_str()) {
            return true;
        }

        let file = basename(&c.path).to_lowercase();
        file.contains(".config.")
            || file.ends_with(".d.ts")
            || dir_segments(&c.path).any(|seg| ROUTED_DIRS.contains(&seg))
            || is_test_file(&c.path)
    }
}

/// `useAuth`, `useCart`: hook/composable naming convention.
fn is_hook_name(name: &str) -> bool {
    name.strip_prefix("use")
        .and_then(|rest| rest.chars().next())
        .is_some_and(|ch| ch.is_ascii_uppercase())
}

/// Candidates that pass the skip-list and whose names are all absent
/// from `index`, sorted by (kind, path, name).
pub fn detect<I: OccurrenceIndex + ?Sized>(
    candidates: &[Candidate],
    index: &I,
    skip: &SkipList,
) -> Vec<DeadCodeCandidate> {
    let mut dead: Vec<DeadCodeCandidate> = candidates
        .iter()
        .filter(|c| !skip.skips(c))
        .filter(|c| !c.names().any(|n| index.contains(n)))
        .map(|c| DeadCodeCandidate {
            kind: c.kind,
            path: c.path.clone(),
            name: c.name.clone(),
        })
        .collect();
    dead.sort();
    dead.dedup();
    dead
}

static IMPORT_LINE: OnceLock<Regex> = OnceLock::new();
static USAGE_LINE: OnceLock<Regex> = OnceLock::new();
static EXPORT_DECL: OnceLock<Regex> = OnceLock::new();

/// Import-like lines: ES imports, dynamic imports, `require`, Python imports,
/// re-exports.
pub fn import_line() -> &'static Regex {
    IMPORT_LINE.get_or_init(|| {
        Regex::new(r#"(?:^\s*(?:import|from)\s|\bfrom\s+["']|\brequire\s*\(|\bimport\s*\()"#)
            .expect("import pattern is valid")
    })
}

/// Import-like lines plus component tags (`<UserCard`, `<user-card`).
pub fn usage_line() -> &'static Regex {
    USAGE_LINE.get_or_init(|| {
        Regex::new(
            r#"(?:^\s*(?:import|from)\s|\bfrom\s+["']|\brequire\s*\(|\bimport\s*\(|<[A-Z][A-Za-z0-9]*|<[a-z][a-z0-9]*-[a-z0-9-]+)"#,
        )
        .expect("usage pattern is valid")
    })
}

fn export_decl() -> &'static Regex {
    EXPORT_DECL.get_or_init(|| {
        Regex::new(
            r"^\s*export\s+(?:default\s+)?(?:async\s+)?(?:function\*?|const|let|var|class)\s+([A-Za-z_$][\w$]*)",
        )
        .expect("export pattern is valid")
    })
}

pub fn component_candidates(files: &[String]) -> Vec<Candidate> {
    files
        .iter()
        .filter(|p| is_component_file(p))
        .map(|p| {
            let name = file_stem(p).to_string();
            let kebab = to_kebab_case(&name);
            Candidate {
                kind: DeadKind::Component,
                alias: (kebab != name).then_some(kebab),
                name,
                path: p.clone(),
            }
        })
        .collect()
}

pub fn file_candidates(files: &[String]) -> Vec<Candidate> {
    files
        .iter()
        .filter(|p| !is_component_file(p))
        .filter(|p| extension(p).is_some_and(|e| FILE_EXTS.contains(&e.as_str())))
        .map(|p| Candidate {
            kind: DeadKind::File,
            name: file_stem(p).to_string(),
            path: p.clone(),
            alias: None,
        })
        .collect()
}

pub fn export_candidates(hits: &[SearchHit]) -> Vec<Candidate> {
    hits.iter()
        .filter_map(|hit| {
            let caps = export_decl().captures(&hit.text)?;
            Some(Candidate {
                kind: DeadKind::Export,
                name: caps.get(1)?.as_str().to_string(),
                path: hit.path.clone(),
                alias: None,
            })
        })
        .collect()
}

/// Which sub-scans to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kinds {
    pub components: bool,
    pub files: bool,
    pub exports: bool,
}

impl Kinds {
    pub const ALL: Kinds = Kinds {
        components: true,
        files: true,
        exports: true,
    };

    pub fn only(kind: DeadKind) -> Self {
        Kinds {
            components: kind == DeadKind::Component,
            files: kind == DeadKind::File,
            exports: kind == DeadKind::Export,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeadCodeScan {
    pub findings: Vec<DeadCodeCandidate>,
    /// Lines held across the occurrence indexes.
    pub index_lines: usize,
    /// True when an index hit its line cap (recall is reduced).
    pub index_truncated: bool,
}

impl DeadCodeScan {
    fn absorb(mut self, index: &ExcerptIndex, findings: Vec<DeadCodeCandidate>) -> Self {
        self.index_lines += index.lines();
        self.index_truncated |= index.is_truncated();
        self.findings.extend(findings);
        self
    }
}

/// Run the selected sub-scans. Each builds its own excerpt index of at
/// most `cap` lines.
pub fn scan(search: &dyn SearchSource, kinds: Kinds, cap: usize, skip: &SkipList) -> DeadCodeScan {
    let mut result = DeadCodeScan::default();

    if kinds.components {
        let candidates = component_candidates(search.files());
        if !candidates.is_empty() {
            let hits = search.grep(usage_line(), INDEX_EXTS);
            let index = ExcerptIndex::from_lines(hits.iter().map(|h| h.text.as_str()), cap);
            let found = detect(&candidates, &index, skip);
            result = result.absorb(&index, found);
        }
    }

    let need_imports = kinds.files || kinds.exports;
    if need_imports {
        let hits = search.grep(import_line(), INDEX_EXTS);
        let index = ExcerptIndex::from_lines(hits.iter().map(|h| h.text.as_str()), cap);

        if kinds.files {
            let found = detect(&file_candidates(search.files()), &index, skip);
            result = result.absorb(&index, found);
        }
        if kinds.exports {
            let decls = search.grep(export_decl(), EXPORT_EXTS);
            let found = detect(&export_candidates(&decls), &index, skip);
            let counted = if kinds.files {
                ExcerptIndex::default()
            } else {
                index
            };
            result = result.absorb(&counted, found);
        }
    }

    result.findings.sort();
    result
}

#[cfg(test)]
#[path = "detector_test.rs"]
mod tests;
