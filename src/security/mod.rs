//! Security patterns: hardcoded secrets, injection sinks and exposed
//! credential files.
//!
//! Secrets and injection sinks are vulnerabilities found line by line in
//! source files (test files are skipped; they carry fixture keys). An
//! exposed credential file is a warning: the file exists and the
//! repository's ignore rules do not cover it.

mod patterns;
mod report;

use std::error::Error;
use std::path::Path;

use serde::Serialize;

use crate::config::Config;
use crate::git::GitRepo;
use crate::search::{SearchSource, TreeSearch};
use crate::walk::is_test_file;

use patterns::{SENSITIVE_FILES, exposure_severity, is_placeholder, is_sensitive, rules};
use report::{print_json, print_report};

/// Findings kept per scan; a vendored bundle can otherwise produce
/// thousands.
pub const MAX_FINDINGS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingKind {
    Secret,
    Injection,
    Exposure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecurityFinding {
    pub kind: FindingKind,
    pub severity: Severity,
    pub name: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SecurityReport {
    /// Secrets and injection sinks, most severe first.
    pub findings: Vec<SecurityFinding>,
    /// Exposed credential files.
    pub warnings: Vec<SecurityFinding>,
}

impl SecurityReport {
    pub fn count(&self, severity: Severity) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == severity)
            .count()
    }
}

/// Every rule over every non-test file. One line can trigger several rules.
pub fn scan_contents(search: &dyn SearchSource, max_findings: usize) -> Vec<SecurityFinding> {
    let mut findings = Vec::new();

    'files: for path in search.files() {
        if is_test_file(path) {
            continue;
        }
        let Some(content) = search.read(path) else {
            continue;
        };
        for (idx, line) in content.lines().enumerate() {
            for rule in rules() {
                let Some(m) = rule.pattern.find(line) else {
                    continue;
                };
                if is_placeholder(m.as_str()) {
                    tracing::debug!(path, line = idx + 1, rule = rule.name, "placeholder skipped");
                    continue;
                }
                findings.push(SecurityFinding {
                    kind: rule.kind,
                    severity: rule.severity,
                    name: rule.name.to_string(),
                    path: path.clone(),
                    line: Some(idx + 1),
                });
                if findings.len() >= max_findings {
                    tracing::warn!(max_findings, "security findings truncated");
                    break 'files;
                }
            }
        }
    }

    // stable: file/line order within a severity
    findings.sort_by_key(|f| f.severity);
    findings
}

/// Credential files that exist and are not covered by ignore rules.
/// Listed files are checked together with the well-known names at the
/// root, which the walker may have left out because they are ignored.
pub fn exposure_warnings(
    search: &dyn SearchSource,
    is_ignored: &dyn Fn(&str) -> bool,
) -> Vec<SecurityFinding> {
    let mut candidates: Vec<&str> = search
        .files()
        .iter()
        .map(String::as_str)
        .filter(|p| is_sensitive(p))
        .collect();
    candidates.extend(SENSITIVE_FILES.iter().copied().filter(|f| search.exists(f)));
    candidates.sort_unstable();
    candidates.dedup();

    candidates
        .into_iter()
        .filter(|p| !is_ignored(p))
        .map(|p| SecurityFinding {
            kind: FindingKind::Exposure,
            severity: exposure_severity(p),
            name: "Credential file not ignored".to_string(),
            path: p.to_string(),
            line: None,
        })
        .collect()
}

pub fn scan(
    search: &dyn SearchSource,
    is_ignored: &dyn Fn(&str) -> bool,
    max_findings: usize,
) -> SecurityReport {
    SecurityReport {
        findings: scan_contents(search, max_findings),
        warnings: exposure_warnings(search, is_ignored),
    }
}

/// Ignore check for paths relative to `dir`, which may sit below the
/// repository root. Outside a repository nothing is ignored.
fn ignore_rules(dir: &Path) -> impl Fn(&str) -> bool {
    let git_repo = GitRepo::open(dir).ok();
    let prefix = git_repo
        .as_ref()
        .map(|g| g.relative_dir(dir))
        .unwrap_or_default();
    move |rel: &str| {
        git_repo
            .as_ref()
            .is_some_and(|g| g.is_ignored(&prefix.join(rel)))
    }
}

pub fn run(path: &Path, json: bool, config: &Config) -> Result<(), Box<dyn Error>> {
    let filter = config.exclude_filter()?;
    let search = TreeSearch::new(path, &filter);
    let is_ignored = ignore_rules(path);

    let report = scan(&search, &is_ignored, MAX_FINDINGS);
    if json {
        print_json(&report)
    } else {
        print_report(&report);
        Ok(())
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
