//! Report builder: opens the repository, runs every scan once and
//! assembles a `SiteReport`.
//!
//! Only an unopenable repository (or an invalid exclude pattern) aborts
//! the build. A step that fails is logged and its section left empty.
//! Scans run in a fixed order and each writes only its own section; the
//! summary runs last, over the otherwise complete report.

use std::error::Error;
use std::path::Path;

use chrono::{SecondsFormat, Utc};

use crate::activity::{commit_stats, monthly_activity};
use crate::churn;
use crate::classify::CommitKindBreakdown;
use crate::compliance;
use crate::config::Config;
use crate::contributors::analyzer::{aggregate_all, heatmap};
use crate::deadcode::{self, Kinds, SkipList};
use crate::git::GitRepo;
use crate::inventory::{architecture_layers, collect_inventory};
use crate::search::TreeSearch;
use crate::security;
use crate::stack::detect_stack;
use crate::summary::{Summarizer, summarize};

use super::data::*;

/// Areas shown in the contributor heatmap.
pub const HEATMAP_AREAS: usize = 8;

/// Per-run settings layered over [`Config`].
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    /// Only commits after this unix time.
    pub since: Option<i64>,
}

/// Log a failed step and continue with an empty section.
fn or_empty<T: Default>(step: &str, result: Result<T, Box<dyn Error>>) -> T {
    result.unwrap_or_else(|e| {
        tracing::warn!(step, error = %e, "report step failed; section left empty");
        T::default()
    })
}

pub fn build_report(
    path: &Path,
    opts: &ReportOptions,
    config: &Config,
    summarizer: Option<&dyn Summarizer>,
) -> Result<SiteReport, Box<dyn Error>> {
    let git_repo = GitRepo::open(path)?;
    let filter = config.exclude_filter()?;
    let root = git_repo.root().to_path_buf();
    tracing::info!(root = %root.display(), "building report");

    let commits = or_empty("commit history", git_repo.commits(None, opts.since));
    let search = TreeSearch::new(&root, &filter);

    let times: Vec<i64> = commits.iter().map(|c| c.time).collect();
    let contributors = aggregate_all(&commits, config.history_depth);
    let inventory = collect_inventory(&search);

    let skip = SkipList {
        min_name_len: config.min_name_len,
    };
    let dead_code = deadcode::scan(&search, Kinds::ALL, config.occurrence_cap, &skip);
    if dead_code.index_truncated {
        tracing::warn!(
            cap = config.occurrence_cap,
            "occurrence index truncated; dead-code recall reduced"
        );
    }

    let is_ignored = |rel: &str| git_repo.is_ignored(Path::new(rel));

    let mut report = SiteReport {
        repository: RepositoryInfo {
            name: git_repo.name(),
            path: root.display().to_string(),
            branch: git_repo.branch(),
            remote: git_repo.remote_url(),
        },
        generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        stats: commit_stats(&commits),
        activity: monthly_activity(&times, Utc::now()),
        stack: detect_stack(&search),
        churn: churn::rank(churn::modified_paths(&commits), config.churn_top),
        commit_kinds: CommitKindBreakdown::from_subjects(
            commits.iter().map(|c| c.subject.as_str()),
        ),
        heatmap: heatmap(&contributors, HEATMAP_AREAS),
        contributors,
        layers: architecture_layers(&inventory),
        inventory,
        dead_code,
        security: security::scan(&search, &is_ignored, security::MAX_FINDINGS),
        compliance: compliance::scan(&search, config.evidence_cap).into(),
        summary: Default::default(),
    };

    report.summary = summarize(&report, summarizer);
    Ok(report)
}
