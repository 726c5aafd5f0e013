/// Data structures for the full site report.
///
/// Populated by the report builder and consumed by the markdown and JSON
/// printers. Every collection defaults to empty, so a degraded section is
/// an empty list rather than a missing one.
use serde::Serialize;

use crate::activity::{CommitStats, MonthBucket};
use crate::churn::FileChurn;
use crate::classify::CommitKindBreakdown;
use crate::compliance::{ComplianceIndicator, ComplianceReport};
use crate::contributors::analyzer::{Contributor, Heatmap};
use crate::deadcode::DeadCodeScan;
use crate::inventory::{Inventory, Layer};
use crate::security::SecurityReport;
use crate::stack::TechStack;
use crate::summary::Summary;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RepositoryInfo {
    pub name: String,
    pub path: String,
    pub branch: Option<String>,
    pub remote: Option<String>,
}

/// Compliance indicators with the derived score.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComplianceSection {
    pub score: usize,
    pub found: usize,
    pub total: usize,
    pub indicators: Vec<ComplianceIndicator>,
}

impl From<ComplianceReport> for ComplianceSection {
    fn from(report: ComplianceReport) -> Self {
        Self {
            score: report.score(),
            found: report.found_count(),
            total: report.indicators.len(),
            indicators: report.indicators,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SiteReport {
    pub repository: RepositoryInfo,
    /// RFC 3339 timestamp of the run.
    pub generated_at: String,
    pub stats: CommitStats,
    pub activity: Vec<MonthBucket>,
    pub stack: TechStack,
    pub churn: Vec<FileChurn>,
    pub commit_kinds: CommitKindBreakdown,
    pub contributors: Vec<Contributor>,
    pub heatmap: Heatmap,
    pub inventory: Inventory,
    pub dead_code: DeadCodeScan,
    pub security: SecurityReport,
    pub compliance: ComplianceSection,
    pub layers: Vec<Layer>,
    pub summary: Summary,
}
