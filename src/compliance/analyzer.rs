use regex::{Regex, RegexBuilder};
use serde::Serialize;

use crate::classify::{Category, classify};
use crate::search::SearchSource;
use crate::util::percent;

/// Extensions whose contents are searched; every path is matched
/// regardless of extension.
pub const CONTENT_EXTS: &[&str] = &[
    "js", "jsx", "ts", "tsx", "mjs", "cjs", "vue", "svelte", "astro", "py", "go", "rb", "php",
    "java", "kt", "cs", "rs", "sql", "prisma", "graphql",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ComplianceCategory {
    AgeVerification,
    ContentModeration,
    IdentityVerification,
    Reporting,
    RecordKeeping,
    UserSafety,
    PaymentCompliance,
}

impl ComplianceCategory {
    pub fn label(self) -> &'static str {
        match self {
            ComplianceCategory::AgeVerification => "Age verification",
            ComplianceCategory::ContentModeration => "Content moderation",
            ComplianceCategory::IdentityVerification => "Identity verification",
            ComplianceCategory::Reporting => "User reporting",
            ComplianceCategory::RecordKeeping => "Record keeping",
            ComplianceCategory::UserSafety => "User safety",
            ComplianceCategory::PaymentCompliance => "Payment compliance",
        }
    }

    /// What to add when nothing was found.
    fn recommendation(self) -> &'static str {
        match self {
            ComplianceCategory::AgeVerification => {
                "No age gate or date-of-birth check detected."
            }
            ComplianceCategory::ContentModeration => {
                "No moderation queue or content filter detected."
            }
            ComplianceCategory::IdentityVerification => {
                "No KYC or identity-verification provider detected."
            }
            ComplianceCategory::Reporting => "No way for users to report content or accounts.",
            ComplianceCategory::RecordKeeping => "No audit log or retention policy detected.",
            ComplianceCategory::UserSafety => "No block or mute controls detected.",
            ComplianceCategory::PaymentCompliance => {
                "No payment provider or refund/chargeback handling detected."
            }
        }
    }
}

impl Category for ComplianceCategory {
    const ALL: &'static [Self] = &[
        ComplianceCategory::AgeVerification,
        ComplianceCategory::ContentModeration,
        ComplianceCategory::IdentityVerification,
        ComplianceCategory::Reporting,
        ComplianceCategory::RecordKeeping,
        ComplianceCategory::UserSafety,
        ComplianceCategory::PaymentCompliance,
    ];

    fn patterns(self) -> &'static [&'static str] {
        match self {
            ComplianceCategory::AgeVerification => &[
                "age_verif",
                "ageverif",
                "age-verif",
                "age_gate",
                "agegate",
                "age-gate",
                "date_of_birth",
                "dateofbirth",
                "birthdate",
                "underage",
                "min_age",
            ],
            ComplianceCategory::ContentModeration => &[
                "moderat",
                "nsfw",
                "profanity",
                "content_filter",
                "contentfilter",
                "toxicity",
                "blocklist",
            ],
            ComplianceCategory::IdentityVerification => &[
                "kyc",
                "onfido",
                "jumio",
                "veriff",
                "persona_inquiry",
                "identity_verif",
                "id_verif",
            ],
            ComplianceCategory::Reporting => &[
                "report_user",
                "reportuser",
                "report_content",
                "reportcontent",
                "abuse_report",
                "abusereport",
                "report-abuse",
                "reportabuse",
                "flag_content",
            ],
            ComplianceCategory::RecordKeeping => &[
                "audit_log",
                "auditlog",
                "audit-log",
                "2257",
                "record_keep",
                "recordkeep",
                "retention",
                "consent_log",
            ],
            ComplianceCategory::UserSafety => &[
                "block_user",
                "blockuser",
                "blocked_users",
                "mute_user",
                "muteuser",
                "user_safety",
                "harass",
            ],
            ComplianceCategory::PaymentCompliance => &[
                "stripe",
                "payout",
                "chargeback",
                "refund",
                "paypal",
                "ccbill",
                "segpay",
                "pci_dss",
                "pci-dss",
            ],
        }
    }

    fn key(self) -> &'static str {
        match self {
            ComplianceCategory::AgeVerification => "ageVerification",
            ComplianceCategory::ContentModeration => "contentModeration",
            ComplianceCategory::IdentityVerification => "identityVerification",
            ComplianceCategory::Reporting => "reporting",
            ComplianceCategory::RecordKeeping => "recordKeeping",
            ComplianceCategory::UserSafety => "userSafety",
            ComplianceCategory::PaymentCompliance => "paymentCompliance",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComplianceIndicator {
    pub category: ComplianceCategory,
    pub found: bool,
    pub evidence: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ComplianceIndicator {
    fn new(category: ComplianceCategory) -> Self {
        Self {
            category,
            found: false,
            evidence: Vec::new(),
            notes: Some(category.recommendation().to_string()),
        }
    }
}

/// One indicator per category, in taxonomy order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComplianceReport {
    pub indicators: Vec<ComplianceIndicator>,
    #[serde(skip)]
    evidence_cap: usize,
}

impl ComplianceReport {
    pub fn new(evidence_cap: usize) -> Self {
        Self {
            indicators: ComplianceCategory::ALL
                .iter()
                .map(|&c| ComplianceIndicator::new(c))
                .collect(),
            evidence_cap,
        }
    }

    /// Mark `category` found and keep `path` as evidence (deduplicated,
    /// capped). A category never goes back to not-found.
    pub fn add_evidence(&mut self, category: ComplianceCategory, path: &str) {
        let cap = self.evidence_cap;
        let ind = &mut self.indicators[category.index()];
        ind.found = true;
        ind.notes = None;
        if ind.evidence.len() < cap && !ind.evidence.iter().any(|e| e == path) {
            ind.evidence.push(path.to_string());
        }
    }

    /// Attribute a matched path (and the matched line, if any) to every
    /// category whose stems occur in it.
    pub fn record(&mut self, path: &str, text: &str) {
        for category in classify::<ComplianceCategory>(&format!("{path} {text}")) {
            self.add_evidence(category, path);
        }
    }

    pub fn found_count(&self) -> usize {
        self.indicators.iter().filter(|i| i.found).count()
    }

    /// `round(100 * found / categories)`.
    pub fn score(&self) -> usize {
        percent(self.found_count(), self.indicators.len())
    }
}

/// A single case-insensitive alternation over every stem of every category.
pub fn combined_pattern() -> Regex {
    let alternation = ComplianceCategory::ALL
        .iter()
        .flat_map(|c| c.patterns().iter())
        .map(|p| regex::escape(p))
        .collect::<Vec<_>>()
        .join("|");
    RegexBuilder::new(&alternation)
        .case_insensitive(true)
        .build()
        .expect("escaped literals form a valid pattern")
}

/// Match paths and source contents once against the combined pattern and
/// attribute each hit.
pub fn scan(search: &dyn SearchSource, evidence_cap: usize) -> ComplianceReport {
    let pattern = combined_pattern();
    let mut report = ComplianceReport::new(evidence_cap);

    for path in search.files() {
        if pattern.is_match(path) {
            report.record(path, "");
        }
    }
    for hit in search.grep(&pattern, CONTENT_EXTS) {
        report.record(&hit.path, &hit.text);
    }
    report
}

#[cfg(test)]
#[path = "analyzer_test.rs"]
mod tests;
