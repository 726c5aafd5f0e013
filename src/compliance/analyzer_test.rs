use super::*;
use crate::search::tests::MemorySearch;

impl ComplianceReport {
    fn indicator(&self, category: ComplianceCategory) -> &ComplianceIndicator {
        &self.indicators[category.index()]
    }
}

#[test]
fn fresh_report_has_every_category_unfound() {
    let report = ComplianceReport::new(8);
    assert_eq!(report.indicators.len(), 7);
    assert_eq!(report.found_count(), 0);
    assert_eq!(report.score(), 0);
    assert!(report.indicators.iter().all(|i| i.notes.is_some()));
}

#[test]
fn payment_only_scores_fourteen() {
    let search = MemorySearch::new(&[
        ("src/billing/stripe.ts", "export const client = new Stripe(key);"),
        ("src/billing/jobs.ts", "await schedulePayout(account);"),
        ("src/ui/Button.tsx", "export default function Button() {}"),
    ]);
    let report = scan(&search, 8);

    let payment = report.indicator(ComplianceCategory::PaymentCompliance);
    assert!(payment.found);
    assert!(payment.notes.is_none());
    assert_eq!(
        payment.evidence,
        vec!["src/billing/stripe.ts".to_string(), "src/billing/jobs.ts".to_string()]
    );
    for ind in &report.indicators {
        if ind.category != ComplianceCategory::PaymentCompliance {
            assert!(!ind.found, "{:?} should not be found", ind.category);
        }
    }
    assert_eq!(report.score(), 14);
}

#[test]
fn score_is_monotonic() {
    let mut report = ComplianceReport::new(8);
    report.add_evidence(ComplianceCategory::Reporting, "a.ts");
    assert_eq!(report.found_count(), 1);
    let before = report.score();

    report.add_evidence(ComplianceCategory::Reporting, "b.ts");
    assert_eq!(report.found_count(), 1);
    assert_eq!(report.score(), before);

    report.add_evidence(ComplianceCategory::UserSafety, "c.ts");
    assert_eq!(report.found_count(), 2);
    assert_eq!(report.score(), 29);
}

#[test]
fn evidence_is_deduplicated_and_capped() {
    let mut report = ComplianceReport::new(2);
    for path in ["a.ts", "a.ts", "b.ts", "c.ts"] {
        report.add_evidence(ComplianceCategory::RecordKeeping, path);
    }
    assert_eq!(
        report.indicator(ComplianceCategory::RecordKeeping).evidence,
        vec!["a.ts".to_string(), "b.ts".to_string()]
    );
}

#[test]
fn one_hit_can_count_for_several_categories() {
    let mut report = ComplianceReport::new(8);
    report.record("src/moderation/report_user.ts", "");
    assert!(report.indicator(ComplianceCategory::ContentModeration).found);
    assert!(report.indicator(ComplianceCategory::Reporting).found);
    assert_eq!(report.found_count(), 2);
}

#[test]
fn path_match_counts_without_content() {
    let search = MemorySearch::new(&[("docs/kyc-flow.md", "nothing here")]);
    let report = scan(&search, 8);
    assert!(report.indicator(ComplianceCategory::IdentityVerification).found);
}

#[test]
fn combined_pattern_is_case_insensitive() {
    let re = combined_pattern();
    assert!(re.is_match("const AGE_GATE = true"));
    assert!(re.is_match("Stripe"));
    assert!(!re.is_match("hello world"));
}

#[test]
fn json_uses_camel_case_keys() {
    let report = ComplianceReport::new(8);
    let v = serde_json::to_value(&report).unwrap();
    assert_eq!(v["indicators"][0]["category"], "ageVerification");
    assert_eq!(v["indicators"][6]["category"], "paymentCompliance");
    assert_eq!(v["indicators"][0]["found"], false);
}
