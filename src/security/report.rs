use super::{SecurityFinding, SecurityReport, Severity};
use crate::report_helpers;

fn location(f: &SecurityFinding) -> String {
    match f.line {
        Some(line) => format!("{}:{line}", f.path),
        None => f.path.clone(),
    }
}

fn print_rows(findings: &[SecurityFinding], width: usize) {
    for f in findings {
        println!(
            " {:<8}  {:<width$}  {}",
            f.severity.label(),
            location(f),
            f.name,
            width = width
        );
    }
}

pub fn print_report(report: &SecurityReport) {
    if report.findings.is_empty() && report.warnings.is_empty() {
        println!("No security findings.");
        return;
    }

    let width = report
        .findings
        .iter()
        .chain(&report.warnings)
        .map(|f| location(f).chars().count())
        .max()
        .unwrap_or(8)
        .max(8);
    let separator = report_helpers::separator((width + 40).max(60));

    println!("Security findings");
    println!("{separator}");
    if report.findings.is_empty() {
        println!(" none");
    } else {
        print_rows(&report.findings, width);
    }
    println!("{separator}");
    println!(
        " critical: {}  high: {}  medium: {}",
        report.count(Severity::Critical),
        report.count(Severity::High),
        report.count(Severity::Medium)
    );

    if !report.warnings.is_empty() {
        println!();
        println!("Warnings");
        println!("{separator}");
        print_rows(&report.warnings, width);
        println!("{separator}");
    }
}

pub fn print_json(report: &SecurityReport) -> Result<(), Box<dyn std::error::Error>> {
    report_helpers::print_json_stdout(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::security::FindingKind;

    fn sample() -> SecurityReport {
        SecurityReport {
            findings: vec![SecurityFinding {
                kind: FindingKind::Secret,
                severity: Severity::Critical,
                name: "AWS Access Key ID".to_string(),
                path: "src/aws.ts".to_string(),
                line: Some(3),
            }],
            warnings: vec![SecurityFinding {
                kind: FindingKind::Exposure,
                severity: Severity::Medium,
                name: "Credential file not ignored".to_string(),
                path: ".env".to_string(),
                line: None,
            }],
        }
    }

    #[test]
    fn print_report_does_not_panic() {
        print_report(&sample());
        print_report(&SecurityReport::default());
    }

    #[test]
    fn location_includes_line_when_known() {
        let r = sample();
        assert_eq!(location(&r.findings[0]), "src/aws.ts:3");
        assert_eq!(location(&r.warnings[0]), ".env");
    }

    #[test]
    fn json_structure_is_valid() {
        print_json(&sample()).unwrap();
        let v = serde_json::to_value(sample()).unwrap();
        assert_eq!(v["findings"][0]["kind"], "secret");
        assert_eq!(v["findings"][0]["severity"], "critical");
        assert_eq!(v["findings"][0]["line"], 3);
        assert!(v["warnings"][0].get("line").is_none());
    }
}
