use serde::Serialize;

use super::{ComplianceIndicator, ComplianceReport};
use crate::report_helpers;

pub fn print_report(report: &ComplianceReport) {
    let max_label_len = report_helpers::max_width(
        report.indicators.iter().map(|i| i.category.label()),
        8,
    );
    let separator = report_helpers::separator((max_label_len + 40).max(60));

    println!("Compliance indicators");
    println!("{separator}");
    for ind in &report.indicators {
        let mark = if ind.found { "found" } else { "missing" };
        println!(
            " {:<width$}  {:<7}  {}",
            ind.category.label(),
            mark,
            ind.evidence.first().map_or("", String::as_str),
            width = max_label_len
        );
        if let Some(notes) = &ind.notes {
            println!(" {:<width$}  {notes}", "", width = max_label_len);
        }
    }
    println!("{separator}");
    println!(
        " Score: {}% ({} of {} categories)",
        report.score(),
        report.found_count(),
        report.indicators.len()
    );
}

#[derive(Serialize)]
struct JsonCompliance<'a> {
    score: usize,
    found: usize,
    total: usize,
    indicators: &'a [ComplianceIndicator],
}

pub fn print_json(report: &ComplianceReport) -> Result<(), Box<dyn std::error::Error>> {
    report_helpers::print_json_stdout(&JsonCompliance {
        score: report.score(),
        found: report.found_count(),
        total: report.indicators.len(),
        indicators: &report.indicators,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance::analyzer::ComplianceCategory;

    fn sample() -> ComplianceReport {
        let mut report = ComplianceReport::new(8);
        report.add_evidence(ComplianceCategory::PaymentCompliance, "src/stripe.ts");
        report
    }

    #[test]
    fn print_report_does_not_panic() {
        print_report(&sample());
        print_report(&ComplianceReport::new(8));
    }

    #[test]
    fn print_json_does_not_panic() {
        print_json(&sample()).unwrap();
    }
}
