use super::DeadCodeCandidate;
use crate::report_helpers;

pub fn print_report(findings: &[DeadCodeCandidate]) {
    if findings.is_empty() {
        println!("No unreferenced components, files or exports found.");
        return;
    }

    let max_path_len = report_helpers::max_width(findings.iter().map(|f| f.path.as_str()), 4);
    let max_name_len = report_helpers::max_width(findings.iter().map(|f| f.name.as_str()), 4);
    let separator = report_helpers::separator((max_path_len + max_name_len + 16).max(60));

    println!("Possibly dead code");
    println!("{separator}");
    println!(
        " {:<9}  {:<pw$}  {:<nw$}",
        "Kind",
        "Path",
        "Name",
        pw = max_path_len,
        nw = max_name_len
    );
    println!("{separator}");
    for f in findings {
        println!(
            " {:<9}  {:<pw$}  {:<nw$}",
            f.kind.label(),
            f.path,
            f.name,
            pw = max_path_len,
            nw = max_name_len
        );
    }
    println!("{separator}");
    println!(" {} candidate(s)", findings.len());
    println!();
    println!("Text search only: dynamic imports and string lookups are not followed.");
}

pub fn print_json(findings: &[DeadCodeCandidate]) -> Result<(), Box<dyn std::error::Error>> {
    report_helpers::print_json_stdout(&findings)
}

#[cfg(test)]
#[path = "report_test.rs"]
mod tests;
