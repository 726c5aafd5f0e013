use super::FileChurn;
use crate::report_helpers;

pub fn print_report(files: &[FileChurn]) {
    if files.is_empty() {
        println!("No modified source files found.");
        return;
    }

    let max_path_len = report_helpers::max_width(files.iter().map(|f| f.path.as_str()), 4);
    let separator = report_helpers::separator((max_path_len + 12).max(60));

    println!("Churn (times modified)");
    println!("{separator}");
    println!(" {:<width$}  {:>8}", "File", "Changes", width = max_path_len);
    println!("{separator}");
    for f in files {
        println!(" {:<width$}  {:>8}", f.path, f.changes, width = max_path_len);
    }
    println!("{separator}");
    println!();
    println!("Frequently modified files concentrate risk and review effort.");
}

pub fn print_json(files: &[FileChurn]) -> Result<(), Box<dyn std::error::Error>> {
    report_helpers::print_json_stdout(&files)
}
