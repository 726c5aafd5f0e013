use super::*;
use crate::report::RepositoryInfo;

#[test]
fn escape_md_no_special_chars() {
    assert_eq!(escape_md("src/main.ts"), "src/main.ts");
}

#[test]
fn escape_md_pipe() {
    assert_eq!(escape_md("foo|bar.ts"), "foo\\|bar.ts");
}

#[test]
fn escape_md_backslash_and_pipe() {
    assert_eq!(escape_md("path\\|file.ts"), "path\\\\\\|file.ts");
}

#[test]
fn elide_short_and_long() {
    let items: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
    assert_eq!(elide(&items, 5), "a, b, c");
    assert_eq!(elide(&items, 2), "a, b, … (+1 more)");
    assert_eq!(elide(&[], 2), "");
}

#[test]
fn empty_report_prints_every_section() {
    let report = SiteReport {
        repository: RepositoryInfo {
            name: "demo".to_string(),
            ..Default::default()
        },
        ..Default::default()
    };
    print_markdown(&report);
}
