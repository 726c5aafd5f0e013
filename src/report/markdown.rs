use super::SiteReport;
use crate::classify::{Category, CommitKind};
use crate::report_helpers::bar;
use crate::util::percent;

/// Items listed per architecture layer before eliding the rest.
const LAYER_ITEMS: usize = 12;
const BAR_WIDTH: usize = 20;

/// Escape backslashes and pipe characters so markdown tables render
/// correctly. Backslashes must be escaped first to avoid double-escaping.
fn escape_md(s: &str) -> String {
    s.replace('\\', "\\\\").replace('|', "\\|")
}

/// "a, b, c" or "a, b, … (+N more)".
fn elide(items: &[String], max: usize) -> String {
    let shown: Vec<String> = items.iter().take(max).map(|s| escape_md(s)).collect();
    if items.len() > max {
        format!("{}, … (+{} more)", shown.join(", "), items.len() - max)
    } else {
        shown.join(", ")
    }
}

fn none_found() {
    println!("None found.");
}

fn print_summary(report: &SiteReport) {
    let s = &report.summary;
    println!("## Summary");
    println!();
    println!("{}", s.description);
    if !s.key_things.is_empty() {
        println!();
        println!("**Key things**");
        println!();
        for k in &s.key_things {
            println!("- {k}");
        }
    }
    if !s.gotchas.is_empty() {
        println!();
        println!("**Gotchas**");
        println!();
        for g in &s.gotchas {
            println!("- {g}");
        }
    }
}

fn print_activity(report: &SiteReport) {
    let st = &report.stats;
    println!("## Activity");
    println!();
    println!("| Metric | Value |");
    println!("|--------|------:|");
    println!("| Commits | {} |", st.total_commits);
    println!("| Contributors | {} |", st.contributors);
    println!(
        "| First commit | {} |",
        st.first_commit.as_deref().unwrap_or("-")
    );
    println!(
        "| Last commit | {} |",
        st.last_commit.as_deref().unwrap_or("-")
    );
    println!();

    let max = report
        .activity
        .iter()
        .map(|b| b.commits)
        .max()
        .unwrap_or(0);
    println!("| Month | Commits | |");
    println!("|-------|--------:|-|");
    for b in &report.activity {
        println!(
            "| {} | {} | `{}` |",
            b.month,
            b.commits,
            bar(percent(b.commits, max), BAR_WIDTH)
        );
    }
}

fn print_stack(report: &SiteReport) {
    println!("## Tech Stack");
    println!();
    if report.stack.technologies.is_empty() && report.stack.languages.is_empty() {
        none_found();
        return;
    }
    if !report.stack.technologies.is_empty() {
        println!("| Technology | Category | Declared in |");
        println!("|------------|----------|-------------|");
        for t in &report.stack.technologies {
            println!(
                "| {} | {} | `{}` |",
                t.name,
                t.category.label(),
                escape_md(&t.source)
            );
        }
        println!();
    }
    if !report.stack.languages.is_empty() {
        println!("| Language | Files | Share |");
        println!("|----------|------:|------:|");
        for l in &report.stack.languages {
            println!("| {} | {} | {}% |", l.language, l.files, l.percent);
        }
    }
}

fn print_commit_kinds(report: &SiteReport) {
    let ck = &report.commit_kinds;
    println!("## Commit Categories");
    println!();
    let total = ck.kinds.total() + ck.uncategorized;
    if total == 0 {
        none_found();
        return;
    }
    println!("| Category | Commits | |");
    println!("|----------|--------:|-|");
    for &kind in CommitKind::ALL {
        let n = ck.kinds.get(kind);
        println!(
            "| {} | {} | `{}` |",
            kind.label(),
            n,
            bar(percent(n, total), BAR_WIDTH)
        );
    }
    println!(
        "| Uncategorized | {} | `{}` |",
        ck.uncategorized,
        bar(percent(ck.uncategorized, total), BAR_WIDTH)
    );
}

fn print_contributors(report: &SiteReport) {
    println!("## Contributors");
    println!();
    if report.contributors.is_empty() {
        none_found();
        return;
    }
    println!("| Name | Commits | Focus | Strongest area | Top areas |");
    println!("|------|--------:|-------|----------------|-----------|");
    for c in &report.contributors {
        let strongest = c
            .categories
            .leader()
            .map(|a| format!("{} ({}%)", a.label(), c.radar.get(a)))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "| {} | {} | {} | {} | {} |",
            escape_md(&c.name),
            c.commits,
            c.focus.label(),
            strongest,
            elide(&c.top_areas, 2)
        );
    }

    let hm = &report.heatmap;
    if hm.areas.is_empty() {
        return;
    }
    println!();
    println!("### Ownership heatmap (files touched)");
    println!();
    let header: Vec<String> = hm.areas.iter().map(|a| escape_md(a)).collect();
    println!("| Contributor | {} |", header.join(" | "));
    println!("|---|{}", "---:|".repeat(hm.areas.len()));
    for row in &hm.rows {
        let cells: Vec<String> = row.cells.iter().map(|n| n.to_string()).collect();
        println!("| {} | {} |", escape_md(&row.name), cells.join(" | "));
    }
}

fn print_churn(report: &SiteReport) {
    println!("## Churn");
    println!();
    if report.churn.is_empty() {
        none_found();
        return;
    }
    println!("| File | Path | Changes |");
    println!("|------|------|--------:|");
    for f in &report.churn {
        println!(
            "| {} | `{}` | {} |",
            escape_md(&f.name),
            escape_md(&f.path),
            f.changes
        );
    }
}

fn print_architecture(report: &SiteReport) {
    println!("## Architecture");
    println!();
    println!("| Layer | Count | Members |");
    println!("|-------|------:|---------|");
    for layer in &report.layers {
        println!(
            "| {} | {} | {} |",
            layer.name,
            layer.items.len(),
            elide(&layer.items, LAYER_ITEMS)
        );
    }
}

fn print_dead_code(report: &SiteReport) {
    let dc = &report.dead_code;
    println!("## Possibly Dead Code");
    println!();
    if dc.findings.is_empty() {
        none_found();
    } else {
        println!("| Kind | Name | Path |");
        println!("|------|------|------|");
        for f in &dc.findings {
            println!(
                "| {} | {} | `{}` |",
                f.kind.label(),
                escape_md(&f.name),
                escape_md(&f.path)
            );
        }
    }
    println!();
    println!(
        "_Text search over {} indexed lines{}; verify before deleting._",
        dc.index_lines,
        if dc.index_truncated {
            " (index truncated)"
        } else {
            ""
        }
    );
}

fn print_security(report: &SiteReport) {
    let sec = &report.security;
    println!("## Security");
    println!();
    if sec.findings.is_empty() {
        none_found();
    } else {
        println!("| Severity | Finding | Location |");
        println!("|----------|---------|----------|");
        for f in &sec.findings {
            let location = match f.line {
                Some(line) => format!("{}:{line}", f.path),
                None => f.path.clone(),
            };
            println!(
                "| {} | {} | `{}` |",
                f.severity.label(),
                f.name,
                escape_md(&location)
            );
        }
    }
    if !sec.warnings.is_empty() {
        println!();
        println!("**Warnings**");
        println!();
        for w in &sec.warnings {
            println!("- `{}`: {} ({})", w.path, w.name, w.severity.label());
        }
    }
}

fn print_compliance(report: &SiteReport) {
    let c = &report.compliance;
    println!("## Compliance");
    println!();
    println!(
        "**Score:** {}% ({} of {} indicators)",
        c.score, c.found, c.total
    );
    println!();
    println!("| Indicator | Found | Evidence | Notes |");
    println!("|-----------|:-----:|----------|-------|");
    for ind in &c.indicators {
        println!(
            "| {} | {} | {} | {} |",
            ind.category.label(),
            if ind.found { "yes" } else { "no" },
            elide(&ind.evidence, 3),
            ind.notes.as_deref().unwrap_or("")
        );
    }
}

pub fn print_markdown(report: &SiteReport) {
    let repo = &report.repository;
    println!("# {} report", repo.name);
    println!();
    println!("**Path:** `{}`", repo.path);
    if let Some(branch) = &repo.branch {
        println!("**Branch:** `{branch}`");
    }
    if let Some(remote) = &repo.remote {
        println!("**Remote:** {remote}");
    }
    println!("**Generated:** {}", report.generated_at);

    let sections: &[fn(&SiteReport)] = &[
        print_summary,
        print_activity,
        print_stack,
        print_commit_kinds,
        print_contributors,
        print_churn,
        print_architecture,
        print_dead_code,
        print_security,
        print_compliance,
    ];
    for section in sections {
        println!();
        section(report);
    }
}

#[cfg(test)]
#[path = "markdown_test.rs"]
mod tests;
