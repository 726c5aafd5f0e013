use super::*;
use crate::classify::Category;
use crate::git::{ChangeStatus, ChangedFile};

fn commit(subject: &str, files: &[&str]) -> CommitEntry {
    CommitEntry {
        subject: subject.to_string(),
        files: files.iter().map(|f| f.to_string()).collect(),
    }
}

fn history(commits: Vec<CommitEntry>) -> ContributorHistory {
    ContributorHistory {
        name: "Ann".to_string(),
        email: "ann@x.io".to_string(),
        commits,
    }
}

#[test]
fn empty_history_is_all_zero_and_general() {
    let c = aggregate(&history(vec![]), 500);
    assert_eq!(c.commits, 0);
    assert_eq!(c.categories.total(), 0);
    assert!(c.radar.iter().all(|(_, pct)| pct == 0));
    assert_eq!(c.focus, Focus::General);
    assert!(c.top_areas.is_empty());
}

#[test]
fn frontend_only_contributor() {
    let h = history(vec![
        commit("Add navbar component", &["src/components/Navbar.vue"]),
        commit("Style the login button", &["src/components/LoginButton.vue"]),
        commit("Tweak modal layout", &["src/components/Modal.vue"]),
    ]);
    let c = aggregate(&h, 500);

    assert_eq!(c.radar.get(ExpertiseArea::Frontend), 100);
    for &area in ExpertiseArea::ALL {
        if area != ExpertiseArea::Frontend {
            assert_eq!(c.radar.get(area), 0, "{area:?} should be 0");
        }
    }
    assert_eq!(c.focus, Focus::Frontend);
    assert_eq!(c.top_areas, vec!["components".to_string()]);
}

#[test]
fn message_and_files_are_both_counted() {
    let h = history(vec![commit(
        "fix api endpoint",
        &["server/users.go", "server/orders.go"],
    )]);
    let c = aggregate(&h, 500);
    // one from the subject, one from each file
    assert_eq!(c.categories.get(ExpertiseArea::Backend), 3);
}

#[test]
fn radar_rounding_slack_is_bounded() {
    let h = history(vec![
        commit("api", &[]),
        commit("docs", &[]),
        commit("deploy", &[]),
        commit("test", &[]),
        commit("schema", &[]),
        commit("css", &[]),
        commit("css", &[]),
    ]);
    let c = aggregate(&h, 500);
    let sum: usize = c.radar.iter().map(|(_, p)| p).sum();
    let slack = ExpertiseArea::ALL.len();
    assert!(
        (100 - slack..=100 + slack).contains(&sum),
        "sum {sum} outside 100±{slack}"
    );
}

#[test]
fn depth_caps_classified_history() {
    let h = history(vec![
        commit("docs", &[]),
        commit("api", &[]),
        commit("api", &[]),
    ]);
    let c = aggregate(&h, 1);
    assert_eq!(c.commits, 3);
    assert_eq!(c.categories.total(), 1);
    assert_eq!(c.radar.get(ExpertiseArea::Docs), 100);
}

#[test]
fn focus_by_extension() {
    let cases: &[(&[&str], Focus)] = &[
        (&["a.py", "b.py", "c.md"], Focus::Backend),
        (&["a.md", "b.mdx"], Focus::Docs),
        (&[".github/ci.yml", "docker-compose.yaml"], Focus::ConfigDevops),
        (&["Dockerfile"], Focus::ConfigDevops),
        (&["a.ts", "b.ts", "c.tsx"], Focus::Fullstack),
        (&["a.ts", "b.ts", "c.go"], Focus::Backend),
        (&["a.png"], Focus::General),
        (&["LICENSE"], Focus::General),
    ];
    for (files, expected) in cases {
        let c = aggregate(&history(vec![commit("wip", files)]), 500);
        assert_eq!(c.focus, *expected, "files {files:?}");
    }
}

#[test]
fn focus_tie_goes_to_first_seen_extension() {
    let c = aggregate(&history(vec![commit("wip", &["a.md", "b.go"])]), 500);
    assert_eq!(c.focus, Focus::Docs);
}

#[test]
fn top_areas_skip_generic_segments() {
    let h = history(vec![commit(
        "wip",
        &[
            "src/hooks/useAuth.ts",
            "src/api/users.ts",
            "src/api/orders.ts",
            "lib/utils/x.ts",
            "README.md",
        ],
    )]);
    let c = aggregate(&h, 500);
    assert_eq!(c.top_areas, vec!["api".to_string(), "hooks".to_string()]);
    assert_eq!(area_of("README.md"), None);
    assert_eq!(area_of("src/index.ts"), None);
}

fn record(author: &str, email: &str, subject: &str, files: &[&str]) -> CommitRecord {
    CommitRecord {
        author: author.to_string(),
        email: email.to_string(),
        time: 0,
        subject: subject.to_string(),
        files: files
            .iter()
            .map(|p| ChangedFile {
                path: p.to_string(),
                status: ChangeStatus::Modified,
            })
            .collect(),
    }
}

#[test]
fn aggregate_all_orders_by_commits() {
    let commits = vec![
        record("Bo", "bo@x.io", "docs", &["docs/a.md"]),
        record("Ann", "ann@x.io", "api", &["api/a.go"]),
        record("Ann", "ANN@x.io", "api", &["api/b.go"]),
    ];
    let all = aggregate_all(&commits, 500);
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].name, "Ann");
    assert_eq!(all[0].commits, 2);
    assert_eq!(all[0].focus, Focus::Backend);
    assert_eq!(all[1].name, "Bo");
    assert_eq!(all[1].focus, Focus::Docs);
}

#[test]
fn heatmap_matrix() {
    let commits = vec![
        record("Ann", "ann@x.io", "x", &["api/a.go", "api/b.go", "web/c.vue"]),
        record("Bo", "bo@x.io", "x", &["web/a.vue", "docs/x.md"]),
    ];
    let all = aggregate_all(&commits, 500);
    let map = heatmap(&all, 2);
    assert_eq!(map.areas, vec!["api".to_string(), "web".to_string()]);
    assert_eq!(map.rows[0].name, "Ann");
    assert_eq!(map.rows[0].cells, vec![2, 1]);
    assert_eq!(map.rows[1].cells, vec![0, 1]);
}

#[test]
fn heatmap_empty() {
    let map = heatmap(&[], 5);
    assert!(map.areas.is_empty());
    assert!(map.rows.is_empty());
}
