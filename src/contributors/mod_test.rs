use super::*;
use crate::git::tests::{commit_as, create_test_repo};

#[test]
fn run_on_non_git_dir() {
    let dir = tempfile::tempdir().unwrap();
    let sub = dir.path().join("plain");
    std::fs::create_dir_all(&sub).unwrap();
    let err = run(&sub, false, 10, None, &Config::default()).unwrap_err();
    assert!(
        err.to_string().contains("not a git repository"),
        "got: {err}"
    );
}

#[test]
fn run_on_repo() {
    let (dir, repo) = create_test_repo();
    commit_as(
        &repo,
        ("Ann", "ann@x.io"),
        &[("src/components/Nav.vue", "<template/>")],
        "add navbar",
        1_700_000_000,
    );
    run(dir.path(), false, 10, None, &Config::default()).unwrap();
    run(dir.path(), true, 10, None, &Config::default()).unwrap();
}

#[test]
fn run_rejects_bad_since() {
    let (dir, _repo) = create_test_repo();
    assert!(run(dir.path(), false, 10, Some("soon"), &Config::default()).is_err());
}
