use super::*;

fn write(root: &Path, rel: &str, content: &str) {
    let full = root.join(rel);
    std::fs::create_dir_all(full.parent().unwrap()).unwrap();
    std::fs::write(full, content).unwrap();
}

#[test]
fn run_on_plain_directory() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "src/components/Lonely.vue", "<template/>");
    write(dir.path(), "node_modules/lib/Unused.vue", "<template/>");
    run(dir.path(), false, 20, None, &Config::default()).unwrap();
    run(dir.path(), true, 20, Some(DeadKind::Component), &Config::default()).unwrap();
}

#[test]
fn run_rejects_bad_exclude_glob() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        exclude: vec!["[".to_string()],
        ..Config::default()
    };
    let err = run(dir.path(), false, 20, None, &config).unwrap_err();
    assert!(err.to_string().contains("invalid exclude pattern"), "got: {err}");
}

#[test]
fn dependency_dirs_are_not_candidates() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "src/components/Lonely.vue", "<template/>");
    write(dir.path(), "node_modules/lib/Unused.vue", "<template/>");
    let search = TreeSearch::new(dir.path(), &Default::default());
    let result = scan(&search, Kinds::ALL, 100, &SkipList { min_name_len: 3 });
    let paths: Vec<&str> = result.findings.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(paths, vec!["src/components/Lonely.vue"]);
}
