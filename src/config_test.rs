use super::*;

#[test]
fn defaults_match_documented_values() {
    let c = Config::default();
    assert_eq!(c.history_depth, 500);
    assert_eq!(c.churn_top, 15);
    assert_eq!(c.evidence_cap, 8);
    assert!(c.summary_command.is_none());
}

#[test]
fn empty_toml_is_default() {
    assert_eq!(Config::from_toml("").unwrap(), Config::default());
}

#[test]
fn partial_toml_keeps_other_defaults() {
    let c = Config::from_toml("occurrence_cap = 100\nexclude = [\"**/*.gen.ts\"]\n").unwrap();
    assert_eq!(c.occurrence_cap, 100);
    assert_eq!(c.exclude, vec!["**/*.gen.ts".to_string()]);
    assert_eq!(c.churn_top, 15);
}

#[test]
fn unknown_key_is_rejected() {
    assert!(Config::from_toml("churn_tpo = 3").is_err());
}

#[test]
fn load_without_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(Config::load(dir.path(), None).unwrap(), Config::default());
}

#[test]
fn load_reads_root_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(CONFIG_FILE), "churn_top = 3\n").unwrap();
    assert_eq!(Config::load(dir.path(), None).unwrap().churn_top, 3);
}

#[test]
fn load_malformed_names_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom.toml");
    std::fs::write(&path, "churn_top = \"many\"\n").unwrap();
    let err = Config::load(dir.path(), Some(&path)).unwrap_err();
    assert!(err.to_string().contains("custom.toml"), "got: {err}");
}

#[test]
fn exclude_filter_from_config() {
    let c = Config::from_toml("exclude_dirs = [\"legacy\"]").unwrap();
    let f = c.exclude_filter().unwrap();
    assert!(f.excludes_file("legacy/old.js"));
}
