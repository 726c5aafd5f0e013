use super::*;

fn now() -> i64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64
}

#[test]
fn parse_since_days() {
    let ts = parse_since("30d").unwrap();
    let expected = now() - 30 * 86_400;
    assert!(
        (ts - expected).abs() < 2,
        "timestamp should be within 2s of 30 days ago (got {ts}, expected ~{expected})"
    );
}

#[test]
fn parse_since_months() {
    let ts = parse_since("6m").unwrap();
    let expected = now() - 6 * 30 * 86_400;
    assert!((ts - expected).abs() < 2);
}

#[test]
fn parse_since_years() {
    let ts = parse_since("1y").unwrap();
    let expected = now() - 365 * 86_400;
    assert!((ts - expected).abs() < 2);
}

#[test]
fn parse_since_multi_char_units() {
    for unit in [
        "6mo", "6month", "6months", "1yr", "1year", "1years", "30day", "30days",
    ] {
        let result = parse_since(unit);
        assert!(result.is_ok(), "should accept {unit:?}, got: {result:?}");
    }
}

#[test]
fn parse_since_invalid_unit() {
    let err = parse_since("5x").unwrap_err();
    assert!(
        err.to_string().contains("unknown unit"),
        "should mention unknown unit, got: {err}"
    );
}

#[test]
fn parse_since_invalid_number() {
    let err = parse_since("abcd").unwrap_err();
    assert!(err.to_string().contains("invalid"), "got: {err}");
}

#[test]
fn parse_since_no_unit() {
    let err = parse_since("123").unwrap_err();
    assert!(err.to_string().contains("no unit"), "got: {err}");
}

#[test]
fn parse_since_empty() {
    let err = parse_since("  ").unwrap_err();
    assert!(err.to_string().contains("empty"), "got: {err}");
}

#[test]
fn parse_since_overflow() {
    let err = parse_since("999999999999999999999y").unwrap_err();
    assert!(
        err.to_string().contains("too large") || err.to_string().contains("invalid"),
        "should reject overflow, got: {err}"
    );
}

#[test]
fn basename_and_stem() {
    assert_eq!(basename("src/components/Button.vue"), "Button.vue");
    assert_eq!(basename("README.md"), "README.md");
    assert_eq!(file_stem("src/components/Button.vue"), "Button");
    assert_eq!(file_stem("types/api.d.ts"), "api");
    assert_eq!(file_stem(".env"), ".env");
    assert_eq!(file_stem("Makefile"), "Makefile");
}

#[test]
fn extension_lowercased() {
    assert_eq!(extension("src/App.TSX").as_deref(), Some("tsx"));
    assert_eq!(extension("Dockerfile"), None);
    assert_eq!(extension(".gitignore"), None);
}

#[test]
fn dir_segments_excludes_file_name() {
    let segs: Vec<&str> = dir_segments("src/api/users.ts").collect();
    assert_eq!(segs, vec!["src", "api"]);
    assert_eq!(dir_segments("main.rs").count(), 0);
}

#[test]
fn kebab_case_conversion() {
    assert_eq!(to_kebab_case("UserCard"), "user-card");
    assert_eq!(to_kebab_case("navBar"), "nav-bar");
    assert_eq!(to_kebab_case("Modal2Footer"), "modal2-footer");
    assert_eq!(to_kebab_case("button"), "button");
}

#[test]
fn binary_detection() {
    assert!(is_binary(b"abc\x00def"));
    assert!(!is_binary(b"plain text"));
    assert!(!is_binary(b""));
}

#[test]
fn percent_rounds_and_handles_zero() {
    assert_eq!(percent(1, 3), 33);
    assert_eq!(percent(2, 3), 67);
    assert_eq!(percent(1, 7), 14);
    assert_eq!(percent(5, 0), 0);
}

#[test]
fn counter_ranks_stably() {
    let counter: OrderedCounter = ["b", "a", "c", "a", "c"].into_iter().collect();
    let ranked = counter.ranked();
    assert_eq!(
        ranked,
        vec![
            ("a".to_string(), 2),
            ("c".to_string(), 2),
            ("b".to_string(), 1)
        ]
    );
    assert_eq!(counter.top(1), vec![("a".to_string(), 2)]);
    assert_eq!(counter.keys().collect::<Vec<_>>(), vec!["b", "a", "c"]);
}
