use super::*;

#[test]
fn max_width_with_labels() {
    let labels = ["src/foo.ts", "src/very_long_name.ts"];
    let w = max_width(labels.iter().copied(), 4);
    assert_eq!(w, "src/very_long_name.ts".len());
}

#[test]
fn max_width_empty() {
    let labels: [&str; 0] = [];
    assert_eq!(max_width(labels.iter().copied(), 4), 4);
}

#[test]
fn max_width_min_enforced() {
    assert_eq!(max_width(["a"].iter().copied(), 10), 10);
}

#[test]
fn separator_width() {
    let s = separator(5);
    // Each ─ is 3 bytes in UTF-8
    assert_eq!(s.chars().count(), 5);
}

#[test]
fn bar_is_fixed_width() {
    assert_eq!(bar(0, 10).chars().count(), 10);
    assert_eq!(bar(100, 10), "\u{2588}".repeat(10));
    assert_eq!(bar(250, 4).chars().count(), 4);
    assert_eq!(bar(50, 10).chars().filter(|&c| c == '\u{2588}').count(), 5);
}

#[test]
fn print_json_stdout_works() {
    let data = vec![1, 2, 3];
    print_json_stdout(&data).unwrap();
}

#[test]
fn output_results_truncates() {
    let mut v = vec![1, 2, 3, 4];
    output_results(&mut v, 2, false, |_| Ok(()), |_| {}).unwrap();
    assert_eq!(v, vec![1, 2]);
}
