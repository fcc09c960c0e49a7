use std::collections::HashSet;

use sporsync::sync::trim::overflow;

fn ids(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}

fn priority(raw: &[&str]) -> HashSet<String> {
    raw.iter().map(|s| s.to_string()).collect()
}

fn survivors(current: &[String], removals: &[String]) -> Vec<String> {
    let removed: HashSet<&String> = removals.iter().collect();
    current
        .iter()
        .filter(|id| !removed.contains(id))
        .cloned()
        .collect()
}

#[test]
fn test_no_trim_when_under_cap() {
    let current = ids(&["A", "B", "C"]);
    assert!(overflow(&current, &priority(&["A"]), 5).is_empty());
    assert!(overflow(&current, &priority(&[]), 3).is_empty());
}

#[test]
fn test_trim_keeps_all_priority_and_leading_non_priority() {
    // priority count (2) <= max (4): all priority stays, first 2 non-priority fill up
    let current = ids(&["N1", "P1", "N2", "N3", "P2", "N4"]);
    let removals = overflow(&current, &priority(&["P1", "P2"]), 4);

    assert_eq!(removals, ids(&["N3", "N4"]));
    assert_eq!(survivors(&current, &removals), ids(&["N1", "P1", "N2", "P2"]));
}

#[test]
fn test_trim_never_reorders_survivors() {
    let current = ids(&["A", "P", "B", "C", "D"]);
    let removals = overflow(&current, &priority(&["P"]), 3);

    // Survivors keep their prior relative order
    assert_eq!(survivors(&current, &removals), ids(&["A", "P", "B"]));
}

#[test]
fn test_trim_priority_overflow_scenario() {
    // maxSize = 2 with three priority tracks present: only the first two
    // priority tracks survive, zero non-priority slots remain.
    let current = ids(&["P1", "N1", "P2", "P3", "N2"]);
    let removals = overflow(&current, &priority(&["P1", "P2", "P3"]), 2);

    assert_eq!(survivors(&current, &removals), ids(&["P1", "P2"]));
    assert_eq!(removals, ids(&["N1", "P3", "N2"]));
}

#[test]
fn test_trim_exact_fit_priority_only() {
    let current = ids(&["P1", "P2", "N1"]);
    let removals = overflow(&current, &priority(&["P1", "P2"]), 2);
    assert_eq!(removals, ids(&["N1"]));
}

#[test]
fn test_trim_no_priority_keeps_prefix() {
    let current = ids(&["A", "B", "C", "D", "E"]);
    let removals = overflow(&current, &priority(&[]), 3);
    assert_eq!(removals, ids(&["D", "E"]));
    assert_eq!(survivors(&current, &removals), ids(&["A", "B", "C"]));
}

#[test]
fn test_trim_result_size_matches_cap() {
    let current = ids(&["P1", "A", "B", "P2", "C", "D", "E"]);
    for max in 1..=7 {
        let removals = overflow(&current, &priority(&["P1", "P2"]), max);
        assert_eq!(survivors(&current, &removals).len(), max.min(current.len()));
    }
}
