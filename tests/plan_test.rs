use std::collections::HashSet;

use sporsync::sync::plan::{build, desired_tracks};

// Helper to build owned id lists
fn ids(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}

fn as_set(raw: &[String]) -> HashSet<String> {
    raw.iter().cloned().collect()
}

#[test]
fn test_desired_tracks_priority_first() {
    let desired = desired_tracks(&ids(&["X"]), &ids(&["C", "D"]));
    assert_eq!(desired, ids(&["X", "C", "D"]));
}

#[test]
fn test_desired_tracks_dedup_preserves_first_occurrence() {
    // priority ++ sources, duplicates removed while keeping first-seen order
    let desired = desired_tracks(&ids(&["P", "A"]), &ids(&["A", "B", "P", "C", "B"]));
    assert_eq!(desired, ids(&["P", "A", "B", "C"]));
}

#[test]
fn test_desired_tracks_track_in_multiple_sources_counted_once() {
    let desired = desired_tracks(&[], &ids(&["A", "B", "A", "C", "A"]));
    assert_eq!(desired, ids(&["A", "B", "C"]));
}

#[test]
fn test_build_plan_scenario() {
    // current = [A,B,C], source = [C,D], priority = [X]
    let desired = desired_tracks(&ids(&["X"]), &ids(&["C", "D"]));
    assert_eq!(desired, ids(&["X", "C", "D"]));

    let plan = build(&ids(&["A", "B", "C"]), &desired);
    assert_eq!(as_set(&plan.to_add), as_set(&ids(&["X", "D"])));
    assert_eq!(as_set(&plan.to_remove), as_set(&ids(&["A", "B"])));
    assert_eq!(plan.to_keep, ids(&["C"]));
}

#[test]
fn test_build_plan_partitions_with_no_overlap() {
    let current = ids(&["A", "B", "C", "D"]);
    let desired = desired_tracks(&ids(&["P"]), &ids(&["C", "D", "E"]));
    let plan = build(&current, &desired);

    // to_keep ∪ to_add ∪ to_remove partitions current ∪ desired
    let keep = as_set(&plan.to_keep);
    let add = as_set(&plan.to_add);
    let remove = as_set(&plan.to_remove);

    assert!(keep.is_disjoint(&add));
    assert!(keep.is_disjoint(&remove));
    assert!(add.is_disjoint(&remove));

    let mut union: HashSet<String> = HashSet::new();
    union.extend(keep);
    union.extend(add);
    union.extend(remove);

    let mut expected = as_set(&current);
    expected.extend(as_set(&desired));
    assert_eq!(union, expected);
}

#[test]
fn test_build_plan_priority_track_never_removed() {
    // A priority track present in the target but absent from all sources
    // stays, because priority is folded into desired before the diff.
    let desired = desired_tracks(&ids(&["P"]), &ids(&["A"]));
    let plan = build(&ids(&["P", "B"]), &desired);

    assert!(!plan.to_remove.contains(&"P".to_string()));
    assert_eq!(plan.to_keep, ids(&["P"]));
    assert_eq!(plan.to_remove, ids(&["B"]));
}

#[test]
fn test_build_plan_identical_sets_is_noop() {
    let current = ids(&["A", "B", "C"]);
    let plan = build(&current, &current);
    assert!(plan.is_noop());
    assert_eq!(plan.to_keep, current);
}

#[test]
fn test_build_plan_empty_current() {
    let plan = build(&[], &ids(&["A", "B"]));
    assert_eq!(plan.to_add, ids(&["A", "B"]));
    assert!(plan.to_remove.is_empty());
    assert!(plan.to_keep.is_empty());
}

#[test]
fn test_build_plan_add_order_follows_desired_order() {
    let plan = build(&ids(&["M"]), &ids(&["Z", "M", "A", "Q"]));
    assert_eq!(plan.to_add, ids(&["Z", "A", "Q"]));
}
