use chrono::{Duration, Utc};
use sporsync::config::{GlobalSettings, ReorderStrategy};
use sporsync::sync::reorder::{Move, plan_moves, target_order};
use sporsync::types::PlaylistEntry;

fn ids(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}

// Helper to create a snapshot entry added `days_ago` days in the past
fn entry(id: &str, days_ago: i64) -> PlaylistEntry {
    PlaylistEntry {
        id: id.to_string(),
        added_at: Some(Utc::now() - Duration::days(days_ago)),
    }
}

fn settings(strategy: ReorderStrategy) -> GlobalSettings {
    GlobalSettings {
        reorder_strategy: strategy,
        randomize_within_groups: false,
        new_track_threshold_days: 14,
        ..GlobalSettings::default()
    }
}

// Replays the engine's single-item range moves against a local model of the
// remote playlist.
fn apply_moves(order: &[String], moves: &[Move]) -> Vec<String> {
    let mut working = order.to_vec();
    for mv in moves {
        let item = working.remove(mv.from);
        working.insert(mv.insert_before, item);
    }
    working
}

#[test]
fn test_plan_moves_identical_order_is_noop() {
    let order = ids(&["A", "B", "C", "D"]);
    assert!(plan_moves(&order, &order).is_empty());
}

#[test]
fn test_plan_moves_single_swap() {
    let current = ids(&["A", "B"]);
    let desired = ids(&["B", "A"]);
    let moves = plan_moves(&current, &desired);

    assert_eq!(moves.len(), 1);
    assert_eq!(apply_moves(&current, &moves), desired);
}

#[test]
fn test_plan_moves_reaches_any_permutation() {
    let current = ids(&["A", "B", "C", "D", "E"]);
    let permutations: Vec<Vec<String>> = vec![
        ids(&["E", "D", "C", "B", "A"]),
        ids(&["B", "C", "D", "E", "A"]),
        ids(&["C", "A", "E", "B", "D"]),
        ids(&["A", "E", "B", "C", "D"]),
        ids(&["A", "B", "C", "D", "E"]),
    ];

    for desired in permutations {
        let moves = plan_moves(&current, &desired);
        assert_eq!(apply_moves(&current, &moves), desired);
        // At most N single-item moves for N tracks
        assert!(moves.len() <= current.len());
    }
}

#[test]
fn test_plan_moves_skips_already_placed_tracks() {
    // Only one track is out of place; exactly one move is needed
    let current = ids(&["A", "B", "D", "C"]);
    let desired = ids(&["A", "B", "C", "D"]);
    let moves = plan_moves(&current, &desired);

    assert_eq!(moves.len(), 1);
    assert_eq!(apply_moves(&current, &moves), desired);
}

#[test]
fn test_plan_moves_ignores_unknown_ids() {
    // A desired id missing from the working copy must not panic or corrupt
    // the remaining plan
    let current = ids(&["A", "B", "C"]);
    let desired = ids(&["A", "Z", "C", "B"]);
    let moves = plan_moves(&current, &desired);
    let result = apply_moves(&current, &moves);
    assert_eq!(result.len(), 3);
}

#[test]
fn test_target_order_is_permutation_of_snapshot() {
    let entries = vec![
        entry("A", 30),
        entry("P", 5),
        entry("B", 1),
        entry("C", 100),
    ];
    for strategy in [
        ReorderStrategy::Smart,
        ReorderStrategy::Random,
        ReorderStrategy::Chronological,
    ] {
        let order = target_order(&entries, &ids(&["P"]), &settings(strategy), Utc::now());
        let mut sorted = order.clone();
        sorted.sort();
        assert_eq!(sorted, ids(&["A", "B", "C", "P"]));
        assert_eq!(order[0], "P");
    }
}

#[test]
fn test_target_order_smart_groups_new_before_old() {
    let entries = vec![
        entry("OLD1", 60),
        entry("NEW1", 2),
        entry("P1", 90),
        entry("OLD2", 45),
        entry("NEW2", 7),
    ];
    let order = target_order(&entries, &ids(&["P1"]), &settings(ReorderStrategy::Smart), Utc::now());

    // priority → new (within threshold) → old, shuffling disabled
    assert_eq!(order, ids(&["P1", "NEW1", "NEW2", "OLD1", "OLD2"]));
}

#[test]
fn test_target_order_chronological_newest_first() {
    let entries = vec![
        entry("A", 10),
        entry("B", 1),
        entry("P", 50),
        entry("C", 30),
    ];
    let order = target_order(
        &entries,
        &ids(&["P"]),
        &settings(ReorderStrategy::Chronological),
        Utc::now(),
    );

    assert_eq!(order, ids(&["P", "B", "A", "C"]));
}

#[test]
fn test_target_order_priority_keeps_existing_relative_order() {
    let entries = vec![entry("P2", 3), entry("A", 2), entry("P1", 1)];
    let order = target_order(
        &entries,
        &ids(&["P1", "P2"]),
        &settings(ReorderStrategy::Chronological),
        Utc::now(),
    );

    // Existing relative order of priority tracks wins over configured order
    assert_eq!(order, ids(&["P2", "P1", "A"]));
}

#[test]
fn test_target_order_random_priority_follows_configured_order() {
    // Random pins the priority head to the configured list order, not the
    // current playlist order
    let entries = vec![entry("P2", 3), entry("A", 2), entry("P1", 1)];
    let order = target_order(
        &entries,
        &ids(&["P1", "P2"]),
        &settings(ReorderStrategy::Random),
        Utc::now(),
    );

    // Only one non-priority track, so the tail is deterministic too
    assert_eq!(order, ids(&["P1", "P2", "A"]));
}

#[test]
fn test_target_order_random_skips_absent_priority_ids() {
    // Configured priority ids missing from the snapshot must not be invented
    let entries = vec![entry("P1", 1), entry("A", 2)];
    let order = target_order(
        &entries,
        &ids(&["GONE", "P1"]),
        &settings(ReorderStrategy::Random),
        Utc::now(),
    );

    assert_eq!(order, ids(&["P1", "A"]));
}

#[test]
fn test_reorder_pipeline_end_to_end() {
    // target_order + plan_moves + replay must converge on the model
    let entries = vec![
        entry("N1", 1),
        entry("O1", 40),
        entry("P", 20),
        entry("N2", 3),
        entry("O2", 90),
    ];
    let current: Vec<String> = entries.iter().map(|e| e.id.clone()).collect();
    let desired = target_order(&entries, &ids(&["P"]), &settings(ReorderStrategy::Smart), Utc::now());
    let moves = plan_moves(&current, &desired);

    assert_eq!(apply_moves(&current, &moves), desired);
}
