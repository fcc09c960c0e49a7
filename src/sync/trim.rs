use std::collections::HashSet;

/// Computes the tracks to drop so the playlist fits `max_songs`.
///
/// The snapshot is partitioned into its priority and non-priority
/// subsequences, both in existing relative order. When the priority tracks
/// alone exceed the cap, only the first `max_songs` of them survive and
/// every non-priority track is dropped. Otherwise all priority tracks stay
/// and the first `max_songs − priorityCount` non-priority tracks fill the
/// remaining slots.
///
/// The returned ids are applied as one extra batched delete; survivors are
/// never reordered or re-added, so their added-at provenance stays intact.
pub fn overflow(current: &[String], priority: &HashSet<String>, max_songs: usize) -> Vec<String> {
    if current.len() <= max_songs {
        return Vec::new();
    }

    let priority_count = current.iter().filter(|id| priority.contains(*id)).count();
    let non_priority_budget = max_songs.saturating_sub(priority_count);

    let mut kept_priority = 0usize;
    let mut kept_other = 0usize;
    let mut removals = Vec::new();

    for id in current {
        if priority.contains(id) {
            if kept_priority < max_songs {
                kept_priority += 1;
            } else {
                removals.push(id.clone());
            }
        } else if kept_other < non_priority_budget {
            kept_other += 1;
        } else {
            removals.push(id.clone());
        }
    }

    removals
}
