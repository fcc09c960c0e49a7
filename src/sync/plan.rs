use std::collections::HashSet;

use crate::utils;

/// Three-way diff between the current remote track list and the desired
/// source-derived track list. Derived and ephemeral; applying it is a
/// separate step.
#[derive(Debug, Clone, Default)]
pub struct SyncPlan {
    /// Desired but not current, in desired order.
    pub to_add: Vec<String>,
    /// Current but no longer desired, in current order.
    pub to_remove: Vec<String>,
    /// Current and still desired, in current order.
    pub to_keep: Vec<String>,
}

impl SyncPlan {
    pub fn is_noop(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }
}

/// Builds the desired track list from the priority list and the union of all
/// source playlists.
///
/// Priority tracks are prepended before deduplication so they never lose
/// precedence; first-seen order wins for tracks appearing in several
/// sources. Because priority ids are folded in here, the diff in [`build`]
/// can never schedule a priority track for removal.
pub fn desired_tracks(priority: &[String], source_tracks: &[String]) -> Vec<String> {
    let mut combined: Vec<String> = priority
        .iter()
        .chain(source_tracks.iter())
        .cloned()
        .collect();
    utils::dedup_track_ids(&mut combined);
    combined
}

/// Computes the [`SyncPlan`] for a target playlist. Pure computation.
///
/// - `to_remove = current − desired`
/// - `to_add = desired − current`
/// - `to_keep = current ∩ desired`
pub fn build(current: &[String], desired: &[String]) -> SyncPlan {
    let desired_set: HashSet<&str> = desired.iter().map(String::as_str).collect();
    let current_set: HashSet<&str> = current.iter().map(String::as_str).collect();

    SyncPlan {
        to_add: desired
            .iter()
            .filter(|id| !current_set.contains(id.as_str()))
            .cloned()
            .collect(),
        to_remove: current
            .iter()
            .filter(|id| !desired_set.contains(id.as_str()))
            .cloned()
            .collect(),
        to_keep: current
            .iter()
            .filter(|id| desired_set.contains(id.as_str()))
            .cloned()
            .collect(),
    }
}
