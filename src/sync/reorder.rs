use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use rand::seq::SliceRandom;

use crate::{
    config::{GlobalSettings, ReorderStrategy},
    types::PlaylistEntry,
};

/// A single-item range move: take the track at `from` and insert it before
/// position `insert_before`. The only mutation primitive the engine issues,
/// because a remove-and-re-add would reset the track's added-at timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub from: usize,
    pub insert_before: usize,
}

/// Computes the desired final ordering for a post-trim snapshot.
///
/// Priority tracks always come first; the rest follows the configured
/// strategy:
///
/// - `smart`: tracks added within `new_track_threshold_days`, then all other
///   existing tracks, each group optionally shuffled.
/// - `random`: everything non-priority uniformly shuffled.
/// - `chronological`: non-priority tracks sorted by added-at, newest first.
///
/// For `smart` and `chronological` the priority head keeps its existing
/// relative order; `random` pins it to the configured list order, the one
/// deterministic anchor in an otherwise shuffled playlist.
///
/// The result is a permutation of the snapshot's track ids.
pub fn target_order(
    entries: &[PlaylistEntry],
    priority: &[String],
    settings: &GlobalSettings,
    now: DateTime<Utc>,
) -> Vec<String> {
    let priority_set: HashSet<&str> = priority.iter().map(String::as_str).collect();

    let priority_head: Vec<String> = match settings.reorder_strategy {
        ReorderStrategy::Random => {
            let present: HashSet<&str> = entries.iter().map(|e| e.id.as_str()).collect();
            priority
                .iter()
                .filter(|id| present.contains(id.as_str()))
                .cloned()
                .collect()
        }
        _ => entries
            .iter()
            .filter(|e| priority_set.contains(e.id.as_str()))
            .map(|e| e.id.clone())
            .collect(),
    };

    let rest: Vec<&PlaylistEntry> = entries
        .iter()
        .filter(|e| !priority_set.contains(e.id.as_str()))
        .collect();

    let mut tail: Vec<String> = match settings.reorder_strategy {
        ReorderStrategy::Smart => {
            let threshold = now - Duration::days(settings.new_track_threshold_days);
            let (mut new_tracks, mut old_tracks): (Vec<String>, Vec<String>) = (
                rest.iter()
                    .filter(|e| e.added_at.map(|at| at >= threshold).unwrap_or(false))
                    .map(|e| e.id.clone())
                    .collect(),
                rest.iter()
                    .filter(|e| !e.added_at.map(|at| at >= threshold).unwrap_or(false))
                    .map(|e| e.id.clone())
                    .collect(),
            );
            if settings.randomize_within_groups {
                let mut rng = rand::rng();
                new_tracks.shuffle(&mut rng);
                old_tracks.shuffle(&mut rng);
            }
            new_tracks.into_iter().chain(old_tracks).collect()
        }
        ReorderStrategy::Random => {
            let mut shuffled: Vec<String> = rest.iter().map(|e| e.id.clone()).collect();
            shuffled.shuffle(&mut rand::rng());
            shuffled
        }
        ReorderStrategy::Chronological => {
            let mut sorted: Vec<&PlaylistEntry> = rest.clone();
            // Newest first; tracks without a timestamp sink to the end.
            sorted.sort_by(|a, b| b.added_at.cmp(&a.added_at));
            sorted.iter().map(|e| e.id.clone()).collect()
        }
    };

    let mut order = priority_head;
    order.append(&mut tail);
    order
}

/// Computes the minimal sequence of single-item moves that rearranges
/// `current` into `desired`.
///
/// Walks the target positions from the front: whenever the working copy
/// already holds the right track at position `i` nothing is emitted,
/// otherwise the desired track is located at its current index and one move
/// is planned, mirrored into the working copy. A selection-sort-like pass
/// needing at most N moves for N tracks; identical orders yield an empty
/// plan, so an already-ordered playlist costs zero remote calls.
///
/// `desired` must be a permutation of `current`; ids missing from the
/// working copy are skipped defensively.
pub fn plan_moves(current: &[String], desired: &[String]) -> Vec<Move> {
    let mut working: Vec<String> = current.to_vec();
    let mut moves = Vec::new();

    for (i, want) in desired.iter().enumerate() {
        if i >= working.len() {
            break;
        }
        if working[i] == *want {
            continue;
        }

        if let Some(j) = working.iter().position(|id| id == want) {
            moves.push(Move {
                from: j,
                insert_before: i,
            });
            let item = working.remove(j);
            working.insert(i, item);
        }
    }

    moves
}
