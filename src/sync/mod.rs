//! # Sync Module
//!
//! The playlist synchronization pipeline: reconciliation, capacity trimming,
//! in-place reordering and metadata refresh, coordinated per configured
//! playlist over a bounded worker pool.
//!
//! ## Pipeline
//!
//! For each configured playlist mapping:
//!
//! 1. [`plan`] computes the three-way diff (keep / add / remove) between the
//!    current target snapshot and the deduplicated union of the priority
//!    list and all source playlists.
//! 2. Removals, then additions, are applied in batches of 100 through the
//!    rate-limited API caller.
//! 3. The target is re-fetched for ground truth and [`trim`] enforces the
//!    size cap, preferring priority tracks, via one extra batched delete.
//! 4. [`reorder`] computes the desired final ordering and mutates the remote
//!    ordering with minimal single-item range moves, never remove+re-add,
//!    so per-track added-at provenance survives.
//! 5. [`metadata`] pushes the formatted description and resized cover.
//! 6. The final track snapshot and last-run date are persisted.
//!
//! ## Concurrency
//!
//! Playlists are processed by a handful of concurrent workers; each
//! playlist's pipeline runs end-to-end on one worker and may block on
//! backoff sleeps without stalling the others. The only shared mutable
//! state is a lock-protected cache of source snapshots ([`cache`]), so
//! targets sharing a source do not refetch it. The daily idempotence gate
//! is advisory, not a lock: two overlapping invocations can race and
//! double-process a playlist, which converges to the same state anyway.

pub mod cache;
pub mod metadata;
pub mod plan;
pub mod reorder;
pub mod trim;

use std::{collections::HashSet, sync::Arc, time::Duration};

use chrono::{NaiveDate, Utc};
use tokio::{sync::Semaphore, time::sleep};

use crate::{
    config::{GlobalSettings, PlaylistConfig, PlaylistsConfig},
    error, info,
    management::{LastUpdateManager, RecordManager, TokenManager},
    spotify::{
        self,
        playlist::TRACK_BATCH_SIZE,
        request::{self, ApiError},
    },
    success, warning,
};

use cache::SourceCache;

/// Number of playlists synchronized concurrently.
const MAX_CONCURRENT_PLAYLISTS: usize = 4;

/// Seconds to wait after mutations before trusting a re-fetched snapshot;
/// the remote index lags briefly after adds and removes.
const SETTLE_DELAY_SECS: u64 = 5;

/// Decides whether the reconcile, trim and reorder stages run for one
/// playlist. A metadata-only run never reconciles; otherwise the daily gate
/// closes when the playlist was already synced today, and `force` reopens
/// it. The metadata refresh is unaffected by this decision.
pub fn should_reconcile(
    last_update: Option<NaiveDate>,
    today: NaiveDate,
    force: bool,
    metadata_only: bool,
) -> bool {
    if metadata_only {
        return false;
    }
    force || last_update != Some(today)
}

/// Runs the sync pipeline for every configured playlist.
///
/// Aborts the whole run before any mutating call when the configuration
/// cannot be loaded, no token is available, or the API is unreachable.
/// Individual playlist failures are logged and do not stop the remaining
/// playlists.
///
/// # Arguments
///
/// * `force` - Ignore the daily idempotence gate
/// * `metadata_only` - Skip reconciliation, trimming and reordering for all
///   playlists; only refresh descriptions and covers
pub async fn run_all(force: bool, metadata_only: bool) {
    let config = match PlaylistsConfig::load().await {
        Ok(config) => config,
        Err(e) => error!("Failed to load playlist configuration: {}", e),
    };

    if !request::ping().await {
        error!("No connection to Spotify API");
    }

    if TokenManager::load().await.is_err() {
        error!("Failed to load token. Please run sporsync auth");
    }

    info!("Starting updates for {} playlists", config.playlists.len());

    let settings = Arc::new(config.global_settings.clone());
    let source_cache = SourceCache::new();
    let semaphore = Arc::new(Semaphore::new(MAX_CONCURRENT_PLAYLISTS));

    let mut handles = Vec::new();
    for playlist in config.playlists {
        let settings = Arc::clone(&settings);
        let source_cache = source_cache.clone();
        let semaphore = Arc::clone(&semaphore);

        handles.push(tokio::spawn(async move {
            let _permit = match semaphore.acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => return,
            };
            run_playlist(&playlist, &settings, &source_cache, force, metadata_only).await;
        }));
    }

    for handle in handles {
        if let Err(e) = handle.await {
            warning!("Task join error: {}", e);
        }
    }

    success!("Completed all playlist updates");
}

/// Runs the full pipeline for one playlist on one worker.
///
/// An unhandled failure abandons this playlist only. When the daily gate is
/// closed (already synced today and not forced), the reconcile, trim and
/// reorder stages are skipped but the metadata refresh still executes.
async fn run_playlist(
    cfg: &PlaylistConfig,
    settings: &GlobalSettings,
    source_cache: &SourceCache,
    force: bool,
    metadata_only: bool,
) {
    info!("Starting update for playlist: {}", cfg.name);

    let mut token_mgr = match TokenManager::load().await {
        Ok(manager) => manager,
        Err(e) => {
            warning!("Failed to load token for {}: {}", cfg.name, e);
            return;
        }
    };

    let gate = LastUpdateManager::new(cfg.name.clone());
    let today = Utc::now().date_naive();

    let reconcile = should_reconcile(gate.load().await, today, force, metadata_only);
    if !reconcile && !metadata_only {
        info!("{} already updated today. Skipping reconciliation.", cfg.name);
    }

    let final_tracks = if reconcile {
        match sync_tracks(cfg, settings, source_cache, &mut token_mgr).await {
            Ok(tracks) => Some(tracks),
            Err(e) => {
                warning!("Failed to update {}: {}", cfg.name, e);
                return;
            }
        }
    } else {
        None
    };

    metadata::refresh(cfg, settings, &mut token_mgr).await;

    if let Some(track_ids) = final_tracks {
        let records =
            spotify::tracks::get_records(&mut token_mgr, &track_ids, settings.max_retries).await;
        if let Err(e) = RecordManager::new(cfg.name.clone(), Some(records))
            .persist()
            .await
        {
            warning!("Failed to save record for {}: {}", cfg.name, e);
        }
        if let Err(e) = gate.persist(today).await {
            warning!("Failed to save last update for {}: {}", cfg.name, e);
        }

        success!("Successfully updated {}", cfg.name);
    }
}

/// Reconciles, trims and reorders the target playlist's track set.
///
/// Returns the final track ids in their desired order. Fatal errors are
/// fetch failures on the target playlist; failed removal/addition batches
/// and failed moves are logged and skipped, since a re-run converges.
async fn sync_tracks(
    cfg: &PlaylistConfig,
    settings: &GlobalSettings,
    source_cache: &SourceCache,
    token_mgr: &mut TokenManager,
) -> Result<Vec<String>, ApiError> {
    // Deduplicated union of all sources, first-seen order, priority first.
    let mut source_ids: Vec<String> = Vec::new();
    for source in &cfg.source_playlists {
        let entries = match source_cache.get(source).await {
            Some(entries) => entries,
            None => {
                match spotify::playlist::get_tracks(token_mgr, source, settings.max_retries).await
                {
                    Ok(entries) => {
                        source_cache.put(source.clone(), entries.clone()).await;
                        entries
                    }
                    Err(e) => {
                        warning!("Failed to fetch tracks from {}: {}", source, e);
                        continue;
                    }
                }
            }
        };
        info!("Fetched {} tracks from source {}", entries.len(), source);
        source_ids.extend(entries.into_iter().map(|e| e.id));
    }

    let desired = plan::desired_tracks(&cfg.priority_songs, &source_ids);

    let current_entries =
        spotify::playlist::get_tracks(token_mgr, &cfg.target_playlist_id, settings.max_retries)
            .await?;
    let current: Vec<String> = current_entries.iter().map(|e| e.id.clone()).collect();
    info!("Current tracks in target playlist: {}", current.len());

    let sync_plan = plan::build(&current, &desired);
    info!(
        "{}: keeping {}, adding {}, removing {} tracks",
        cfg.name,
        sync_plan.to_keep.len(),
        sync_plan.to_add.len(),
        sync_plan.to_remove.len()
    );

    if !sync_plan.is_noop() {
        for batch in sync_plan.to_remove.chunks(TRACK_BATCH_SIZE) {
            if let Err(e) = spotify::playlist::remove_tracks(
                token_mgr,
                &cfg.target_playlist_id,
                batch,
                settings.max_retries,
            )
            .await
            {
                warning!("Failed to remove batch from {}: {}", cfg.name, e);
            }
        }

        for batch in sync_plan.to_add.chunks(TRACK_BATCH_SIZE) {
            if let Err(e) = spotify::playlist::add_tracks(
                token_mgr,
                &cfg.target_playlist_id,
                batch,
                settings.max_retries,
            )
            .await
            {
                warning!("Failed to add batch to {}: {}", cfg.name, e);
            }
        }

        sleep(Duration::from_secs(SETTLE_DELAY_SECS)).await;
    }

    // Ground truth after the mutations; added-at timestamps come from here.
    let snapshot =
        spotify::playlist::get_tracks(token_mgr, &cfg.target_playlist_id, settings.max_retries)
            .await?;
    let snapshot_ids: Vec<String> = snapshot.iter().map(|e| e.id.clone()).collect();

    let priority_set: HashSet<String> = cfg.priority_songs.iter().cloned().collect();
    let trim_removals = trim::overflow(&snapshot_ids, &priority_set, cfg.max_songs);
    if !trim_removals.is_empty() {
        info!(
            "Trimming {} to {} tracks ({} removed)",
            cfg.name,
            cfg.max_songs,
            trim_removals.len()
        );
        for batch in trim_removals.chunks(TRACK_BATCH_SIZE) {
            if let Err(e) = spotify::playlist::remove_tracks(
                token_mgr,
                &cfg.target_playlist_id,
                batch,
                settings.max_retries,
            )
            .await
            {
                warning!("Failed to trim batch from {}: {}", cfg.name, e);
            }
        }
    }

    let trimmed_set: HashSet<&str> = trim_removals.iter().map(String::as_str).collect();
    let kept: Vec<_> = snapshot
        .into_iter()
        .filter(|e| !trimmed_set.contains(e.id.as_str()))
        .collect();
    let kept_ids: Vec<String> = kept.iter().map(|e| e.id.clone()).collect();

    let desired_order = reorder::target_order(&kept, &cfg.priority_songs, settings, Utc::now());
    let moves = reorder::plan_moves(&kept_ids, &desired_order);

    if moves.is_empty() {
        info!("{} already in desired order", cfg.name);
    } else {
        info!("Reordering {} with {} moves", cfg.name, moves.len());
        for mv in moves {
            if let Err(e) = spotify::playlist::move_track(
                token_mgr,
                &cfg.target_playlist_id,
                mv.from,
                mv.insert_before,
                settings.max_retries,
            )
            .await
            {
                // Skip the failed move and keep going; the next run fixes it.
                warning!("Failed move in {}: {}", cfg.name, e);
            }
        }
    }

    Ok(desired_order)
}
