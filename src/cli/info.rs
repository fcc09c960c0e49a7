use tabled::Table;

use crate::{config::PlaylistsConfig, error, info, management::RecordManager, types::PlaylistTableRow};

pub async fn info() {
    let config = match PlaylistsConfig::load().await {
        Ok(config) => config,
        Err(e) => error!("Failed to load playlist configuration: {}", e),
    };

    let mut rows: Vec<PlaylistTableRow> = Vec::with_capacity(config.playlists.len());
    for p in &config.playlists {
        // Tracks recorded after the last successful sync; zero until the
        // playlist has been synced once.
        let tracked = match RecordManager::load(p.name.clone()).await {
            Ok(manager) => manager.get_records().len(),
            Err(_) => 0,
        };

        rows.push(PlaylistTableRow {
            name: p.name.clone(),
            target: p.target_playlist_id.clone(),
            sources: p.source_playlists.len(),
            priority: p.priority_songs.len(),
            max_songs: p.max_songs,
            tracked,
        });
    }

    let table = Table::new(rows);
    println!("{}", table);

    info!(
        "Strategy: {strategy}\tMax retries: {retries}\tNew track threshold: {threshold} days",
        strategy = config.global_settings.reorder_strategy,
        retries = config.global_settings.max_retries,
        threshold = config.global_settings.new_track_threshold_days
    );
}
