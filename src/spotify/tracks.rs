use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;

use crate::{
    config,
    management::TokenManager,
    spotify::request::{self, ApiError},
    types::{SeveralTracksResponse, TrackRecord},
    warning,
};

/// Spotify caps the several-tracks endpoint at 50 ids per request.
pub const METADATA_BATCH_SIZE: usize = 50;

/// Fetches name/artist metadata for a list of track ids.
///
/// Ids are looked up in batches of [`METADATA_BATCH_SIZE`]. A failed batch is
/// logged and skipped so a single rejected id cannot sink the audit record of
/// an otherwise successful sync; unknown ids come back as nulls and are
/// dropped.
pub async fn get_records(
    token_mgr: &mut TokenManager,
    track_ids: &[String],
    max_retries: u32,
) -> Vec<TrackRecord> {
    let mut records: Vec<TrackRecord> = Vec::new();

    let pb = ProgressBar::new_spinner();
    pb.set_message("Fetching track metadata...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    for batch in track_ids.chunks(METADATA_BATCH_SIZE) {
        let token = token_mgr.get_valid_token().await;
        let api_url = format!(
            "{uri}/tracks?ids={ids}",
            uri = &config::spotify_apiurl(),
            ids = batch.join(",")
        );

        let response: Result<SeveralTracksResponse, ApiError> =
            request::with_backoff("fetch track metadata", max_retries, || async {
                let client = Client::new();
                let response = client.get(&api_url).bearer_auth(&token).send().await?;
                let response = request::classify(response)?;
                Ok(response.json::<SeveralTracksResponse>().await?)
            })
            .await;

        match response {
            Ok(body) => {
                pb.set_message(format!("Fetched metadata for {} tracks...", records.len()));
                for track in body.tracks.into_iter().flatten() {
                    if let Some(id) = track.id {
                        records.push(TrackRecord {
                            id,
                            name: track.name,
                            artists: track.artists.into_iter().map(|a| a.name).collect(),
                        });
                    }
                }
            }
            Err(e) => {
                warning!("Failed to fetch metadata for batch: {}", e);
            }
        }
    }

    pb.finish_and_clear();
    records
}
