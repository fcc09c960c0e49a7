use std::time::Duration;

use reqwest::Client;
use tokio::time::sleep;

use crate::{
    config,
    management::TokenManager,
    spotify::request::{self, ApiError},
    types::{
        AddTracksRequest, ChangeDetailsRequest, PlaylistEntry, PlaylistTracksResponse,
        RemoveTracksRequest, ReorderRequest, TrackObject, TrackUri,
    },
};

/// Spotify caps add/remove batches at 100 track uris per request.
pub const TRACK_BATCH_SIZE: usize = 100;

fn track_uri(id: &str) -> String {
    format!("spotify:track:{}", id)
}

/// Fetches the complete ordered snapshot of a playlist.
///
/// Follows the `next` pagination links until the playlist is exhausted and
/// returns one [`PlaylistEntry`] per track in remote order, carrying the
/// added-at provenance timestamp. Items without a track object (removed or
/// unavailable tracks) are skipped defensively.
pub async fn get_tracks(
    token_mgr: &mut TokenManager,
    playlist_id: &str,
    max_retries: u32,
) -> Result<Vec<PlaylistEntry>, ApiError> {
    let mut entries: Vec<PlaylistEntry> = Vec::new();
    let mut url = Some(format!(
        "{uri}/playlists/{id}/tracks?limit=100",
        uri = &config::spotify_apiurl(),
        id = playlist_id
    ));

    while let Some(page_url) = url {
        let token = token_mgr.get_valid_token().await;
        let page: PlaylistTracksResponse =
            request::with_backoff("fetch playlist tracks", max_retries, || async {
                let client = Client::new();
                let response = client.get(&page_url).bearer_auth(&token).send().await?;
                let response = request::classify(response)?;
                Ok(response.json::<PlaylistTracksResponse>().await?)
            })
            .await?;

        for item in page.items {
            if let Some(track) = item.track {
                if let Some(id) = track.id {
                    entries.push(PlaylistEntry {
                        id,
                        added_at: item.added_at,
                    });
                }
            }
        }

        url = page.next;
    }

    Ok(entries)
}

/// Attempts to read the first playlist position before giving up on a
/// top track.
const TOP_TRACK_ATTEMPTS: u32 = 3;
const TOP_TRACK_RETRY_DELAY_SECS: u64 = 2;

/// Reads the current top track of a playlist.
///
/// The remote index may lag for a moment right after a mutation and report
/// the first position as empty, so an empty read is re-tried a couple of
/// times with a short pause before concluding the playlist has no usable
/// top track.
pub async fn get_top_track(
    token_mgr: &mut TokenManager,
    playlist_id: &str,
    max_retries: u32,
) -> Result<Option<TrackObject>, ApiError> {
    let api_url = format!(
        "{uri}/playlists/{id}/tracks?limit=1&offset=0",
        uri = &config::spotify_apiurl(),
        id = playlist_id
    );

    for attempt in 0..TOP_TRACK_ATTEMPTS {
        if attempt > 0 {
            sleep(Duration::from_secs(TOP_TRACK_RETRY_DELAY_SECS)).await;
        }

        let token = token_mgr.get_valid_token().await;
        let page: PlaylistTracksResponse =
            request::with_backoff("fetch top track", max_retries, || async {
                let client = Client::new();
                let response = client.get(&api_url).bearer_auth(&token).send().await?;
                let response = request::classify(response)?;
                Ok(response.json::<PlaylistTracksResponse>().await?)
            })
            .await?;

        if let Some(track) = page.items.into_iter().next().and_then(|item| item.track) {
            return Ok(Some(track));
        }
    }

    Ok(None)
}

/// Adds a batch of tracks (at most [`TRACK_BATCH_SIZE`]) to a playlist.
pub async fn add_tracks(
    token_mgr: &mut TokenManager,
    playlist_id: &str,
    track_ids: &[String],
    max_retries: u32,
) -> Result<(), ApiError> {
    let token = token_mgr.get_valid_token().await;
    let api_url = format!(
        "{uri}/playlists/{id}/tracks",
        uri = &config::spotify_apiurl(),
        id = playlist_id
    );
    let body = AddTracksRequest {
        uris: track_ids.iter().map(|id| track_uri(id)).collect(),
    };

    request::with_backoff("add tracks", max_retries, || async {
        let client = Client::new();
        let response = client
            .post(&api_url)
            .bearer_auth(&token)
            .json(&body)
            .send()
            .await?;
        request::classify(response)?;
        Ok(())
    })
    .await
}

/// Removes all occurrences of a batch of tracks from a playlist.
pub async fn remove_tracks(
    token_mgr: &mut TokenManager,
    playlist_id: &str,
    track_ids: &[String],
    max_retries: u32,
) -> Result<(), ApiError> {
    let token = token_mgr.get_valid_token().await;
    let api_url = format!(
        "{uri}/playlists/{id}/tracks",
        uri = &config::spotify_apiurl(),
        id = playlist_id
    );
    let body = RemoveTracksRequest {
        tracks: track_ids
            .iter()
            .map(|id| TrackUri { uri: track_uri(id) })
            .collect(),
    };

    request::with_backoff("remove tracks", max_retries, || async {
        let client = Client::new();
        let response = client
            .delete(&api_url)
            .bearer_auth(&token)
            .json(&body)
            .send()
            .await?;
        request::classify(response)?;
        Ok(())
    })
    .await
}

/// Moves the single track at `range_start` to sit before `insert_before`.
///
/// This is the only reordering primitive the sync engine uses. Moving a
/// range keeps the per-track added-at timestamp intact, which a
/// remove-and-re-add would reset.
pub async fn move_track(
    token_mgr: &mut TokenManager,
    playlist_id: &str,
    range_start: usize,
    insert_before: usize,
    max_retries: u32,
) -> Result<(), ApiError> {
    let token = token_mgr.get_valid_token().await;
    let api_url = format!(
        "{uri}/playlists/{id}/tracks",
        uri = &config::spotify_apiurl(),
        id = playlist_id
    );
    let body = ReorderRequest {
        range_start,
        range_length: 1,
        insert_before,
    };

    request::with_backoff("reorder tracks", max_retries, || async {
        let client = Client::new();
        let response = client
            .put(&api_url)
            .bearer_auth(&token)
            .json(&body)
            .send()
            .await?;
        request::classify(response)?;
        Ok(())
    })
    .await
}

/// Updates the playlist description. Idempotent to re-apply.
pub async fn change_description(
    token_mgr: &mut TokenManager,
    playlist_id: &str,
    description: &str,
    max_retries: u32,
) -> Result<(), ApiError> {
    let token = token_mgr.get_valid_token().await;
    let api_url = format!(
        "{uri}/playlists/{id}",
        uri = &config::spotify_apiurl(),
        id = playlist_id
    );
    let body = ChangeDetailsRequest {
        description: description.to_string(),
    };

    request::with_backoff("update description", max_retries, || async {
        let client = Client::new();
        let response = client
            .put(&api_url)
            .bearer_auth(&token)
            .json(&body)
            .send()
            .await?;
        request::classify(response)?;
        Ok(())
    })
    .await
}

/// Uploads a base64-encoded JPEG as the playlist cover image.
pub async fn upload_cover(
    token_mgr: &mut TokenManager,
    playlist_id: &str,
    base64_jpeg: &str,
    max_retries: u32,
) -> Result<(), ApiError> {
    let token = token_mgr.get_valid_token().await;
    let api_url = format!(
        "{uri}/playlists/{id}/images",
        uri = &config::spotify_apiurl(),
        id = playlist_id
    );

    request::with_backoff("upload cover image", max_retries, || async {
        let client = Client::new();
        let response = client
            .put(&api_url)
            .bearer_auth(&token)
            .header("Content-Type", "image/jpeg")
            .body(base64_jpeg.to_string())
            .send()
            .await?;
        request::classify(response)?;
        Ok(())
    })
    .await
}
