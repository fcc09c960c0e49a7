use std::time::Duration;

use base64::{Engine, engine::general_purpose::STANDARD};
use image::{codecs::jpeg::JpegEncoder, imageops::FilterType};
use reqwest::Client;

use crate::{
    config::{GlobalSettings, PlaylistConfig},
    info,
    management::TokenManager,
    spotify, utils, warning,
};

/// Cover images are resized to this square edge before upload.
pub const COVER_SIZE: u32 = 640;
/// JPEG re-encode quality for uploaded covers.
pub const COVER_JPEG_QUALITY: u8 = 85;

const IMAGE_FETCH_TIMEOUT_SECS: u64 = 60;

/// Refreshes the description and cover image of a target playlist.
///
/// Reads the current top track, derives the lead artist name, pushes the
/// formatted description, and replaces the cover with the top track's album
/// art resized to [`COVER_SIZE`]. Each step fails independently: a missing
/// top track falls back to a placeholder artist for the description, and a
/// failed cover update never blocks the description (or the overall sync).
pub async fn refresh(
    cfg: &PlaylistConfig,
    settings: &GlobalSettings,
    token_mgr: &mut TokenManager,
) {
    let top_track = match spotify::playlist::get_top_track(
        token_mgr,
        &cfg.target_playlist_id,
        settings.max_retries,
    )
    .await
    {
        Ok(track) => track,
        Err(e) => {
            warning!("Failed to fetch top track for {}: {}", cfg.name, e);
            None
        }
    };

    let artist_name = top_track
        .as_ref()
        .and_then(|t| t.artists.first())
        .map(|a| a.name.clone())
        .unwrap_or_else(|| "Unknown Artist".to_string());

    let description = utils::format_description(
        &cfg.description_template,
        &artist_name,
        settings.contact_email.as_deref(),
    );

    match spotify::playlist::change_description(
        token_mgr,
        &cfg.target_playlist_id,
        &description,
        settings.max_retries,
    )
    .await
    {
        Ok(_) => info!("Updated description for {}: {}", cfg.name, description),
        Err(e) => warning!("Failed to update description for {}: {}", cfg.name, e),
    }

    let cover_url = top_track
        .and_then(|t| t.album)
        .and_then(|album| album.images.into_iter().next())
        .map(|image| image.url);

    let Some(cover_url) = cover_url else {
        warning!("No album image available for cover update in {}", cfg.name);
        return;
    };

    match build_cover_payload(&cover_url).await {
        Ok(payload) => {
            match spotify::playlist::upload_cover(
                token_mgr,
                &cfg.target_playlist_id,
                &payload,
                settings.max_retries,
            )
            .await
            {
                Ok(_) => info!("Updated cover image for {} by {}", cfg.name, artist_name),
                Err(e) => warning!("Failed to update cover image for {}: {}", cfg.name, e),
            }
        }
        Err(e) => warning!("Failed to prepare cover image for {}: {}", cfg.name, e),
    }
}

/// Downloads album art and turns it into the base64 JPEG payload the cover
/// upload endpoint expects: square resize with Lanczos3, RGB, fixed
/// compression quality.
async fn build_cover_payload(image_url: &str) -> Result<String, String> {
    let client = Client::new();
    let bytes = client
        .get(image_url)
        .timeout(Duration::from_secs(IMAGE_FETCH_TIMEOUT_SECS))
        .send()
        .await
        .map_err(|e| e.to_string())?
        .bytes()
        .await
        .map_err(|e| e.to_string())?;

    let img = image::load_from_memory(&bytes).map_err(|e| e.to_string())?;
    let resized = img.resize_exact(COVER_SIZE, COVER_SIZE, FilterType::Lanczos3);
    let rgb = resized.to_rgb8();

    let mut jpeg: Vec<u8> = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut jpeg, COVER_JPEG_QUALITY);
    rgb.write_with_encoder(encoder).map_err(|e| e.to_string())?;

    Ok(STANDARD.encode(&jpeg))
}
