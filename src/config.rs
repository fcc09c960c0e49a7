//! Configuration management for the playlist sync CLI.
//!
//! This module handles loading and accessing configuration from two places:
//! environment variables (credentials, API endpoints, server settings) and a
//! JSON playlist configuration file describing which target playlists to
//! maintain from which sources.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use std::{env, fmt, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::info;

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the necessary directory structure if it doesn't exist and loads
/// environment variables from a `.env` file located in the platform-specific
/// local data directory under `sporsync/.env`. This allows users to store
/// credentials securely without hardcoding sensitive values.
///
/// # Directory Structure
///
/// The function looks for the `.env` file in:
/// - Linux: `~/.local/share/sporsync/.env`
/// - macOS: `~/Library/Application Support/sporsync/.env`
/// - Windows: `%LOCALAPPDATA%/sporsync/.env`
///
/// # Errors
///
/// This function will return an error if:
/// - The parent directory cannot be created
/// - The `.env` file cannot be read or parsed
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("sporsync/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    dotenv::from_path(path).map_err(|e| e.to_string())?;
    Ok(())
}

/// Returns the server address for the local OAuth callback server.
///
/// # Panics
///
/// Panics if the `SERVER_ADDRESS` environment variable is not set.
pub fn server_addr() -> String {
    env::var("SERVER_ADDRESS").expect("SERVER_ADDRESS must be set")
}

/// Returns the Spotify API client ID for authentication.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_AUTH_CLIENT_ID` environment variable is not set.
pub fn spotify_client_id() -> String {
    env::var("SPOTIFY_API_AUTH_CLIENT_ID").expect("SPOTIFY_API_AUTH_CLIENT_ID must be set")
}

/// Returns the Spotify OAuth redirect URI.
///
/// This must match the redirect URI registered in the Spotify application
/// settings.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_REDIRECT_URI` environment variable is not set.
pub fn spotify_redirect_uri() -> String {
    env::var("SPOTIFY_API_REDIRECT_URI").expect("SPOTIFY_API_REDIRECT_URI must be set")
}

/// Returns the Spotify API scope permissions.
///
/// The sync pipeline needs playlist read/modify scopes plus
/// `ugc-image-upload` for cover updates.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_AUTH_SCOPE` environment variable is not set.
pub fn spotify_scope() -> String {
    env::var("SPOTIFY_API_AUTH_SCOPE").expect("SPOTIFY_API_AUTH_SCOPE must be set")
}

/// Returns the Spotify OAuth authorization URL.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_AUTH_URL` environment variable is not set.
pub fn spotify_apiauth_url() -> String {
    env::var("SPOTIFY_API_AUTH_URL").expect("SPOTIFY_API_AUTH_URL must be set")
}

/// Returns the Spotify Web API base URL.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_URL` environment variable is not set.
pub fn spotify_apiurl() -> String {
    env::var("SPOTIFY_API_URL").expect("SPOTIFY_API_URL must be set")
}

/// Returns the Spotify OAuth token exchange URL.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_TOKEN_URL` environment variable is not set.
pub fn spotify_apitoken_url() -> String {
    env::var("SPOTIFY_API_TOKEN_URL").expect("SPOTIFY_API_TOKEN_URL must be set")
}

/// Ordering policy for non-priority tracks after a sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReorderStrategy {
    /// Priority tracks, then recently added tracks, then everything else.
    #[default]
    Smart,
    /// Priority tracks first, everything else uniformly shuffled.
    Random,
    /// Priority tracks first, the rest sorted by added-at, newest first.
    Chronological,
}

impl fmt::Display for ReorderStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReorderStrategy::Smart => write!(f, "smart"),
            ReorderStrategy::Random => write!(f, "random"),
            ReorderStrategy::Chronological => write!(f, "chronological"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalSettings {
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub reorder_strategy: ReorderStrategy,
    #[serde(default = "default_new_track_threshold_days")]
    pub new_track_threshold_days: i64,
    #[serde(default = "default_randomize_within_groups")]
    pub randomize_within_groups: bool,
}

fn default_max_retries() -> u32 {
    3
}

fn default_new_track_threshold_days() -> i64 {
    14
}

fn default_randomize_within_groups() -> bool {
    true
}

impl Default for GlobalSettings {
    fn default() -> Self {
        GlobalSettings {
            max_retries: default_max_retries(),
            contact_email: None,
            reorder_strategy: ReorderStrategy::default(),
            new_track_threshold_days: default_new_track_threshold_days(),
            randomize_within_groups: default_randomize_within_groups(),
        }
    }
}

/// Configuration for one target playlist. Immutable per run; `name` is the
/// identity key for persisted records and last-update dates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistConfig {
    pub name: String,
    pub target_playlist_id: String,
    pub source_playlists: Vec<String>,
    #[serde(default)]
    pub priority_songs: Vec<String>,
    pub description_template: String,
    pub max_songs: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistsConfig {
    pub playlists: Vec<PlaylistConfig>,
    #[serde(default)]
    pub global_settings: GlobalSettings,
}

impl PlaylistsConfig {
    /// Loads the playlist configuration from `sporsync/playlists.json` in the
    /// local data directory.
    ///
    /// Malformed priority entries (empty ids) are dropped with a warning so a
    /// single bad entry does not abort the whole run; a missing or malformed
    /// file is an error the caller should treat as fatal.
    pub async fn load() -> Result<Self, String> {
        let path = Self::config_path();
        let content = async_fs::read_to_string(&path)
            .await
            .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
        let mut config: PlaylistsConfig =
            serde_json::from_str(&content).map_err(|e| e.to_string())?;

        for playlist in &mut config.playlists {
            let before = playlist.priority_songs.len();
            playlist.priority_songs.retain(|id| !id.trim().is_empty());
            let dropped = before - playlist.priority_songs.len();
            if dropped > 0 {
                crate::warning!(
                    "Dropped {} malformed priority entries for playlist {}",
                    dropped,
                    playlist.name
                );
            }
        }

        info!("Loaded configuration for {} playlists", config.playlists.len());
        Ok(config)
    }

    fn config_path() -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("sporsync/playlists.json");
        path
    }
}
