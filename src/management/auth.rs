use std::path::PathBuf;

use chrono::Utc;

use crate::{spotify, types::Token};

/// Tokens are refreshed this many seconds before their actual expiry so a
/// long-running pipeline never sends a token that dies mid-request.
const REFRESH_BUFFER_SECS: u64 = 240;

/// Owns the persisted OAuth token and transparently refreshes it.
///
/// Each worker loads its own manager from disk; the token cache on disk is
/// the only coordination between them, and a redundant refresh is harmless.
pub struct TokenManager {
    token: Token,
}

impl TokenManager {
    pub fn new(token: Token) -> Self {
        TokenManager { token }
    }

    /// Reads the cached token from disk. Fails when no auth flow has been
    /// completed yet.
    pub async fn load() -> Result<Self, String> {
        let content = async_fs::read_to_string(Self::token_path())
            .await
            .map_err(|e| e.to_string())?;
        let token = serde_json::from_str(&content).map_err(|e| e.to_string())?;
        Ok(Self { token })
    }

    pub async fn persist(&self) -> Result<(), String> {
        let path = Self::token_path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(&self.token).map_err(|e| e.to_string())?;
        async_fs::write(path, json).await.map_err(|e| e.to_string())
    }

    /// Returns an access token that is valid for at least the buffer window,
    /// refreshing and re-persisting it when necessary. A failed refresh
    /// falls back to the stale token; the next API call surfaces the error.
    pub async fn get_valid_token(&mut self) -> String {
        if self.is_expiring() {
            if let Ok(new_token) = spotify::auth::refresh_token(&self.token.refresh_token).await {
                self.token = new_token;
                let _ = self.persist().await;
            }
        }

        self.token.access_token.clone()
    }

    fn is_expiring(&self) -> bool {
        let now = Utc::now().timestamp() as u64;
        let expires_at = self.token.obtained_at + self.token.expires_in;
        now + REFRESH_BUFFER_SECS >= expires_at
    }

    fn token_path() -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("sporsync/cache/token.json");
        path
    }
}
