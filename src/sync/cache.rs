use std::{collections::HashMap, sync::Arc};

use tokio::sync::Mutex;

use crate::types::PlaylistEntry;

/// Shared, lock-protected cache of already-fetched source playlist
/// snapshots. Scoped to one process run; avoids refetching a source that
/// several target playlists have in common. Workers clone the handle.
#[derive(Clone, Default)]
pub struct SourceCache {
    inner: Arc<Mutex<HashMap<String, Vec<PlaylistEntry>>>>,
}

impl SourceCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, playlist_id: &str) -> Option<Vec<PlaylistEntry>> {
        self.inner.lock().await.get(playlist_id).cloned()
    }

    pub async fn put(&self, playlist_id: String, entries: Vec<PlaylistEntry>) {
        self.inner.lock().await.insert(playlist_id, entries);
    }
}
