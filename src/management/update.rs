use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::management::RecordError;

#[derive(Debug, Serialize, Deserialize)]
struct LastUpdate {
    last_update: NaiveDate,
}

/// Per-playlist date of the last completed sync. Backs the advisory daily
/// idempotence gate: a playlist already synced today is not reconciled
/// again. The check is not atomic across concurrent invocations.
pub struct LastUpdateManager {
    playlist_name: String,
}

impl LastUpdateManager {
    pub fn new(playlist_name: String) -> Self {
        Self { playlist_name }
    }

    pub async fn load(&self) -> Option<NaiveDate> {
        let path = self.get_path();
        let content = async_fs::read_to_string(&path).await.ok()?;
        let record: LastUpdate = serde_json::from_str(&content).ok()?;
        Some(record.last_update)
    }

    pub async fn persist(&self, date: NaiveDate) -> Result<(), RecordError> {
        let path = self.get_path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(RecordError::IoError)?;
        }

        let json = serde_json::to_string_pretty(&LastUpdate { last_update: date })
            .map_err(RecordError::SerdeError)?;
        async_fs::write(path, json).await.map_err(RecordError::IoError)
    }

    fn get_path(&self) -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(format!(
            "sporsync/last_updates/{name}_last_update.json",
            name = self.playlist_name
        ));
        path
    }
}
