use std::{io::Error, path::PathBuf};

use crate::types::TrackRecord;

#[derive(Debug)]
pub enum RecordError {
    IoError(Error),
    SerdeError(serde_json::Error),
}

impl From<Error> for RecordError {
    fn from(err: Error) -> Self {
        RecordError::IoError(err)
    }
}

impl std::fmt::Display for RecordError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordError::IoError(e) => write!(f, "io error: {}", e),
            RecordError::SerdeError(e) => write!(f, "serde error: {}", e),
        }
    }
}

/// Per-playlist audit trail of the tracks present after the last successful
/// sync. Written for history only; sync decisions never read it back.
pub struct RecordManager {
    playlist_name: String,
    records: Vec<TrackRecord>,
}

impl RecordManager {
    pub fn new(playlist_name: String, records: Option<Vec<TrackRecord>>) -> Self {
        Self {
            playlist_name,
            records: records.unwrap_or_default(),
        }
    }

    /// Reads the persisted record for a playlist back from disk. Used for
    /// reporting only; sync decisions never depend on it.
    pub async fn load(playlist_name: String) -> Result<Self, RecordError> {
        let manager = Self::new(playlist_name, None);
        let content = async_fs::read_to_string(manager.get_path())
            .await
            .map_err(RecordError::IoError)?;
        let records = serde_json::from_str(&content).map_err(RecordError::SerdeError)?;
        Ok(Self { records, ..manager })
    }

    pub async fn persist(&self) -> Result<(), RecordError> {
        let path = Self::get_path(self);
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(RecordError::IoError)?;
        }

        let json =
            serde_json::to_string_pretty(&self.records).map_err(RecordError::SerdeError)?;
        async_fs::write(path, json).await.map_err(RecordError::IoError)
    }

    pub fn get_records(&self) -> &Vec<TrackRecord> {
        &self.records
    }

    fn get_path(&self) -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(format!(
            "sporsync/records/{name}_record.json",
            name = self.playlist_name
        ));
        path
    }
}
