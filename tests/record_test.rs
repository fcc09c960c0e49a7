use sporsync::management::RecordManager;
use sporsync::types::TrackRecord;

fn record(id: &str, name: &str, artists: &[&str]) -> TrackRecord {
    TrackRecord {
        id: id.to_string(),
        name: name.to_string(),
        artists: artists.iter().map(|a| a.to_string()).collect(),
    }
}

#[tokio::test]
async fn test_record_persist_and_load_round_trip() {
    // Unique name so parallel test runs cannot collide
    let playlist = format!("record-roundtrip-{}", std::process::id());
    let records = vec![
        record("t1", "First Song", &["Artist A"]),
        record("t2", "Second Song", &["Artist B", "Artist C"]),
    ];

    RecordManager::new(playlist.clone(), Some(records))
        .persist()
        .await
        .expect("persist should succeed");

    let loaded = RecordManager::load(playlist).await.expect("load should succeed");
    let loaded_records = loaded.get_records();

    assert_eq!(loaded_records.len(), 2);
    assert_eq!(loaded_records[0].id, "t1");
    assert_eq!(loaded_records[1].artists, vec!["Artist B", "Artist C"]);
}

#[tokio::test]
async fn test_record_load_missing_playlist_fails() {
    let result = RecordManager::load("record-never-synced".to_string()).await;
    assert!(result.is_err());
}
