//! Tests for the filesystem snapshot store.

use annalist_core::{ChannelInfo, ChannelSnapshot, MessageRecord, MessageRecordBuilder};
use annalist_storage::{FileSystemStore, MemoryStore, SnapshotStore};
use chrono::{TimeZone, Utc};
use tempfile::TempDir;

const CHANNEL_ID: &str = "1100000000000000000";

fn message(id: &str, secs: i64) -> MessageRecord {
    MessageRecordBuilder::default()
        .id(id)
        .author_id("42")
        .author_tag("someone")
        .author_display_name("Someone")
        .created_at(Utc.timestamp_opt(secs, 0).unwrap())
        .content("hello")
        .build()
        .unwrap()
}

fn general() -> ChannelInfo {
    ChannelInfo::new(CHANNEL_ID, Some("General Chat".to_string()), None)
}

#[tokio::test]
async fn test_resolve_synthesizes_sanitized_path() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSystemStore::new(temp_dir.path());

    let path = store.resolve(CHANNEL_ID, "General Chat").await;

    assert_eq!(
        path,
        temp_dir.path().join(format!("general-chat-{}.json", CHANNEL_ID))
    );
}

#[tokio::test]
async fn test_resolve_missing_directory_is_not_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let base = temp_dir.path().join("does-not-exist");
    let store = FileSystemStore::new(&base);

    let path = store.resolve(CHANNEL_ID, "general").await;

    assert_eq!(path, base.join(format!("general-{}.json", CHANNEL_ID)));
}

#[tokio::test]
async fn test_resolve_prefers_existing_file_after_rename() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSystemStore::new(temp_dir.path());

    let original = temp_dir.path().join(format!("old-name-{}.json", CHANNEL_ID));
    std::fs::write(&original, "{}").unwrap();
    // Same suffix digits but a different channel must not match
    std::fs::write(temp_dir.path().join("other-91100000000000000000.json"), "{}").unwrap();

    let path = store.resolve(CHANNEL_ID, "brand new name").await;

    assert_eq!(path, original);
}

#[tokio::test]
async fn test_resolve_ignores_temp_files() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSystemStore::new(temp_dir.path());

    std::fs::write(
        temp_dir.path().join(format!("general-{}.json.tmp", CHANNEL_ID)),
        "{}",
    )
    .unwrap();

    let path = store.resolve(CHANNEL_ID, "renamed").await;

    assert_eq!(path, temp_dir.path().join(format!("renamed-{}.json", CHANNEL_ID)));
}

#[tokio::test]
async fn test_save_creates_directory_and_round_trips() {
    let temp_dir = TempDir::new().unwrap();
    let base = temp_dir.path().join("exports");
    let store = FileSystemStore::new(&base);

    let snapshot = ChannelSnapshot::new(&general(), vec![message("2", 200), message("1", 100)]);
    let path = store.resolve(CHANNEL_ID, "General Chat").await;
    store.save(&path, &snapshot).await.unwrap();

    assert!(base.is_dir());
    assert!(!path.with_extension("json.tmp").exists());

    let loaded = store.load(&path).await.expect("Snapshot should load");
    assert_eq!(loaded, snapshot);
    assert_eq!(*loaded.total_messages(), 2);
}

#[tokio::test]
async fn test_save_writes_pretty_json() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSystemStore::new(temp_dir.path());

    let snapshot = ChannelSnapshot::new(&general(), vec![message("1", 100)]);
    let path = store.resolve(CHANNEL_ID, "general").await;
    store.save(&path, &snapshot).await.unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.starts_with("{\n  \"guildId\": null,"));
    assert!(raw.ends_with("}\n"));
}

#[tokio::test]
async fn test_save_overwrites_previous_content() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSystemStore::new(temp_dir.path());
    let path = store.resolve(CHANNEL_ID, "general").await;

    store
        .save(&path, &ChannelSnapshot::new(&general(), vec![message("1", 100)]))
        .await
        .unwrap();
    store
        .save(
            &path,
            &ChannelSnapshot::new(&general(), vec![message("1", 100), message("2", 200)]),
        )
        .await
        .unwrap();

    let loaded = store.load(&path).await.unwrap();
    assert_eq!(*loaded.total_messages(), 2);
}

#[tokio::test]
async fn test_load_missing_file_is_none() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSystemStore::new(temp_dir.path());

    let loaded = store.load(&temp_dir.path().join("missing-1.json")).await;

    assert!(loaded.is_none());
}

#[tokio::test]
async fn test_load_corrupt_file_is_none() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSystemStore::new(temp_dir.path());
    let path = temp_dir.path().join(format!("general-{}.json", CHANNEL_ID));
    std::fs::write(&path, "{ \"channelId\": ").unwrap();

    let loaded = store.load(&path).await;

    assert!(loaded.is_none());
    // The corrupt file is left for the next save to replace
    assert!(path.exists());
}

#[tokio::test]
async fn test_failed_save_leaves_previous_file_intact() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSystemStore::new(temp_dir.path());
    let path = store.resolve(CHANNEL_ID, "general").await;

    let snapshot = ChannelSnapshot::new(&general(), vec![message("1", 100)]);
    store.save(&path, &snapshot).await.unwrap();
    let before = std::fs::read_to_string(&path).unwrap();

    // A directory squatting on the temp path makes the temp write fail
    std::fs::create_dir(path.with_extension("json.tmp")).unwrap();
    let result = store
        .save(
            &path,
            &ChannelSnapshot::new(&general(), vec![message("1", 100), message("2", 200)]),
        )
        .await;

    assert!(result.is_err());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
}

#[tokio::test]
async fn test_memory_store_matches_filesystem_resolution() {
    let store = MemoryStore::new("exports");

    let fresh = store.resolve(CHANNEL_ID, "General Chat").await;
    assert_eq!(
        fresh,
        std::path::Path::new("exports").join(format!("general-chat-{}.json", CHANNEL_ID))
    );

    store
        .save(&fresh, &ChannelSnapshot::new(&general(), Vec::new()))
        .await
        .unwrap();
    let renamed = store.resolve(CHANNEL_ID, "something else").await;

    assert_eq!(renamed, fresh);
    assert_eq!(store.save_count(), 1);
    assert!(store.load(&fresh).await.is_some());
}
