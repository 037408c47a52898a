use super::*;
use crate::kernel::services::ports::storage::LoadStatus;
use tempfile::tempdir;

fn block_on<F: std::future::Future>(f: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
        .block_on(f)
}

#[test]
fn load_missing_is_not_found() {
    let dir = tempdir().unwrap();
    let storage = LocalStorage::new(dir.path(), "editor-saved-state");

    let outcome = block_on(storage.load());
    assert_eq!(outcome.status, LoadStatus::NotFound);
    assert_eq!(outcome.payload, None);
}

#[test]
fn save_then_load_round_trip() {
    let dir = tempdir().unwrap();
    let storage = LocalStorage::new(&dir.path().join("nested"), "editor-saved-state");

    let saved = block_on(storage.save(r#"{"version":1,"leaves":["hi"]}"#.to_string()));
    assert!(saved.is_saved());
    assert_eq!(saved.message, "Saved to local storage");
    assert!(storage.path().ends_with("editor-saved-state.json"));
    assert!(!storage.path().with_extension("json.tmp").exists());

    let loaded = block_on(storage.load());
    assert!(loaded.is_success());
    assert_eq!(loaded.payload.as_deref(), Some(r#"{"version":1,"leaves":["hi"]}"#));
}

#[test]
fn save_overwrites_previous_state() {
    let dir = tempdir().unwrap();
    let storage = LocalStorage::new(dir.path(), "key");

    block_on(storage.save("first".to_string()));
    block_on(storage.save("second".to_string()));
    assert_eq!(block_on(storage.load()).payload.as_deref(), Some("second"));
}

#[test]
fn invalid_utf8_is_an_error() {
    let dir = tempdir().unwrap();
    let storage = LocalStorage::new(dir.path(), "key");
    std::fs::write(storage.path(), [0xff, 0xfe, 0x00]).unwrap();

    let outcome = block_on(storage.load());
    assert_eq!(outcome.status, LoadStatus::Error);
    assert!(outcome.message.starts_with("Failed to load from local storage"));
}

#[test]
fn unwritable_location_reports_error() {
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "file, not a directory").unwrap();
    let storage = LocalStorage::new(&blocker, "key");

    let outcome = block_on(storage.save("x".to_string()));
    assert!(!outcome.is_saved());
    assert!(outcome.message.starts_with("Failed to save to local storage"));
}
