use super::*;

#[test]
fn test_get_storage_dir() {
    let dir = get_storage_dir();
    assert!(dir.is_some());
    let dir = dir.unwrap();
    assert!(dir.to_string_lossy().contains(APP_NAME));
    assert!(dir.ends_with(STORAGE_DIR));
}

#[test]
fn test_get_log_dir() {
    let dir = get_log_dir().unwrap();
    assert!(dir.to_string_lossy().contains(APP_NAME));
    assert!(dir.ends_with(LOG_DIR));
}

#[test]
fn test_get_settings_path() {
    let path = get_settings_path().unwrap();
    assert!(path.ends_with(SETTINGS_FILE));
}

#[test]
fn test_storage_file_path_sanitizes_key() {
    let dir = Path::new("/tmp/zdoc-test");
    assert_eq!(
        storage_file_path(dir, "editor-saved-state"),
        dir.join("editor-saved-state.json")
    );
    assert_eq!(
        storage_file_path(dir, "../escape/me"),
        dir.join("___escape_me.json")
    );
}
