use super::*;

#[test]
fn test_default_config() {
    let config = EditorConfig::default();
    assert!(config.autosave.enabled);
    assert_eq!(config.autosave.interval_secs, 3);
    assert_eq!(config.autosave.interval(), Duration::from_secs(3));
    assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
    assert!(!config.search.case_sensitive);
    assert!(!config.search.whole_word);
}

#[test]
fn test_empty_object_uses_defaults() {
    let config: EditorConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, EditorConfig::default());
}

#[test]
fn test_camel_case_and_snake_case_aliases() {
    let camel = r#"{
      "autosave": { "enabled": false, "intervalSecs": 10 },
      "storageKey": "draft",
      "search": { "caseSensitive": true, "wholeWord": true }
    }"#;
    let snake = r#"{
      "autosave": { "enabled": false, "interval_secs": 10 },
      "storage_key": "draft",
      "search": { "case_sensitive": true, "whole_word": true }
    }"#;

    let a: EditorConfig = serde_json::from_str(camel).unwrap();
    let b: EditorConfig = serde_json::from_str(snake).unwrap();
    assert_eq!(a, b);
    assert!(!a.autosave.enabled);
    assert_eq!(a.autosave.interval_secs, 10);
    assert_eq!(a.storage_key, "draft");
    assert!(a.search.case_sensitive);
    assert!(a.search.whole_word);
}

#[test]
fn test_serialize_uses_camel_case() {
    let json = serde_json::to_string(&EditorConfig::default()).unwrap();
    assert!(json.contains("\"storageKey\""));
    assert!(json.contains("\"intervalSecs\""));
}
