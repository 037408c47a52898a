use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_STORAGE_KEY: &str = "editor-saved-state";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    #[serde(default)]
    pub autosave: AutosaveConfig,
    #[serde(default = "default_storage_key", alias = "storage_key")]
    pub storage_key: String,
    #[serde(default)]
    pub search: SearchDefaults,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            autosave: AutosaveConfig::default(),
            storage_key: default_storage_key(),
            search: SearchDefaults::default(),
        }
    }
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AutosaveConfig {
    #[serde(default = "default_autosave_enabled")]
    pub enabled: bool,
    /// 首次改动到自动保存的延迟（秒）
    #[serde(default = "default_interval_secs", alias = "interval_secs")]
    pub interval_secs: u64,
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self {
            enabled: default_autosave_enabled(),
            interval_secs: default_interval_secs(),
        }
    }
}

impl AutosaveConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

fn default_autosave_enabled() -> bool {
    true
}

fn default_interval_secs() -> u64 {
    3
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SearchDefaults {
    #[serde(default, alias = "case_sensitive")]
    pub case_sensitive: bool,
    #[serde(default, alias = "whole_word")]
    pub whole_word: bool,
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/ports/config.rs"]
mod tests;
