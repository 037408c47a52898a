use super::super::paths::{ensure_storage_dir, storage_file_path};
use crate::kernel::services::ports::storage::{
    LoadOutcome, Result as StorageResult, SaveOutcome, StorageBackend, StorageError,
    StorageFuture,
};
use std::io;
use std::path::{Path, PathBuf};

/// 本地文件存储：固定 key 对应 `<dir>/<key>.json`
pub struct LocalStorage {
    path: PathBuf,
}

impl LocalStorage {
    pub fn new(dir: &Path, key: &str) -> Self {
        Self {
            path: storage_file_path(dir, key),
        }
    }

    /// 使用应用数据目录
    pub fn in_app_data(key: &str) -> io::Result<Self> {
        let dir = ensure_storage_dir()?;
        Ok(Self::new(&dir, key))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn write(&self, state: &str) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        // 先写临时文件再 rename，避免留下半截内容
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, state.as_bytes()).await?;
        if let Err(e) = tokio::fs::rename(&tmp, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        Ok(())
    }

    async fn read(&self) -> StorageResult<Option<String>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => String::from_utf8(bytes)
                .map(Some)
                .map_err(|e| StorageError::Corrupt(e.to_string())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

impl StorageBackend for LocalStorage {
    fn name(&self) -> &'static str {
        "local"
    }

    fn save(&self, state: String) -> StorageFuture<'_, SaveOutcome> {
        Box::pin(async move {
            match self.write(&state).await {
                Ok(()) => {
                    tracing::debug!(path = %self.path.display(), bytes = state.len(), "state saved");
                    SaveOutcome::saved("Saved to local storage")
                }
                Err(e) => {
                    tracing::warn!(path = %self.path.display(), error = %e, "local save failed");
                    SaveOutcome::error(format!(
                        "Failed to save to local storage ({}). Check that the storage directory is writable.",
                        e
                    ))
                }
            }
        })
    }

    fn load(&self) -> StorageFuture<'_, LoadOutcome> {
        Box::pin(async move {
            match self.read().await {
                Ok(Some(payload)) => LoadOutcome::success("Loaded from local storage", payload),
                Ok(None) => LoadOutcome::not_found("Editor state not found in local storage"),
                Err(e) => {
                    tracing::warn!(path = %self.path.display(), error = %e, "local load failed");
                    LoadOutcome::error(format!("Failed to load from local storage: {}", e))
                }
            }
        })
    }
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/storage/local.rs"]
mod tests;
