use crate::kernel::services::ports::storage::{
    LoadOutcome, Result as StorageResult, SaveOutcome, StorageBackend, StorageError,
    StorageFuture,
};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// 进程内存储。quota 模拟浏览器存储配额，disabled 模拟存储被禁用
#[derive(Default)]
pub struct MemoryStorage {
    slot: Mutex<Option<String>>,
    quota: Option<usize>,
    disabled: AtomicBool,
    saves: AtomicUsize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota: usize) -> Self {
        Self {
            quota: Some(quota),
            ..Self::default()
        }
    }

    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(payload.into())),
            ..Self::default()
        }
    }

    pub fn set_disabled(&self, disabled: bool) {
        self.disabled.store(disabled, Ordering::Relaxed);
    }

    /// 调用 save 的次数（含失败）
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::Relaxed)
    }

    pub fn stored(&self) -> Option<String> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }

    fn store(&self, state: String) -> StorageResult<()> {
        if self.disabled.load(Ordering::Relaxed) {
            return Err(StorageError::Disabled);
        }
        if let Some(quota) = self.quota {
            if state.len() > quota {
                return Err(StorageError::QuotaExceeded {
                    needed: state.len(),
                    quota,
                });
            }
        }
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| StorageError::Corrupt("storage lock poisoned".to_string()))?;
        *slot = Some(state);
        Ok(())
    }

    fn fetch(&self) -> StorageResult<Option<String>> {
        if self.disabled.load(Ordering::Relaxed) {
            return Err(StorageError::Disabled);
        }
        self.slot
            .lock()
            .map(|slot| slot.clone())
            .map_err(|_| StorageError::Corrupt("storage lock poisoned".to_string()))
    }
}

impl StorageBackend for MemoryStorage {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn save(&self, state: String) -> StorageFuture<'_, SaveOutcome> {
        self.saves.fetch_add(1, Ordering::Relaxed);
        let result = self.store(state);
        Box::pin(async move {
            match result {
                Ok(()) => SaveOutcome::saved("Saved to memory storage"),
                Err(e) => {
                    tracing::warn!(error = %e, "memory save failed");
                    SaveOutcome::error(format!("Failed to save to memory storage: {}", e))
                }
            }
        })
    }

    fn load(&self) -> StorageFuture<'_, LoadOutcome> {
        let result = self.fetch();
        Box::pin(async move {
            match result {
                Ok(Some(payload)) => LoadOutcome::success("Loaded from memory storage", payload),
                Ok(None) => LoadOutcome::not_found("Editor state not found in memory storage"),
                Err(e) => LoadOutcome::error(format!("Failed to load from memory storage: {}", e)),
            }
        })
    }
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/storage/memory.rs"]
mod tests;
