//! 持久化调度
//!
//! - 启动时从主存储（失败则 fallback）装载一次
//! - 文档更新通知驱动脏标记；自动保存在窗口内第一次改动后 interval 触发，
//!   后续改动不推迟截止时间
//! - 存储调用在 executor 上异步执行，完成消息经 channel 交给 `apply_message`

use crate::kernel::services::ports::{
    AsyncExecutor, AutosaveConfig, DocumentState, DocumentUpdate, StorageBackend, UpdateTags,
    TAG_HISTORY_MERGE, TAG_LOADED_CONTENT,
};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::time::{Duration, Instant};

pub const MSG_NOTHING_TO_SAVE: &str = "No changes that needs saving";
pub const MSG_UNSAVED: &str = "You have unsaved changes";
pub const MSG_SAVING: &str = "Saving...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveStatus {
    Saved,
    Unsaved,
    Saving,
    SavedToFallback,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveState {
    pub status: SaveStatus,
    pub message: String,
}

impl SaveState {
    fn new(status: SaveStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl Default for SaveState {
    fn default() -> Self {
        Self::new(SaveStatus::Saved, MSG_NOTHING_TO_SAVE)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceMessage {
    SaveCompleted {
        save_id: u64,
        status: SaveStatus,
        message: String,
    },
    Loaded {
        payload: Option<String>,
        message: String,
    },
}

#[derive(Debug, Clone, Copy)]
struct ActiveSave {
    id: u64,
    generation: u64,
}

pub struct PersistenceScheduler {
    primary: Arc<dyn StorageBackend>,
    fallback: Option<Arc<dyn StorageBackend>>,
    executor: Arc<dyn AsyncExecutor>,
    tx: Sender<PersistenceMessage>,
    autosave_enabled: bool,
    interval: Duration,
    has_unsaved_changes: bool,
    state: SaveState,
    pending_save_deadline: Option<Instant>,
    window_started_at: Option<Instant>,
    edit_generation: u64,
    next_save_id: u64,
    active_save: Option<ActiveSave>,
    load_requested: bool,
    torn_down: bool,
}

impl PersistenceScheduler {
    pub fn new(
        primary: Arc<dyn StorageBackend>,
        executor: Arc<dyn AsyncExecutor>,
        tx: Sender<PersistenceMessage>,
        config: &AutosaveConfig,
    ) -> Self {
        Self {
            primary,
            fallback: None,
            executor,
            tx,
            autosave_enabled: config.enabled,
            interval: config.interval(),
            has_unsaved_changes: false,
            state: SaveState::default(),
            pending_save_deadline: None,
            window_started_at: None,
            edit_generation: 0,
            next_save_id: 0,
            active_save: None,
            load_requested: false,
            torn_down: false,
        }
    }

    pub fn with_fallback(mut self, fallback: Arc<dyn StorageBackend>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn status(&self) -> SaveStatus {
        self.state.status
    }

    pub fn state(&self) -> &SaveState {
        &self.state
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.has_unsaved_changes
    }

    pub fn autosave_enabled(&self) -> bool {
        self.autosave_enabled
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// 下一次自动保存的截止时间，宿主事件循环据此安排 tick
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending_save_deadline
    }

    /// 启动时调用一次；重复调用被忽略
    pub fn begin_load(&mut self) -> bool {
        if self.load_requested || self.torn_down {
            return false;
        }
        self.load_requested = true;

        let primary = Arc::clone(&self.primary);
        let fallback = self.fallback.clone();
        let tx = self.tx.clone();
        self.executor.spawn(Box::pin(async move {
            let mut outcome = primary.load().await;
            if !outcome.is_success() {
                if let Some(fallback) = fallback {
                    tracing::info!(
                        backend = primary.name(),
                        status = ?outcome.status,
                        message = %outcome.message,
                        "primary load unsuccessful, trying fallback"
                    );
                    outcome = fallback.load().await;
                }
            }
            let _ = tx.send(PersistenceMessage::Loaded {
                payload: outcome.payload,
                message: outcome.message,
            });
        }));
        true
    }

    /// 处理一次文档更新通知，返回是否计为有效改动
    pub fn on_document_update(&mut self, update: &DocumentUpdate, now: Instant) -> bool {
        if self.torn_down || !is_qualifying_change(update) {
            return false;
        }

        self.has_unsaved_changes = true;
        self.edit_generation += 1;
        // 保存中的状态由完成消息决定
        if self.state.status != SaveStatus::Saving {
            self.state = SaveState::new(SaveStatus::Unsaved, MSG_UNSAVED);
        }
        if self.autosave_enabled {
            self.schedule_save(now);
        }
        true
    }

    fn schedule_save(&mut self, now: Instant) {
        // 已有待触发的保存时合并，不重置截止时间
        if self.pending_save_deadline.is_some() {
            return;
        }
        self.window_started_at = Some(now);
        self.pending_save_deadline = Some(now + self.interval);
        tracing::trace!(interval_ms = self.interval.as_millis() as u64, "autosave scheduled");
    }

    fn cancel_pending_save(&mut self) {
        if self.pending_save_deadline.take().is_some() {
            tracing::debug!("pending autosave cancelled");
        }
        self.window_started_at = None;
    }

    /// 截止时间已到则触发保存，返回是否触发
    pub fn poll_autosave<D: DocumentState>(&mut self, doc: &D, now: Instant) -> bool {
        let Some(deadline) = self.pending_save_deadline else {
            return false;
        };
        if now < deadline {
            return false;
        }
        self.cancel_pending_save();
        if !self.autosave_enabled {
            return false;
        }
        self.save(doc);
        true
    }

    /// 手动保存，不受自动保存开关影响
    pub fn save<D: DocumentState>(&mut self, doc: &D) {
        let payload = doc.serialize_state();
        self.save_payload(payload);
    }

    pub fn save_payload(&mut self, payload: String) {
        if self.torn_down {
            return;
        }

        let save_id = self.next_save_id;
        self.next_save_id += 1;
        self.active_save = Some(ActiveSave {
            id: save_id,
            generation: self.edit_generation,
        });
        self.state = SaveState::new(SaveStatus::Saving, MSG_SAVING);

        let primary = Arc::clone(&self.primary);
        let fallback = self.fallback.clone();
        let tx = self.tx.clone();
        self.executor.spawn(Box::pin(async move {
            let fallback_payload = fallback.as_ref().map(|_| payload.clone());
            let result = primary.save(payload).await;

            let (status, message) = match (result.is_saved(), fallback, fallback_payload) {
                (true, _, _) => (SaveStatus::Saved, result.message),
                (false, Some(fallback), Some(payload)) => {
                    tracing::warn!(
                        backend = primary.name(),
                        message = %result.message,
                        "primary save failed, trying fallback"
                    );
                    let fallback_result = fallback.save(payload).await;
                    let status = if fallback_result.is_saved() {
                        SaveStatus::SavedToFallback
                    } else {
                        SaveStatus::Error
                    };
                    (status, format!("{} {}", result.message, fallback_result.message))
                }
                (false, _, _) => (SaveStatus::Error, result.message),
            };

            let _ = tx.send(PersistenceMessage::SaveCompleted {
                save_id,
                status,
                message,
            });
        }));
    }

    pub fn set_autosave_enabled<D: DocumentState>(&mut self, enabled: bool, doc: &D) -> bool {
        if self.autosave_enabled == enabled {
            return false;
        }
        self.autosave_enabled = enabled;
        if !enabled {
            self.cancel_pending_save();
        } else if self.has_unsaved_changes {
            self.save(doc);
        }
        true
    }

    /// 修改间隔；已排队的保存按窗口起点重新计算截止时间
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
        if let (Some(_), Some(started)) = (self.pending_save_deadline, self.window_started_at) {
            self.pending_save_deadline = Some(started + interval);
        }
    }

    /// 应用异步任务的完成消息，返回状态或文档是否变化
    pub fn apply_message<D: DocumentState>(&mut self, msg: PersistenceMessage, doc: &mut D) -> bool {
        if self.torn_down {
            return false;
        }

        match msg {
            PersistenceMessage::SaveCompleted {
                save_id,
                status,
                message,
            } => {
                let Some(active) = self.active_save else {
                    return false;
                };
                if active.id != save_id {
                    tracing::debug!(save_id, active = active.id, "stale save completion ignored");
                    return false;
                }
                self.active_save = None;

                if status == SaveStatus::Error {
                    tracing::warn!(message = %message, "save failed");
                } else if active.generation != self.edit_generation {
                    // 保存期间又有改动：已写入的是旧内容
                    tracing::debug!(
                        status = ?status,
                        message = %message,
                        "document changed while saving, keeping dirty flag"
                    );
                    self.state = SaveState::new(SaveStatus::Unsaved, MSG_UNSAVED);
                    return true;
                } else {
                    self.has_unsaved_changes = false;
                }
                self.state = SaveState::new(status, message);
                true
            }
            PersistenceMessage::Loaded { payload, message } => {
                let Some(payload) = payload else {
                    tracing::info!(message = %message, "no saved document state");
                    return false;
                };
                let result = doc.mutate(UpdateTags::loaded_content(), |doc| {
                    doc.install_state(&payload)
                });
                match result {
                    Ok(()) => {
                        tracing::info!(bytes = payload.len(), message = %message, "document state loaded");
                        true
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "saved document state rejected");
                        self.state = SaveState::new(
                            SaveStatus::Error,
                            format!("Failed to load saved content: {}", e),
                        );
                        true
                    }
                }
            }
        }
    }

    /// 卸载时调用：取消待触发的保存，之后到达的完成消息全部忽略
    pub fn teardown(&mut self) {
        self.cancel_pending_save();
        self.torn_down = true;
    }
}

impl Drop for PersistenceScheduler {
    fn drop(&mut self) {
        if self.has_unsaved_changes && !self.torn_down {
            tracing::warn!("persistence scheduler dropped with unsaved changes");
        }
    }
}

fn is_qualifying_change(update: &DocumentUpdate) -> bool {
    update.has_changes()
        && !update.previous_state_was_empty
        && !update.tags.contains(TAG_HISTORY_MERGE)
        && !update.tags.contains(TAG_LOADED_CONTENT)
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/persistence.rs"]
mod tests;
