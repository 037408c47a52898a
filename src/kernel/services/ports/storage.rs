//! 存储后端契约
//!
//! save/load 都是异步的，失败通过返回值表达而不是 Err，
//! 调度器据此决定是否走 fallback。

use std::future::Future;
use std::io;
use std::pin::Pin;

pub type StorageFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub type Result<T> = std::result::Result<T, StorageError>;

/// 后端内部错误，对外统一转换为 Error 状态 + 诊断信息
#[derive(Debug)]
pub enum StorageError {
    Io(io::Error),
    QuotaExceeded { needed: usize, quota: usize },
    Disabled,
    Corrupt(String),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Io(e) => write!(f, "IO error: {}", e),
            StorageError::QuotaExceeded { needed, quota } => {
                write!(f, "Quota exceeded: {} bytes needed, {} available", needed, quota)
            }
            StorageError::Disabled => write!(f, "Storage is disabled"),
            StorageError::Corrupt(msg) => write!(f, "Corrupt storage: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<io::Error> for StorageError {
    fn from(e: io::Error) -> Self {
        StorageError::Io(e)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcomeStatus {
    Saved,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    pub status: SaveOutcomeStatus,
    pub message: String,
}

impl SaveOutcome {
    pub fn saved(message: impl Into<String>) -> Self {
        Self {
            status: SaveOutcomeStatus::Saved,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: SaveOutcomeStatus::Error,
            message: message.into(),
        }
    }

    pub fn is_saved(&self) -> bool {
        self.status == SaveOutcomeStatus::Saved
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Success,
    Error,
    /// 还没有保存过任何内容，不算错误
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOutcome {
    pub status: LoadStatus,
    pub message: String,
    pub payload: Option<String>,
}

impl LoadOutcome {
    pub fn success(message: impl Into<String>, payload: String) -> Self {
        Self {
            status: LoadStatus::Success,
            message: message.into(),
            payload: Some(payload),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: LoadStatus::NotFound,
            message: message.into(),
            payload: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: LoadStatus::Error,
            message: message.into(),
            payload: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == LoadStatus::Success
    }
}

pub trait StorageBackend: Send + Sync {
    fn name(&self) -> &'static str;

    /// 保存序列化状态，任何失败都折叠为 SaveOutcomeStatus::Error
    fn save(&self, state: String) -> StorageFuture<'_, SaveOutcome>;

    fn load(&self) -> StorageFuture<'_, LoadOutcome>;
}
