//! Service ports: traits + data contracts.

pub mod config;
pub mod document;
pub mod runtime;
pub mod search;
pub mod storage;

pub use config::{AutosaveConfig, EditorConfig, SearchDefaults, DEFAULT_STORAGE_KEY};
pub use document::{
    DocumentError, DocumentState, DocumentUpdate, Leaf, LeafId, LeafTextAccessor, UpdateTags,
    TAG_HISTORY_MERGE, TAG_LOADED_CONTENT,
};
pub use runtime::{AsyncExecutor, BoxFuture};
pub use search::{Match, SearchError, SearchOptions};
pub use storage::{
    LoadOutcome, LoadStatus, SaveOutcome, SaveOutcomeStatus, StorageBackend, StorageError,
    StorageFuture,
};
