//! Service adapters: OS/runtime specific implementations (IO/async).

pub mod document;
pub mod paths;
pub mod runtime;
pub mod settings;
pub mod storage;

pub use document::{MemoryDocument, Selection};
pub use paths::{
    ensure_log_dir, ensure_storage_dir, get_app_data_dir, get_log_dir, get_settings_path,
    get_storage_dir, storage_file_path,
};
pub use runtime::TokioExecutor;
pub use settings::{
    ensure_settings_file, ensure_settings_file_at, load_settings, load_settings_from,
    SettingsError,
};
pub use storage::{LocalStorage, MemoryStorage};
