//! 存储后端实现
//!
//! - LocalStorage: 本地文件，一个 key 对应一个文件
//! - MemoryStorage: 进程内存储，可设置配额或禁用

mod local;
mod memory;

pub use local::LocalStorage;
pub use memory::MemoryStorage;
