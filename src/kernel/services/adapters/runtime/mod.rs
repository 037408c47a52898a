//! Async runtime adapter: runs storage futures and lets completions flow back over channels.

mod async_runtime;

pub use async_runtime::TokioExecutor;
