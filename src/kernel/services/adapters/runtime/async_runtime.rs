use crate::kernel::services::ports::{AsyncExecutor, BoxFuture};
use std::io;

/// tokio 上的 AsyncExecutor；可自带 runtime，也可借用宿主的 handle
pub struct TokioExecutor {
    runtime: Option<tokio::runtime::Runtime>,
    handle: tokio::runtime::Handle,
}

impl TokioExecutor {
    pub fn new() -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("zdoc-storage")
            .enable_all()
            .build()
            .or_else(|e| {
                tracing::error!(
                    error = %e,
                    "Failed to create multi-thread tokio runtime, falling back to current-thread"
                );
                tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
            })?;
        let handle = runtime.handle().clone();
        Ok(Self {
            runtime: Some(runtime),
            handle,
        })
    }

    pub fn from_handle(handle: tokio::runtime::Handle) -> Self {
        Self {
            runtime: None,
            handle,
        }
    }

    pub fn tokio_handle(&self) -> tokio::runtime::Handle {
        self.handle.clone()
    }

    pub fn owns_runtime(&self) -> bool {
        self.runtime.is_some()
    }
}

impl AsyncExecutor for TokioExecutor {
    fn spawn(&self, task: BoxFuture) {
        self.handle.spawn(task);
    }
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/runtime/async_runtime.rs"]
mod tests;
