use super::*;
use std::sync::mpsc;
use std::time::Duration;

#[test]
fn owned_runtime_runs_spawned_tasks() {
    let executor = TokioExecutor::new().unwrap();
    assert!(executor.owns_runtime());

    let (tx, rx) = mpsc::channel();
    executor.spawn(Box::pin(async move {
        tokio::task::yield_now().await;
        let _ = tx.send(42);
    }));

    assert_eq!(rx.recv_timeout(Duration::from_secs(5)).unwrap(), 42);
}

#[test]
fn borrowed_handle_runs_spawned_tasks() {
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .build()
        .unwrap();
    let executor = TokioExecutor::from_handle(rt.handle().clone());
    assert!(!executor.owns_runtime());

    let (tx, rx) = mpsc::channel();
    executor.spawn(Box::pin(async move {
        let _ = tx.send("done");
    }));

    assert_eq!(rx.recv_timeout(Duration::from_secs(5)).unwrap(), "done");
}

#[test]
fn executor_usable_behind_arc() {
    let executor: std::sync::Arc<dyn AsyncExecutor> = std::sync::Arc::new(TokioExecutor::new().unwrap());
    let (tx, rx) = mpsc::channel();
    executor.spawn(Box::pin(async move {
        let _ = tx.send(());
    }));
    assert!(rx.recv_timeout(Duration::from_secs(5)).is_ok());
}
