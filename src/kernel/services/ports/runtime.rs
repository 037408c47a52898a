use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

pub type BoxFuture = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// 存储任务在这里执行，结果经 channel 回到宿主线程
pub trait AsyncExecutor: Send + Sync {
    fn spawn(&self, task: BoxFuture);
}

impl<E: AsyncExecutor + ?Sized> AsyncExecutor for Arc<E> {
    fn spawn(&self, task: BoxFuture) {
        (**self).spawn(task)
    }
}
