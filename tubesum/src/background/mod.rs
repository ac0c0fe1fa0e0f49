pub mod data_loader;

use std::collections::HashMap;
use std::future::Future;
use tokio::task::JoinHandle;

/// Kind of background work; at most one task of each kind runs at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    Session,
    Videos,
    User,
    Comments,
    Summary,
}

/// Manages background tasks for data loading
/// Tracks running tasks and provides cancellation support
pub struct BackgroundTaskManager {
    tasks: HashMap<TaskKind, JoinHandle<()>>,
}

impl BackgroundTaskManager {
    pub fn new() -> Self {
        Self {
            tasks: HashMap::new(),
        }
    }

    /// Spawn a background task
    /// If a task of the same kind is still running it is abandoned first
    pub fn spawn_task<F>(&mut self, kind: TaskKind, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if let Some(handle) = self.tasks.remove(&kind) {
            if !handle.is_finished() {
                tracing::debug!(?kind, "Abandoning in-flight task");
            }
            handle.abort();
        }

        let handle = tokio::spawn(future);
        self.tasks.insert(kind, handle);
    }

    pub fn is_idle(&self) -> bool {
        self.tasks.values().all(|handle| handle.is_finished())
    }

    /// Wait for every tracked task to finish
    pub async fn wait_idle(&mut self) {
        for (kind, handle) in self.tasks.drain() {
            if let Err(e) = handle.await {
                if !e.is_cancelled() {
                    tracing::error!(?kind, error = %e, "Background task failed");
                }
            }
        }
    }

    /// Cancel all running tasks (used on shutdown)
    pub fn cancel_all(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }
}

impl Default for BackgroundTaskManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for BackgroundTaskManager {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
