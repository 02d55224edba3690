//! In-memory task store.
//!
//! Holds tasks added through the form during the current run. Append-only:
//! entries are never edited or removed, and nothing survives a restart.

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::task::Task;

#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: RwLock<Vec<Task>>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a task; concurrent appends land in lock-acquisition order.
    pub async fn add(&self, task: Task) -> usize {
        let mut tasks = self.tasks.write().await;
        tasks.push(task);
        tasks.len()
    }

    /// Snapshot of all tasks in insertion order.
    pub async fn list(&self) -> Vec<Task> {
        self.tasks.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.tasks.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.tasks.read().await.is_empty()
    }
}

/// Shared task store wrapped in Arc for concurrent access.
pub type SharedTaskStore = Arc<TaskStore>;
