//! File-backed task loader.
//!
//! Every regular file in the task directory holds one JSON task record.
//! Files are read concurrently and re-parsed on each load; nothing is ever
//! written back.

use std::path::PathBuf;

use futures::future::join_all;
use thiserror::Error;
use tokio::fs;

use crate::task::{Task, TaskRecord};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read task directory {}: {source}", .path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read task file {}: {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse task file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Outcome of loading a task directory.
///
/// A bad file only costs its own task; `failures` lists what was skipped.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub tasks: Vec<Task>,
    pub failures: Vec<StoreError>,
}

/// Directory of task files.
#[derive(Debug, Clone)]
pub struct TaskFiles {
    dir: PathBuf,
}

impl TaskFiles {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Read and parse every file in the directory.
    ///
    /// Tasks come back in file-name order. Only a failure to list the
    /// directory itself is returned as an error.
    pub async fn load(&self) -> Result<LoadReport, StoreError> {
        let paths = self.list_files().await?;
        let results = join_all(paths.into_iter().map(load_file)).await;

        let mut report = LoadReport::default();
        for result in results {
            match result {
                Ok(task) => report.tasks.push(task),
                Err(e) => report.failures.push(e),
            }
        }
        Ok(report)
    }

    /// Like [`load`](Self::load), but logs every failure and degrades to
    /// whatever could be read, down to an empty list.
    pub async fn load_or_empty(&self) -> Vec<Task> {
        match self.load().await {
            Ok(report) => {
                for failure in &report.failures {
                    tracing::warn!("Skipping task file: {}", failure);
                }
                report.tasks
            }
            Err(e) => {
                tracing::warn!("{}; showing in-memory tasks only", e);
                Vec::new()
            }
        }
    }

    async fn list_files(&self) -> Result<Vec<PathBuf>, StoreError> {
        let read_dir_error = |source| StoreError::ReadDir {
            path: self.dir.clone(),
            source,
        };

        let mut entries = fs::read_dir(&self.dir).await.map_err(read_dir_error)?;
        let mut paths = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(read_dir_error)? {
            let path = entry.path();
            // Follows symlinks; unreadable entries are left out of the listing
            let is_file = fs::metadata(&path)
                .await
                .map(|m| m.is_file())
                .unwrap_or(false);
            if is_file {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }
}

async fn load_file(path: PathBuf) -> Result<Task, StoreError> {
    let content = match fs::read_to_string(&path).await {
        Ok(content) => content,
        Err(source) => return Err(StoreError::ReadFile { path, source }),
    };
    serde_json::from_str::<TaskRecord>(&content)
        .map(Task::from)
        .map_err(|source| StoreError::Parse { path, source })
}
