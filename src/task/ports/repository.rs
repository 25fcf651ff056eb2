//! Repository port for task persistence, history, and review comments.

use crate::task::domain::{ProgressHistoryEntry, ReviewComment, Task, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID already
    /// exists.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Persists changes to an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns every stored task in no particular order.
    async fn list_all(&self) -> TaskRepositoryResult<Vec<Task>>;

    /// Removes a task together with its history and review comments.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()>;

    /// Counts pending or in-progress tasks of the given task type.
    async fn count_active_by_type(&self, task_type: &str) -> TaskRepositoryResult<usize>;

    /// Appends a progress history entry.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the owning task does not
    /// exist.
    async fn append_history(&self, entry: &ProgressHistoryEntry) -> TaskRepositoryResult<()>;

    /// Returns the history of a task, newest first.
    async fn history_for(&self, id: TaskId) -> TaskRepositoryResult<Vec<ProgressHistoryEntry>>;

    /// Stores a review comment.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the owning task does not
    /// exist.
    async fn add_comment(&self, comment: &ReviewComment) -> TaskRepositoryResult<()>;

    /// Returns the review comments of a task, newest first.
    async fn comments_for(&self, id: TaskId) -> TaskRepositoryResult<Vec<ReviewComment>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
