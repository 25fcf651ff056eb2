//! In-memory task repository standing in for the system of record.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::task::{
    domain::{ProgressHistoryEntry, ReviewComment, Task, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
    history: HashMap<TaskId, Vec<ProgressHistoryEntry>>,
    comments: HashMap<TaskId, Vec<ReviewComment>>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> TaskRepositoryResult<RwLockReadGuard<'_, InMemoryTaskState>> {
        self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> TaskRepositoryResult<RwLockWriteGuard<'_, InMemoryTaskState>> {
        self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

/// Returns the records of `task_id` from a per-task index, newest first.
fn newest_first<T: Clone>(
    index: &HashMap<TaskId, Vec<T>>,
    task_id: TaskId,
    timestamp: impl Fn(&T) -> chrono::DateTime<chrono::Utc>,
) -> Vec<T> {
    let mut records = index.get(&task_id).cloned().unwrap_or_default();
    // Later insertions win ties on equal timestamps.
    records.reverse();
    records.sort_by_key(|record| std::cmp::Reverse(timestamp(record)));
    records
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        let slot = state
            .tasks
            .get_mut(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;
        *slot = task.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.read()?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn list_all(&self) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read()?;
        Ok(state.tasks.values().cloned().collect())
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        if state.tasks.remove(&id).is_none() {
            return Err(TaskRepositoryError::NotFound(id));
        }
        state.history.remove(&id);
        state.comments.remove(&id);
        Ok(())
    }

    async fn count_active_by_type(&self, task_type: &str) -> TaskRepositoryResult<usize> {
        let state = self.read()?;
        let count = state
            .tasks
            .values()
            .filter(|task| task.task_type() == task_type)
            .filter(|task| task.status().known().is_some_and(|status| status.is_active()))
            .count();
        Ok(count)
    }

    async fn append_history(&self, entry: &ProgressHistoryEntry) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        if !state.tasks.contains_key(&entry.task_id()) {
            return Err(TaskRepositoryError::NotFound(entry.task_id()));
        }
        state
            .history
            .entry(entry.task_id())
            .or_default()
            .push(entry.clone());
        Ok(())
    }

    async fn history_for(&self, id: TaskId) -> TaskRepositoryResult<Vec<ProgressHistoryEntry>> {
        let state = self.read()?;
        Ok(newest_first(&state.history, id, ProgressHistoryEntry::recorded_at))
    }

    async fn add_comment(&self, comment: &ReviewComment) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        if !state.tasks.contains_key(&comment.task_id()) {
            return Err(TaskRepositoryError::NotFound(comment.task_id()));
        }
        state
            .comments
            .entry(comment.task_id())
            .or_default()
            .push(comment.clone());
        Ok(())
    }

    async fn comments_for(&self, id: TaskId) -> TaskRepositoryResult<Vec<ReviewComment>> {
        let state = self.read()?;
        Ok(newest_first(&state.comments, id, ReviewComment::created_at))
    }
}
