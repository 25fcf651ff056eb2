//! Post-completion review comments.

use super::{CommentId, Task, TaskId, ValidationError};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Retrospective note attached to a completed task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewComment {
    id: CommentId,
    task_id: TaskId,
    content: String,
    created_at: DateTime<Utc>,
}

impl ReviewComment {
    /// Creates a comment on `task`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::ReviewRequiresCompletion`] unless the task
    /// is completed, or [`ValidationError::EmptyComment`] when the content is
    /// blank.
    pub fn new(
        task: &Task,
        content: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, ValidationError> {
        if !task.is_completed() {
            return Err(ValidationError::ReviewRequiresCompletion(task.id()));
        }
        let raw = content.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyComment);
        }
        Ok(Self {
            id: CommentId::new(),
            task_id: task.id(),
            content: trimmed.to_owned(),
            created_at: clock.utc(),
        })
    }

    /// Returns the comment identifier.
    #[must_use]
    pub const fn id(&self) -> CommentId {
        self.id
    }

    /// Returns the reviewed task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the trimmed comment text.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
