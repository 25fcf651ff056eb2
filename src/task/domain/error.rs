//! Error types for task validation and parsing.

use super::TaskId;
use chrono::NaiveDate;
use thiserror::Error;

/// Caller-recoverable validation failures raised by task lifecycle rules.
///
/// Catalog lookup misses are deliberately absent: an unknown task type or a
/// stale progress step degrades to a fallback percentage instead.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The requested status is not one of `pending`, `in_progress`,
    /// `completed`.
    #[error(transparent)]
    InvalidStatus(#[from] ParseTaskStatusError),

    /// The requested priority is not one of `high`, `medium`, `low`.
    #[error(transparent)]
    InvalidPriority(#[from] ParsePriorityError),

    /// The progress step is not part of the task type's workflow.
    #[error("step '{step}' is not part of the '{task_type}' workflow")]
    StepNotInWorkflow {
        /// Task type whose workflow was consulted.
        task_type: String,
        /// Rejected step name.
        step: String,
    },

    /// Progress can no longer change once a task is completed.
    #[error("task {0} is completed; its progress is read-only")]
    ProgressLocked(TaskId),

    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The task type is empty after trimming.
    #[error("task type must not be empty")]
    EmptyTaskType,

    /// The deadline falls before the start date.
    #[error("deadline {deadline} precedes start date {start}")]
    DeadlineBeforeStart {
        /// Requested start date.
        start: NaiveDate,
        /// Requested deadline.
        deadline: NaiveDate,
    },

    /// Review comments are accepted only for completed tasks.
    #[error("task {0} must be completed before it can be reviewed")]
    ReviewRequiresCompletion(TaskId),

    /// The review comment is empty after trimming.
    #[error("review comment must not be empty")]
    EmptyComment,
}

/// Error returned while parsing task statuses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing priorities.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown priority: {0}")]
pub struct ParsePriorityError(pub String);
