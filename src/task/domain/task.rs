//! Task aggregate root and the value types it is built from.

use super::{Priority, ReportedStatus, TaskId, TaskStatus, ValidationError};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Validated descriptive fields of a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDetails {
    title: String,
    description: String,
    task_type: String,
}

impl TaskDetails {
    /// Creates task details from a title and task type.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyTitle`] or
    /// [`ValidationError::EmptyTaskType`] when either value is blank.
    pub fn new(
        title: impl Into<String>,
        task_type: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let title_raw = title.into();
        let task_type_raw = task_type.into();
        let trimmed_title = title_raw.trim();
        if trimmed_title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        let trimmed_type = task_type_raw.trim();
        if trimmed_type.is_empty() {
            return Err(ValidationError::EmptyTaskType);
        }
        Ok(Self {
            title: trimmed_title.to_owned(),
            description: String::new(),
            task_type: trimmed_type.to_owned(),
        })
    }

    /// Sets the free-text description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Returns the task type.
    #[must_use]
    pub fn task_type(&self) -> &str {
        &self.task_type
    }
}

/// Calendar span of a task. Dates carry no time-of-day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSchedule {
    start_date: NaiveDate,
    deadline: Option<NaiveDate>,
}

impl TaskSchedule {
    /// Creates a schedule.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::DeadlineBeforeStart`] when the deadline
    /// precedes the start date.
    pub fn new(start_date: NaiveDate, deadline: Option<NaiveDate>) -> Result<Self, ValidationError> {
        if let Some(end) = deadline
            && end < start_date
        {
            return Err(ValidationError::DeadlineBeforeStart {
                start: start_date,
                deadline: end,
            });
        }
        Ok(Self {
            start_date,
            deadline,
        })
    }

    /// Returns the start date.
    #[must_use]
    pub const fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<NaiveDate> {
        self.deadline
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    details: TaskDetails,
    schedule: TaskSchedule,
    priority: Priority,
    status: ReportedStatus,
    progress: Option<String>,
    is_overdue: bool,
    completed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted descriptive fields.
    pub details: TaskDetails,
    /// Persisted schedule.
    pub schedule: TaskSchedule,
    /// Persisted priority.
    pub priority: Priority,
    /// Status as reported by the system of record.
    pub status: ReportedStatus,
    /// Persisted progress step, if any.
    pub progress: Option<String>,
    /// Overdue flag computed by the system of record.
    pub is_overdue: bool,
    /// Completion timestamp, if any.
    pub completed_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task with the given initial status.
    ///
    /// A task created as completed is stamped with the creation time as its
    /// completion time.
    #[must_use]
    pub fn new(
        details: TaskDetails,
        schedule: TaskSchedule,
        priority: Priority,
        status: TaskStatus,
        progress: Option<String>,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            details,
            schedule,
            priority,
            status: ReportedStatus::Known(status),
            progress,
            is_overdue: false,
            completed_at: (status == TaskStatus::Completed).then_some(timestamp),
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            details: data.details,
            schedule: data.schedule,
            priority: data.priority,
            status: data.status,
            progress: data.progress,
            is_overdue: data.is_overdue,
            completed_at: data.completed_at,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.details.title
    }

    /// Returns the task description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.details.description
    }

    /// Returns the task type selecting the governing workflow.
    #[must_use]
    pub fn task_type(&self) -> &str {
        &self.details.task_type
    }

    /// Returns the start date.
    #[must_use]
    pub const fn start_date(&self) -> NaiveDate {
        self.schedule.start_date
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<NaiveDate> {
        self.schedule.deadline
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the status as last reported.
    #[must_use]
    pub const fn status(&self) -> &ReportedStatus {
        &self.status
    }

    /// Returns the current workflow step, if any.
    #[must_use]
    pub fn progress(&self) -> Option<&str> {
        self.progress.as_deref()
    }

    /// Returns the overdue flag as last computed by the system of record.
    #[must_use]
    pub const fn is_overdue(&self) -> bool {
        self.is_overdue
    }

    /// Returns the completion timestamp, if any.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns whether the task is completed.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status.is(TaskStatus::Completed)
    }

    /// Returns whether the deadline has passed on `today` while the task is
    /// still open.
    #[must_use]
    pub fn is_overdue_on(&self, today: NaiveDate) -> bool {
        self.schedule
            .deadline
            .is_some_and(|deadline| deadline < today && !self.is_completed())
    }

    /// Recomputes the overdue flag for `today`.
    pub fn refresh_overdue(&mut self, today: NaiveDate) {
        self.is_overdue = self.is_overdue_on(today);
    }

    /// Moves the task to `status`.
    ///
    /// Entering [`TaskStatus::Completed`] stamps the completion time; leaving
    /// it clears the stamp. Re-applying the current status is a no-op apart
    /// from the timestamp.
    pub fn set_status(&mut self, status: TaskStatus, clock: &impl Clock) {
        let was_completed = self.is_completed();
        let timestamp = clock.utc();
        match (was_completed, status == TaskStatus::Completed) {
            (false, true) => self.completed_at = Some(timestamp),
            (true, false) => self.completed_at = None,
            _ => {}
        }
        self.status = ReportedStatus::Known(status);
        self.updated_at = timestamp;
    }

    /// Replaces the progress step.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::ProgressLocked`] when the task is
    /// completed.
    pub fn set_progress(
        &mut self,
        progress: Option<String>,
        clock: &impl Clock,
    ) -> Result<(), ValidationError> {
        if self.is_completed() {
            return Err(ValidationError::ProgressLocked(self.id));
        }
        self.progress = progress;
        self.touch(clock);
        Ok(())
    }

    /// Replaces the priority.
    pub fn set_priority(&mut self, priority: Priority, clock: &impl Clock) {
        self.priority = priority;
        self.touch(clock);
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
