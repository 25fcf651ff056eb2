//! Service layer for task creation, status updates, and review.

use crate::config::TrackerConfig;
use crate::task::{
    domain::{
        FieldChange, Priority, ProgressHistoryEntry, ReportedStatus, ReviewComment, Task,
        TaskDetails, TaskId, TaskSchedule, TaskStatus, ValidationError,
    },
    lifecycle::{
        DisplayClassification, ProgressBand, StatusTransition, StepRequest, classify_for_display,
        infer_initial_status, local_today, progress_percentage, validate_progress_step,
        validate_status_transition,
    },
    ports::{TaskRepository, TaskRepositoryError, WorkflowCatalog},
};
use chrono::{FixedOffset, NaiveDate};
use mockable::Clock;
use std::cmp::Reverse;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    task_type: String,
    description: Option<String>,
    start_date: Option<NaiveDate>,
    deadline: Option<NaiveDate>,
    priority: Option<String>,
    status: Option<String>,
    progress: Option<String>,
}

impl CreateTaskRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(title: impl Into<String>, task_type: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            task_type: task_type.into(),
            description: None,
            start_date: None,
            deadline: None,
            priority: None,
            status: None,
            progress: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the start date. Defaults to today.
    #[must_use]
    pub const fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }

    /// Sets the deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: NaiveDate) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Sets the raw priority. Unrecognised values fall back to medium.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Sets an explicit initial status instead of inferring it from dates.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Sets the initial workflow step.
    #[must_use]
    pub fn with_progress(mut self, progress: impl Into<String>) -> Self {
        self.progress = Some(progress.into());
        self
    }
}

/// Request payload for changing status, progress, or priority of a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateStatusRequest {
    task_id: TaskId,
    status: Option<String>,
    progress: Option<Option<String>>,
    priority: Option<String>,
}

impl UpdateStatusRequest {
    /// Creates an empty update for a task.
    #[must_use]
    pub const fn new(task_id: TaskId) -> Self {
        Self {
            task_id,
            status: None,
            progress: None,
            priority: None,
        }
    }

    /// Requests a status change.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Requests a workflow step change.
    #[must_use]
    pub fn with_progress(mut self, progress: impl Into<String>) -> Self {
        self.progress = Some(Some(progress.into()));
        self
    }

    /// Requests that the workflow step be cleared.
    #[must_use]
    pub fn clear_progress(mut self) -> Self {
        self.progress = Some(None);
        self
    }

    /// Requests a priority change.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }
}

/// Filter for task listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskFilter {
    status: Option<TaskStatus>,
    exclude_completed: bool,
}

impl TaskFilter {
    /// Matches every task.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            status: None,
            exclude_completed: false,
        }
    }

    /// Matches tasks with exactly `status`.
    #[must_use]
    pub const fn with_status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            exclude_completed: false,
        }
    }

    /// Matches tasks that are not completed.
    #[must_use]
    pub const fn open() -> Self {
        Self {
            status: None,
            exclude_completed: true,
        }
    }

    fn matches(self, task: &Task) -> bool {
        self.status.map_or_else(
            || !(self.exclude_completed && task.is_completed()),
            |status| task.status().is(status),
        )
    }
}

/// Result of a status update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusUpdateOutcome {
    /// The task after the update.
    pub task: Task,
    /// Default step to preselect when the task entered progress without one.
    pub suggested_step: Option<String>,
}

/// Derived presentation values for one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskView {
    /// The task snapshot the values were derived from.
    pub task: Task,
    /// Completion percentage.
    pub percentage: u8,
    /// Progress bar colour band.
    pub band: ProgressBand,
    /// Badge and colour tokens.
    pub display: DisplayClassification,
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Input validation failed.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
#[derive(Clone)]
pub struct TaskLifecycleService<R, K, C>
where
    R: TaskRepository,
    K: WorkflowCatalog,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    catalog: Arc<K>,
    clock: Arc<C>,
    utc_offset: FixedOffset,
}

impl<R, K, C> TaskLifecycleService<R, K, C>
where
    R: TaskRepository,
    K: WorkflowCatalog,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service using the default configuration.
    #[must_use]
    pub fn new(repository: Arc<R>, catalog: Arc<K>, clock: Arc<C>) -> Self {
        Self::with_config(repository, catalog, clock, &TrackerConfig::default())
    }

    /// Creates a new task lifecycle service with explicit configuration.
    #[must_use]
    pub fn with_config(
        repository: Arc<R>,
        catalog: Arc<K>,
        clock: Arc<C>,
        config: &TrackerConfig,
    ) -> Self {
        Self {
            repository,
            catalog,
            clock,
            utc_offset: config.utc_offset(),
        }
    }

    /// Returns the local calendar date.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        local_today(&*self.clock, self.utc_offset)
    }

    /// Creates a task.
    ///
    /// Without an explicit status the initial status is inferred from the
    /// dates.
    ///
    /// A task created in progress without a step starts on the workflow's
    /// default step, if one is configured. This differs from
    /// [`update_status`](Self::update_status), which leaves progress unset
    /// and only returns the default as
    /// [`StatusUpdateOutcome::suggested_step`]: a creation form preselects
    /// the default step before submitting, so creation stores what the form
    /// would have sent. Pass an explicit step to override it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Validation`] when input validation fails
    /// or [`TaskLifecycleError::Repository`] when persistence fails.
    pub async fn create_task(&self, request: CreateTaskRequest) -> TaskLifecycleResult<Task> {
        let CreateTaskRequest {
            title,
            task_type,
            description,
            start_date,
            deadline,
            priority,
            status,
            progress,
        } = request;

        let today = self.today();
        let mut details = TaskDetails::new(title, task_type)?;
        if let Some(text) = description {
            details = details.with_description(text);
        }
        let schedule = TaskSchedule::new(start_date.unwrap_or(today), deadline)?;
        let initial_status = status
            .map(|raw| TaskStatus::try_from(raw.as_str()))
            .transpose()
            .map_err(ValidationError::from)?
            .unwrap_or_else(|| {
                infer_initial_status(today, Some(schedule.start_date()), schedule.deadline())
            });
        let initial_progress =
            self.initial_progress(&details, initial_status, progress.as_deref())?;

        let mut task = Task::new(
            details,
            schedule,
            Priority::from_lenient(priority.as_deref()),
            initial_status,
            initial_progress,
            &*self.clock,
        );
        task.refresh_overdue(today);
        self.repository.store(&task).await?;
        info!(task_id = %task.id(), status = %initial_status, task_type = task.task_type(), "task created");
        Ok(task)
    }

    fn initial_progress(
        &self,
        details: &TaskDetails,
        status: TaskStatus,
        progress: Option<&str>,
    ) -> Result<Option<String>, ValidationError> {
        if status != TaskStatus::InProgress {
            return Ok(None);
        }
        let task_type = details.task_type();
        if let Some(step) = progress.map(str::trim).filter(|step| !step.is_empty()) {
            validate_progress_step(task_type, step, &*self.catalog)?;
            return Ok(Some(step.to_owned()));
        }
        Ok(self.catalog.default_step(task_type))
    }

    /// Retrieves a task by identifier with its overdue flag refreshed.
    ///
    /// Returns `Ok(None)` when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when lookup fails.
    pub async fn find_by_id(&self, id: TaskId) -> TaskLifecycleResult<Option<Task>> {
        let today = self.today();
        let found = self.repository.find_by_id(id).await?;
        Ok(found.map(|mut task| {
            task.refresh_overdue(today);
            task
        }))
    }

    /// Lists tasks matching `filter`, ordered by start date.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when lookup fails.
    pub async fn list(&self, filter: TaskFilter) -> TaskLifecycleResult<Vec<Task>> {
        let today = self.today();
        let mut tasks: Vec<Task> = self
            .repository
            .list_all()
            .await?
            .into_iter()
            .filter(|task| filter.matches(task))
            .map(|mut task| {
                task.refresh_overdue(today);
                task
            })
            .collect();
        tasks.sort_by_key(|task| (task.start_date(), task.created_at()));
        Ok(tasks)
    }

    /// Lists pending tasks, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when lookup fails.
    pub async fn list_pending(&self) -> TaskLifecycleResult<Vec<Task>> {
        let mut tasks = self.list(TaskFilter::with_status(TaskStatus::Pending)).await?;
        tasks.sort_by_key(|task| Reverse(task.created_at()));
        Ok(tasks)
    }

    /// Applies a status, progress, and/or priority change.
    ///
    /// Status or progress changes are recorded in the task history.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Validation`] for unknown statuses or
    /// priorities, steps outside the workflow, or progress edits on a
    /// completed task, and [`TaskLifecycleError::Repository`] when the task
    /// does not exist or persistence fails.
    pub async fn update_status(
        &self,
        request: UpdateStatusRequest,
    ) -> TaskLifecycleResult<StatusUpdateOutcome> {
        let UpdateStatusRequest {
            task_id,
            status,
            progress,
            priority,
        } = request;
        let mut task = self.require(task_id).await?;
        let old_status = task.status().clone();
        let old_progress = task.progress().map(str::to_owned);

        let priority_update = priority
            .map(|raw| Priority::try_from(raw.as_str()).map_err(ValidationError::from))
            .transpose()
            .inspect_err(|err| warn!(%task_id, error = %err, "priority update rejected"))?;

        let mut suggested_step = None;
        if let Some(requested) = status {
            let requested_step =
                StepRequest::from_update(progress.as_ref().map(|step| step.as_deref()));
            let transition = self
                .validate_transition(&task, &requested, requested_step)
                .inspect_err(|err| warn!(%task_id, error = %err, "status update rejected"))?;
            transition.apply(&mut task, &*self.clock)?;
            suggested_step = transition.suggested_step().map(str::to_owned);
        } else if let Some(step) = progress {
            self.change_progress(&mut task, step)
                .inspect_err(|err| warn!(%task_id, error = %err, "progress update rejected"))?;
        }

        if let Some(new_priority) = priority_update {
            task.set_priority(new_priority, &*self.clock);
        }

        task.refresh_overdue(self.today());
        self.repository.update(&task).await?;
        self.record_history(&task, old_status, old_progress).await?;
        info!(%task_id, status = %task.status(), progress = ?task.progress(), "task updated");
        Ok(StatusUpdateOutcome {
            task,
            suggested_step,
        })
    }

    fn validate_transition(
        &self,
        task: &Task,
        requested: &str,
        progress: StepRequest<'_>,
    ) -> Result<StatusTransition, ValidationError> {
        validate_status_transition(task, requested, progress, &*self.catalog)
    }

    fn change_progress(&self, task: &mut Task, step: Option<String>) -> Result<(), ValidationError> {
        let normalized = step
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty());
        if let Some(value) = normalized.as_deref() {
            validate_progress_step(task.task_type(), value, &*self.catalog)?;
        }
        task.set_progress(normalized, &*self.clock)
    }

    async fn record_history(
        &self,
        task: &Task,
        old_status: ReportedStatus,
        old_progress: Option<String>,
    ) -> TaskLifecycleResult<()> {
        let entry = ProgressHistoryEntry::record(
            task.id(),
            FieldChange::between(old_status, task.status().clone()),
            FieldChange::between(old_progress, task.progress().map(str::to_owned)),
            &*self.clock,
        );
        if let Some(history_entry) = entry {
            self.repository.append_history(&history_entry).await?;
        }
        Ok(())
    }

    /// Closes out a task: marks it completed and stamps `completed_at`.
    ///
    /// Completing an already completed task returns it unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the task does not
    /// exist or persistence fails.
    pub async fn complete_task(&self, id: TaskId) -> TaskLifecycleResult<Task> {
        let mut task = self.require(id).await?;
        if task.is_completed() {
            return Ok(task);
        }
        let old_status = task.status().clone();
        let old_progress = task.progress().map(str::to_owned);
        let transition = self.validate_transition(
            &task,
            TaskStatus::Completed.as_str(),
            StepRequest::Unspecified,
        )?;
        transition.apply(&mut task, &*self.clock)?;
        task.refresh_overdue(self.today());
        self.repository.update(&task).await?;
        self.record_history(&task, old_status, old_progress).await?;
        info!(task_id = %id, "task completed");
        Ok(task)
    }

    /// Deletes a task with its history and review comments.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the task does not
    /// exist or persistence fails.
    pub async fn delete_task(&self, id: TaskId) -> TaskLifecycleResult<()> {
        self.repository.delete(id).await?;
        info!(task_id = %id, "task deleted");
        Ok(())
    }

    /// Returns the status and progress history of a task, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the task does not
    /// exist or lookup fails.
    pub async fn history(&self, id: TaskId) -> TaskLifecycleResult<Vec<ProgressHistoryEntry>> {
        self.require(id).await?;
        Ok(self.repository.history_for(id).await?)
    }

    /// Adds a review comment to a completed task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Validation`] when the task is not
    /// completed or the comment is blank, and
    /// [`TaskLifecycleError::Repository`] when the task does not exist or
    /// persistence fails.
    pub async fn add_review_comment(
        &self,
        id: TaskId,
        content: impl Into<String> + Send,
    ) -> TaskLifecycleResult<ReviewComment> {
        let task = self.require(id).await?;
        let comment = ReviewComment::new(&task, content, &*self.clock)?;
        self.repository.add_comment(&comment).await?;
        info!(task_id = %id, comment_id = %comment.id(), "review comment added");
        Ok(comment)
    }

    /// Returns the review comments of a task, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the task does not
    /// exist or lookup fails.
    pub async fn review_comments(&self, id: TaskId) -> TaskLifecycleResult<Vec<ReviewComment>> {
        self.require(id).await?;
        Ok(self.repository.comments_for(id).await?)
    }

    /// Derives the presentation values of a task.
    #[must_use]
    pub fn describe(&self, task: Task) -> TaskView {
        let percentage = progress_percentage(&task, &*self.catalog);
        TaskView {
            percentage,
            band: ProgressBand::for_percentage(percentage),
            display: classify_for_display(&task),
            task,
        }
    }

    async fn require(&self, id: TaskId) -> TaskLifecycleResult<Task> {
        self.find_by_id(id)
            .await?
            .ok_or(TaskLifecycleError::Repository(TaskRepositoryError::NotFound(
                id,
            )))
    }
}
