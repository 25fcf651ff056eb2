//! Status transition validation and its progress side effects.

use crate::task::{
    domain::{ReportedStatus, Task, TaskStatus, ValidationError},
    ports::WorkflowCatalog,
};
use mockable::Clock;

/// Progress supplied alongside a status change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StepRequest<'a> {
    /// No step given; the transition rules decide.
    #[default]
    Unspecified,
    /// Explicitly clear the step.
    Clear,
    /// Move to the named step. A blank name clears the step.
    Set(&'a str),
}

impl<'a> StepRequest<'a> {
    /// Builds a request from an optional clear-or-set value.
    #[must_use]
    pub const fn from_update(update: Option<Option<&'a str>>) -> Self {
        match update {
            None => Self::Unspecified,
            Some(None) => Self::Clear,
            Some(Some(step)) => Self::Set(step),
        }
    }

    fn normalized(self) -> Self {
        match self {
            Self::Set(step) if step.trim().is_empty() => Self::Clear,
            Self::Set(step) => Self::Set(step.trim()),
            other => other,
        }
    }
}

/// Outcome of validating a requested status change.
///
/// Carries everything that must be applied together with the status: the
/// resulting progress step and, when a task enters progress without a step,
/// the catalog's default step for the presentation layer to preselect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusTransition {
    from: ReportedStatus,
    to: TaskStatus,
    progress: Option<String>,
    suggested_step: Option<String>,
}

impl StatusTransition {
    /// Returns the status the task is leaving.
    #[must_use]
    pub const fn from(&self) -> &ReportedStatus {
        &self.from
    }

    /// Returns the status the task is entering.
    #[must_use]
    pub const fn to(&self) -> TaskStatus {
        self.to
    }

    /// Returns the progress step the task holds after the transition.
    #[must_use]
    pub fn progress(&self) -> Option<&str> {
        self.progress.as_deref()
    }

    /// Returns the default step to offer when progress was left unset.
    #[must_use]
    pub fn suggested_step(&self) -> Option<&str> {
        self.suggested_step.as_deref()
    }

    /// Returns whether the transition closes out the task.
    #[must_use]
    pub fn closes_out(&self) -> bool {
        self.to == TaskStatus::Completed && !self.from.is(TaskStatus::Completed)
    }

    /// Returns whether the status value actually changes.
    #[must_use]
    pub fn changes_status(&self) -> bool {
        !self.from.is(self.to)
    }

    /// Applies the transition to `task`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::ProgressLocked`] if the resulting progress
    /// would differ on a task that stays completed.
    pub fn apply(&self, task: &mut Task, clock: &impl Clock) -> Result<(), ValidationError> {
        task.set_status(self.to, clock);
        if task.progress() != self.progress() {
            task.set_progress(self.progress.clone(), clock)?;
        }
        Ok(())
    }
}

/// Validates a requested status change for `task`.
///
/// Any status may follow any other. Entering `in_progress` with a step
/// requires the step to belong to the task type's workflow. Without a step,
/// a task already in progress keeps its step; otherwise, or when the step is
/// explicitly cleared, progress is left unset and the catalog default is
/// suggested. Moving to `pending` clears progress. Completing freezes the
/// current step. Progress supplied alongside `pending` or `completed` is
/// ignored.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidStatus`] when `requested` is not a
/// recognised status, or [`ValidationError::StepNotInWorkflow`] when the
/// supplied step is absent from a known workflow.
pub fn validate_status_transition(
    task: &Task,
    requested: &str,
    progress: StepRequest<'_>,
    catalog: &impl WorkflowCatalog,
) -> Result<StatusTransition, ValidationError> {
    let to = TaskStatus::try_from(requested)?;
    let from = task.status().clone();

    let (resulting_progress, suggested_step) = match to {
        TaskStatus::InProgress => match progress.normalized() {
            StepRequest::Set(step) => {
                validate_progress_step(task.task_type(), step, catalog)?;
                (Some(step.to_owned()), None)
            }
            StepRequest::Unspecified if from.is(TaskStatus::InProgress) => {
                (task.progress().map(str::to_owned), None)
            }
            StepRequest::Unspecified | StepRequest::Clear => {
                (None, catalog.default_step(task.task_type()))
            }
        },
        TaskStatus::Pending => (None, None),
        TaskStatus::Completed => (task.progress().map(str::to_owned), None),
    };

    Ok(StatusTransition {
        from,
        to,
        progress: resulting_progress,
        suggested_step,
    })
}

/// Checks that `step` belongs to the workflow of `task_type`.
///
/// Task types without a workflow accept any step.
///
/// # Errors
///
/// Returns [`ValidationError::StepNotInWorkflow`] when the workflow exists
/// and does not contain `step`.
pub fn validate_progress_step(
    task_type: &str,
    step: &str,
    catalog: &impl WorkflowCatalog,
) -> Result<(), ValidationError> {
    let steps = catalog.steps(task_type);
    if steps.is_empty() || steps.iter().any(|candidate| candidate == step) {
        return Ok(());
    }
    Err(ValidationError::StepNotInWorkflow {
        task_type: task_type.to_owned(),
        step: step.to_owned(),
    })
}
