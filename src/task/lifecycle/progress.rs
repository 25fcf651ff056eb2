//! Completion percentage derived from status and workflow position.

use crate::task::{
    domain::{ReportedStatus, Task, TaskStatus},
    ports::WorkflowCatalog,
};
use tracing::debug;

/// Percentage shown for an in-progress task whose step cannot be located.
pub const IN_PROGRESS_FALLBACK_PERCENT: u8 = 50;

/// Percentage shown for a status outside the recognised set.
pub const UNRECOGNIZED_STATUS_PERCENT: u8 = 25;

/// Derives a completion percentage in `0..=100` for display.
///
/// Completed tasks are always 100 and pending tasks always 0. An in-progress
/// task on step `i` (zero-based) of an `n`-step workflow yields
/// `round((i + 1) / n * 100)`, so the current step already counts as done.
/// Missing or stale progress and unknown task types fall back to
/// [`IN_PROGRESS_FALLBACK_PERCENT`]; unrecognised statuses fall back to
/// [`UNRECOGNIZED_STATUS_PERCENT`]. None of these cases is an error.
#[must_use]
pub fn progress_percentage(task: &Task, catalog: &impl WorkflowCatalog) -> u8 {
    match task.status() {
        ReportedStatus::Known(TaskStatus::Completed) => 100,
        ReportedStatus::Known(TaskStatus::Pending) => 0,
        ReportedStatus::Known(TaskStatus::InProgress) => {
            in_progress_percentage(task.task_type(), task.progress(), catalog)
        }
        ReportedStatus::Unrecognized(raw) => {
            debug!(task_id = %task.id(), status = %raw, "unrecognised status, using fallback percentage");
            UNRECOGNIZED_STATUS_PERCENT
        }
    }
}

fn in_progress_percentage(
    task_type: &str,
    progress: Option<&str>,
    catalog: &impl WorkflowCatalog,
) -> u8 {
    let Some(step) = progress.filter(|value| !value.is_empty()) else {
        return IN_PROGRESS_FALLBACK_PERCENT;
    };
    let steps = catalog.steps(task_type);
    let percentage = steps
        .iter()
        .position(|candidate| candidate == step)
        .and_then(|index| step_percentage(index, steps.len()));
    if percentage.is_none() {
        debug!(task_type, step, "progress step not found in workflow, using fallback percentage");
    }
    percentage.unwrap_or(IN_PROGRESS_FALLBACK_PERCENT)
}

/// Percentage reached when standing on step `index` of `total` steps,
/// rounded half up.
///
/// Returns `None` when `index` is outside the workflow.
#[must_use]
pub fn step_percentage(index: usize, total: usize) -> Option<u8> {
    if index >= total {
        return None;
    }
    let reached = index.checked_add(1)?;
    let numerator = reached.checked_mul(200)?.checked_add(total)?;
    let rounded = numerator.checked_div(total.checked_mul(2)?)?;
    u8::try_from(rounded).ok()
}
