//! Then steps for task progress BDD scenarios.

use super::world::{ProgressWorld, run_async};
use rstest_bdd_macros::then;
use work_calendar::task::{
    domain::{HistorySummary, ValidationError},
    services::TaskLifecycleError,
};

#[then("the completion percentage is {percentage:u8}")]
fn completion_percentage(world: &ProgressWorld, percentage: u8) -> Result<(), eyre::Report> {
    let task = world.current_task()?;
    let actual = world.tasks.describe(task).percentage;
    eyre::ensure!(
        actual == percentage,
        "expected {percentage}% completion, found {actual}%"
    );
    Ok(())
}

#[then(r#"the task keeps step "{step}""#)]
fn task_keeps_step(world: &ProgressWorld, step: String) -> Result<(), eyre::Report> {
    let task = world.current_task()?;
    eyre::ensure!(
        task.progress() == Some(step.as_str()),
        "expected step {step}, found {:?}",
        task.progress()
    );
    if let Some(completed) = world.last_completed.as_ref() {
        eyre::ensure!(
            completed.completed_at().is_some(),
            "completed task must carry a completion time"
        );
    }
    Ok(())
}

#[then("the task has no step")]
fn task_has_no_step(world: &ProgressWorld) -> Result<(), eyre::Report> {
    let task = world.current_task()?;
    eyre::ensure!(
        task.progress().is_none(),
        "expected no step, found {:?}",
        task.progress()
    );
    Ok(())
}

#[then(r#"the task history shows a move from "{old}" to "{new}""#)]
fn history_shows_move(world: &ProgressWorld, old: String, new: String) -> Result<(), eyre::Report> {
    let history = run_async(world.tasks.history(world.task_id()?))?;
    let latest = history
        .first()
        .ok_or_else(|| eyre::eyre!("expected a history entry"))?;
    let expected = HistorySummary::Progress {
        old: Some(old.as_str()),
        new: Some(new.as_str()),
    };
    eyre::ensure!(
        latest.summary() == expected,
        "unexpected history entry {:?}",
        latest.summary()
    );
    Ok(())
}

#[then("the update is rejected because the step is not in the workflow")]
fn rejected_for_foreign_step(world: &ProgressWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_update
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing update result in scenario world"))?;
    eyre::ensure!(
        matches!(
            result,
            Err(TaskLifecycleError::Validation(
                ValidationError::StepNotInWorkflow { .. }
            ))
        ),
        "expected a step-not-in-workflow error, got {result:?}"
    );
    Ok(())
}

#[then("the update is rejected as an invalid status")]
fn rejected_for_invalid_status(world: &ProgressWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_update
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing update result in scenario world"))?;
    eyre::ensure!(
        matches!(
            result,
            Err(TaskLifecycleError::Validation(ValidationError::InvalidStatus(_)))
        ),
        "expected an invalid status error, got {result:?}"
    );
    Ok(())
}
