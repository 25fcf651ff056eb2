//! When steps for task progress BDD scenarios.

use super::world::{ProgressWorld, run_async};
use rstest_bdd_macros::when;
use work_calendar::task::services::UpdateStatusRequest;

#[when(r#"the task moves to step "{step}""#)]
fn move_to_step(world: &mut ProgressWorld, step: String) -> Result<(), eyre::Report> {
    let request = UpdateStatusRequest::new(world.task_id()?).with_progress(step);
    world.last_update = Some(run_async(world.tasks.update_status(request)));
    Ok(())
}

#[when(r#"the task status is set to "{status}""#)]
fn set_status(world: &mut ProgressWorld, status: String) -> Result<(), eyre::Report> {
    let request = UpdateStatusRequest::new(world.task_id()?).with_status(status);
    world.last_update = Some(run_async(world.tasks.update_status(request)));
    Ok(())
}

#[when("the task is completed")]
fn complete(world: &mut ProgressWorld) -> Result<(), eyre::Report> {
    let completed = run_async(world.tasks.complete_task(world.task_id()?))?;
    world.last_completed = Some(completed);
    Ok(())
}
