//! Given steps for task progress BDD scenarios.

use super::world::{ProgressWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use work_calendar::{task::services::CreateTaskRequest, workflow::services::CreateWorkflowRequest};

#[given(r#"a "{name}" workflow with steps "{steps}""#)]
fn workflow_with_steps(
    world: &mut ProgressWorld,
    name: String,
    steps: String,
) -> Result<(), eyre::Report> {
    let request = CreateWorkflowRequest::new(name, steps.split(',').map(str::trim));
    run_async(world.workflows.create(request)).wrap_err("create scenario workflow")?;
    Ok(())
}

#[given(r#"an in-progress "{task_type}" task on step "{step}""#)]
fn in_progress_task(
    world: &mut ProgressWorld,
    task_type: String,
    step: String,
) -> Result<(), eyre::Report> {
    let request = CreateTaskRequest::new("Scenario task", task_type)
        .with_status("in_progress")
        .with_progress(step);
    let task = run_async(world.tasks.create_task(request)).wrap_err("create scenario task")?;
    world.task_id = Some(task.id());
    Ok(())
}
