//! Behaviour tests for task progress tracking.

#[path = "task_progress_steps/mod.rs"]
mod task_progress_steps_defs;

use rstest_bdd_macros::scenario;
use task_progress_steps_defs::world::{ProgressWorld, world};

#[scenario(
    path = "tests/features/task_progress.feature",
    name = "Moving along the workflow raises the completion percentage"
)]
#[tokio::test(flavor = "multi_thread")]
async fn moving_along_the_workflow(world: ProgressWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/task_progress.feature",
    name = "Completing a task freezes its step at full progress"
)]
#[tokio::test(flavor = "multi_thread")]
async fn completing_freezes_step(world: ProgressWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/task_progress.feature",
    name = "Reject a step outside the workflow"
)]
#[tokio::test(flavor = "multi_thread")]
async fn reject_foreign_step(world: ProgressWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/task_progress.feature",
    name = "Reject an unknown status"
)]
#[tokio::test(flavor = "multi_thread")]
async fn reject_unknown_status(world: ProgressWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/task_progress.feature",
    name = "Moving back to pending clears progress"
)]
#[tokio::test(flavor = "multi_thread")]
async fn pending_clears_progress(world: ProgressWorld) {
    let _ = world;
}
