//! In-memory integration tests for workflows feeding task rules.

use rstest::rstest;
use work_calendar::{
    config::{TrackerConfig, WorkflowSeed},
    task::services::{CreateTaskRequest, TaskFilter},
    workflow::services::{UpdateWorkflowRequest, WorkflowServiceError},
};

use super::helpers::{Tracker, tracker};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn seeded_workflows_govern_new_tasks() -> Result<(), eyre::Report> {
    let config = TrackerConfig {
        utc_offset_hours: 0,
        seed_workflows: vec![WorkflowSeed::new("audit", ["Scope", "Fieldwork", "Report"])],
    };
    let tracker = Tracker::with_config(&config);
    let seeded = tracker.workflows.initialize_defaults(&config).await?;

    let task = tracker
        .tasks
        .create_task(
            CreateTaskRequest::new("Payroll audit", "audit")
                .with_status("in_progress")
                .with_progress("Fieldwork"),
        )
        .await?;

    assert_eq!(seeded, 1);
    assert_eq!(tracker.tasks.describe(task).percentage, 67);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn step_edits_wait_until_tasks_are_done(tracker: Tracker) -> Result<(), eyre::Report> {
    let reporting = tracker.with_report_workflow().await?;
    let workflow_id = reporting
        .workflows
        .list()
        .await?
        .first()
        .map(|workflow| workflow.id())
        .ok_or_else(|| eyre::eyre!("report workflow missing"))?;
    let task = reporting
        .tasks
        .create_task(CreateTaskRequest::new("Board pack", "report").with_status("in_progress"))
        .await?;

    let refused = reporting.workflows.remove_step(workflow_id, 0).await;
    reporting.tasks.complete_task(task.id()).await?;
    let trimmed = reporting
        .workflows
        .update(
            workflow_id,
            UpdateWorkflowRequest {
                steps: Some(vec!["Draft".to_owned(), "Publish".to_owned()]),
                ..UpdateWorkflowRequest::default()
            },
        )
        .await?;

    assert!(matches!(
        refused,
        Err(WorkflowServiceError::WorkflowInUse { active: 1, .. })
    ));
    assert_eq!(trimmed.steps(), ["Draft", "Publish"]);

    let next = reporting
        .tasks
        .create_task(
            CreateTaskRequest::new("Next board pack", "report")
                .with_status("in_progress")
                .with_progress("Publish"),
        )
        .await?;
    assert_eq!(reporting.tasks.describe(next).percentage, 100);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completed_task_keeps_its_step_after_rename(tracker: Tracker) -> Result<(), eyre::Report> {
    let reporting = tracker.with_report_workflow().await?;
    let workflow_id = reporting
        .workflows
        .list()
        .await?
        .first()
        .map(|workflow| workflow.id())
        .ok_or_else(|| eyre::eyre!("report workflow missing"))?;
    let done = reporting
        .tasks
        .create_task(
            CreateTaskRequest::new("Old pack", "report")
                .with_status("in_progress")
                .with_progress("Review"),
        )
        .await?;
    reporting.tasks.complete_task(done.id()).await?;

    reporting
        .workflows
        .rename_step(workflow_id, 1, "Peer review")
        .await?;
    let open = reporting.tasks.list(TaskFilter::open()).await?;
    let all = reporting.tasks.list(TaskFilter::all()).await?;

    assert!(open.is_empty());
    assert_eq!(all.len(), 1);
    let kept = all
        .into_iter()
        .next()
        .ok_or_else(|| eyre::eyre!("completed task missing"))?;
    assert_eq!(kept.progress(), Some("Review"));
    assert_eq!(reporting.tasks.describe(kept).percentage, 100);
    Ok(())
}
