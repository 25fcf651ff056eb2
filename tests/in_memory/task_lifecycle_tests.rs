//! In-memory integration tests for task lifecycle operations.

use chrono::{Days, NaiveDate};
use rstest::rstest;
use work_calendar::task::{
    domain::{HistorySummary, ReportedStatus, TaskStatus, ValidationError},
    lifecycle::{BadgeKind, ProgressBand},
    services::{CreateTaskRequest, TaskLifecycleError, UpdateStatusRequest},
};

use super::helpers::{Tracker, tracker};

fn days_ago(tracker: &Tracker, days: u64) -> Result<NaiveDate, eyre::Report> {
    tracker
        .tasks
        .today()
        .checked_sub_days(Days::new(days))
        .ok_or_else(|| eyre::eyre!("date out of range"))
}

fn days_ahead(tracker: &Tracker, days: u64) -> Result<NaiveDate, eyre::Report> {
    tracker
        .tasks
        .today()
        .checked_add_days(Days::new(days))
        .ok_or_else(|| eyre::eyre!("date out of range"))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_walks_through_its_workflow(tracker: Tracker) -> Result<(), eyre::Report> {
    let reporting = tracker.with_report_workflow().await?;
    let created = reporting
        .tasks
        .create_task(
            CreateTaskRequest::new("June board report", "report")
                .with_start_date(days_ago(&reporting, 2)?)
                .with_deadline(days_ahead(&reporting, 10)?)
                .with_priority("high"),
        )
        .await?;
    eyre::ensure!(created.progress() == Some("Draft"), "default step adopted");
    let id = created.id();

    let mut percentages = vec![reporting.tasks.describe(created).percentage];
    for step in ["Review", "Approve", "Publish"] {
        let outcome = reporting
            .tasks
            .update_status(UpdateStatusRequest::new(id).with_progress(step))
            .await?;
        percentages.push(reporting.tasks.describe(outcome.task).percentage);
    }
    let completed = reporting.tasks.complete_task(id).await?;
    let view = reporting.tasks.describe(completed);

    assert_eq!(percentages, vec![25, 50, 75, 100]);
    assert_eq!(view.percentage, 100);
    assert_eq!(view.band, ProgressBand::Success);
    assert_eq!(view.display.status_badge, BadgeKind::Success);
    assert_eq!(view.task.progress(), Some("Publish"));
    assert!(view.task.completed_at().is_some());

    let history = reporting.tasks.history(id).await?;
    assert_eq!(history.len(), 4);
    assert!(matches!(
        history.first().map(|entry| entry.summary()),
        Some(HistorySummary::Status {
            new: ReportedStatus::Known(TaskStatus::Completed),
            ..
        })
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn progress_must_belong_to_the_live_workflow(tracker: Tracker) -> Result<(), eyre::Report> {
    let reporting = tracker.with_report_workflow().await?;
    let task = reporting
        .tasks
        .create_task(CreateTaskRequest::new("Budget memo", "report").with_status("in_progress"))
        .await?;

    let rejected = reporting
        .tasks
        .update_status(UpdateStatusRequest::new(task.id()).with_progress("Ship"))
        .await;

    assert!(matches!(
        rejected,
        Err(TaskLifecycleError::Validation(
            ValidationError::StepNotInWorkflow { .. }
        ))
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_type_without_workflow_accepts_any_step(tracker: Tracker) -> Result<(), eyre::Report> {
    let task = tracker
        .tasks
        .create_task(
            CreateTaskRequest::new("Offsite planning", "ad hoc")
                .with_status("in_progress")
                .with_progress("Book venue"),
        )
        .await?;

    assert_eq!(task.progress(), Some("Book venue"));
    assert_eq!(tracker.tasks.describe(task).percentage, 50);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn future_task_starts_pending_and_reopens_cleanly(tracker: Tracker) -> Result<(), eyre::Report> {
    let reporting = tracker.with_report_workflow().await?;
    let task = reporting
        .tasks
        .create_task(
            CreateTaskRequest::new("Q3 plan", "report").with_start_date(days_ahead(&reporting, 5)?),
        )
        .await?;
    eyre::ensure!(task.status().is(TaskStatus::Pending), "future task is pending");

    let started = reporting
        .tasks
        .update_status(
            UpdateStatusRequest::new(task.id())
                .with_status("in_progress")
                .with_progress("Review"),
        )
        .await?;
    let completed = reporting.tasks.complete_task(task.id()).await?;
    let reopened = reporting
        .tasks
        .update_status(UpdateStatusRequest::new(task.id()).with_status("pending"))
        .await?;

    assert_eq!(started.task.progress(), Some("Review"));
    assert!(completed.completed_at().is_some());
    assert_eq!(reopened.task.completed_at(), None);
    assert_eq!(reopened.task.progress(), None);
    assert_eq!(reporting.tasks.describe(reopened.task).percentage, 0);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn expired_task_is_pending_and_flagged_overdue(tracker: Tracker) -> Result<(), eyre::Report> {
    let task = tracker
        .tasks
        .create_task(
            CreateTaskRequest::new("Late filing", "report")
                .with_start_date(days_ago(&tracker, 10)?)
                .with_deadline(days_ago(&tracker, 1)?),
        )
        .await?;
    let view = tracker.tasks.describe(task);

    assert!(view.task.status().is(TaskStatus::Pending));
    assert!(view.display.overdue);
    assert_eq!(view.display.status_badge, BadgeKind::Neutral);
    Ok(())
}
