//! In-memory integration tests for reports over service-created tasks.

use mockable::{Clock, DefaultClock};
use rstest::rstest;
use work_calendar::{
    analytics::{CompletionAnalytics, TaskStatistics},
    config::TrackerConfig,
    task::services::{CreateTaskRequest, TaskFilter},
};

use super::helpers::{Tracker, tracker};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reports_reflect_completed_work(tracker: Tracker) -> Result<(), eyre::Report> {
    let reporting = tracker.with_report_workflow().await?;
    for title in ["Board pack", "Budget memo"] {
        let task = reporting
            .tasks
            .create_task(CreateTaskRequest::new(title, "report").with_status("in_progress"))
            .await?;
        reporting.tasks.complete_task(task.id()).await?;
    }
    reporting
        .tasks
        .create_task(
            CreateTaskRequest::new("Offsite", "event")
                .with_status("pending")
                .with_priority("low"),
        )
        .await?;

    let tasks = reporting.tasks.list(TaskFilter::all()).await?;
    let statistics = TaskStatistics::from_tasks(&tasks);
    let completion = CompletionAnalytics::compute(
        &tasks,
        DefaultClock.utc(),
        TrackerConfig::bare().utc_offset(),
    );

    assert_eq!(statistics.total_tasks, 3);
    assert_eq!(statistics.status.completed, 2);
    assert_eq!(statistics.priority.low, 1);
    assert_eq!(
        statistics
            .task_types
            .first()
            .map(|stats| stats.task_type.as_str()),
        Some("report")
    );
    assert_eq!(
        statistics
            .for_task_type("report")
            .and_then(|stats| stats.average_duration_days),
        Some(1.0)
    );
    assert_eq!(completion.total_completed, 2);
    assert_eq!(completion.this_month, 2);
    assert_eq!(completion.top_task_type.as_deref(), Some("report"));
    assert_eq!(
        completion.monthly.last().map(|month| month.completed),
        Some(2)
    );
    Ok(())
}
