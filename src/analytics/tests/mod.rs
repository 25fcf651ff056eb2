//! Unit tests for task analytics.


use crate::task::domain::{
    PersistedTaskData, Priority, ReportedStatus, Task, TaskDetails, TaskId, TaskSchedule,
};
use chrono::{DateTime, Utc};

/// Builds a stored task with explicit timestamps.
fn stored_task(
    task_type: &str,
    status: &str,
    priority: Priority,
    created_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
) -> Task {
    Task::from_persisted(PersistedTaskData {
        id: TaskId::new(),
        details: TaskDetails::new("Analytics fixture", task_type).expect("valid details"),
        schedule: TaskSchedule::new(created_at.date_naive(), None).expect("valid schedule"),
        priority,
        status: ReportedStatus::parse(status),
        progress: None,
        is_overdue: false,
        completed_at,
        created_at,
        updated_at: completed_at.unwrap_or(created_at),
    })
}
