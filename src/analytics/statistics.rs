//! Task counts by status, priority, and task type.

use super::rounding::mean_to_tenth;
use crate::task::domain::{Priority, Task, TaskStatus};
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::HashMap;

/// Task counts per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusBreakdown {
    /// Pending tasks.
    pub pending: usize,
    /// In-progress tasks.
    pub in_progress: usize,
    /// Completed tasks.
    pub completed: usize,
}

impl StatusBreakdown {
    fn record(&mut self, status: TaskStatus) {
        let slot = match status {
            TaskStatus::Pending => &mut self.pending,
            TaskStatus::InProgress => &mut self.in_progress,
            TaskStatus::Completed => &mut self.completed,
        };
        *slot = slot.saturating_add(1);
    }
}

/// Task counts per priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PriorityBreakdown {
    /// High-priority tasks.
    pub high: usize,
    /// Medium-priority tasks.
    pub medium: usize,
    /// Low-priority tasks.
    pub low: usize,
}

impl PriorityBreakdown {
    fn record(&mut self, priority: Priority) {
        let slot = match priority {
            Priority::High => &mut self.high,
            Priority::Medium => &mut self.medium,
            Priority::Low => &mut self.low,
        };
        *slot = slot.saturating_add(1);
    }
}

/// Counts and average handling time for one task type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskTypeStats {
    /// Task type.
    pub task_type: String,
    /// All tasks of this type.
    pub total: usize,
    /// Tasks per status.
    pub status: StatusBreakdown,
    /// Mean days from creation to completion, counting both ends, over
    /// completed tasks. `None` without completions.
    pub average_duration_days: Option<f64>,
    #[serde(skip)]
    duration_total: i64,
    #[serde(skip)]
    duration_count: usize,
}

impl TaskTypeStats {
    fn new(task_type: &str) -> Self {
        Self {
            task_type: task_type.to_owned(),
            total: 0,
            status: StatusBreakdown::default(),
            average_duration_days: None,
            duration_total: 0,
            duration_count: 0,
        }
    }

    fn record(&mut self, task: &Task) {
        self.total = self.total.saturating_add(1);
        if let Some(status) = task.status().known() {
            self.status.record(status);
        }
        if let Some(days) = handling_days(task) {
            self.duration_total = self.duration_total.saturating_add(days);
            self.duration_count = self.duration_count.saturating_add(1);
        }
    }

    fn finish(mut self) -> Self {
        self.average_duration_days = mean_to_tenth(self.duration_total, self.duration_count);
        self
    }
}

/// Whole days from creation to completion, counting both ends.
fn handling_days(task: &Task) -> Option<i64> {
    if !task.is_completed() {
        return None;
    }
    let completed_at = task.completed_at()?;
    let days = completed_at
        .signed_duration_since(task.created_at())
        .num_days()
        .checked_add(1)?;
    (days > 0).then_some(days)
}

/// Aggregate task statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TaskStatistics {
    /// All tasks, including those with an unrecognised status.
    pub total_tasks: usize,
    /// Tasks per status.
    pub status: StatusBreakdown,
    /// Tasks per priority.
    pub priority: PriorityBreakdown,
    /// Per task type, most completions first.
    pub task_types: Vec<TaskTypeStats>,
}

impl TaskStatistics {
    /// Computes statistics over `tasks`.
    #[must_use]
    pub fn from_tasks<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Self {
        let mut statistics = Self::default();
        let mut by_type: HashMap<&str, TaskTypeStats> = HashMap::new();
        for task in tasks {
            statistics.total_tasks = statistics.total_tasks.saturating_add(1);
            if let Some(status) = task.status().known() {
                statistics.status.record(status);
            }
            statistics.priority.record(task.priority());
            by_type
                .entry(task.task_type())
                .or_insert_with(|| TaskTypeStats::new(task.task_type()))
                .record(task);
        }
        let mut task_types: Vec<TaskTypeStats> = by_type
            .into_values()
            .map(TaskTypeStats::finish)
            .collect();
        task_types.sort_by(|left, right| {
            Reverse(left.status.completed)
                .cmp(&Reverse(right.status.completed))
                .then_with(|| left.task_type.cmp(&right.task_type))
        });
        statistics.task_types = task_types;
        statistics
    }

    /// Returns the statistics of `task_type`, if any task has it.
    #[must_use]
    pub fn for_task_type(&self, task_type: &str) -> Option<&TaskTypeStats> {
        self.task_types
            .iter()
            .find(|stats| stats.task_type == task_type)
    }
}
