//! Reporting over task snapshots.
//!
//! Both reports are pure functions of a task list; callers fetch the tasks
//! through [`TaskLifecycleService::list`](crate::task::services::TaskLifecycleService::list)
//! or a repository.

mod completion;
mod rounding;
mod statistics;

pub use completion::{CompletionAnalytics, MonthlyCompletions};
pub use statistics::{PriorityBreakdown, StatusBreakdown, TaskStatistics, TaskTypeStats};

#[cfg(test)]
mod tests;
