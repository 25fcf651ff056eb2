//! Pure mappings from task state to presentation tokens.

use crate::task::domain::{Priority, ReportedStatus, Task, TaskStatus};
use serde::Serialize;

/// Badge style for a task status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeKind {
    /// Not started, or an unrecognised status.
    Neutral,
    /// Under way.
    Accent,
    /// Done.
    Success,
}

/// Colour token for a priority level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorToken {
    /// High priority.
    Danger,
    /// Medium priority.
    Warning,
    /// Low priority.
    Info,
}

/// Display tokens for one task.
///
/// The overdue marker is layered on top of the status badge; it never
/// replaces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DisplayClassification {
    /// Badge for the task status.
    pub status_badge: BadgeKind,
    /// Colour for the task priority.
    pub priority_color: ColorToken,
    /// Whether to add the overdue marker.
    pub overdue: bool,
}

impl From<&ReportedStatus> for BadgeKind {
    fn from(status: &ReportedStatus) -> Self {
        match status.known() {
            Some(TaskStatus::InProgress) => Self::Accent,
            Some(TaskStatus::Completed) => Self::Success,
            Some(TaskStatus::Pending) | None => Self::Neutral,
        }
    }
}

impl From<Priority> for ColorToken {
    fn from(priority: Priority) -> Self {
        match priority {
            Priority::High => Self::Danger,
            Priority::Medium => Self::Warning,
            Priority::Low => Self::Info,
        }
    }
}

/// Classifies a task for display. Does not touch its input.
#[must_use]
pub fn classify_for_display(task: &Task) -> DisplayClassification {
    DisplayClassification {
        status_badge: BadgeKind::from(task.status()),
        priority_color: ColorToken::from(task.priority()),
        overdue: task.is_overdue(),
    }
}

/// Colour band for a progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressBand {
    /// 80% and above.
    Success,
    /// 50% to 79%.
    Info,
    /// 30% to 49%.
    Warning,
    /// Below 30%.
    Danger,
}

impl ProgressBand {
    /// Selects the band for a completion percentage.
    #[must_use]
    pub const fn for_percentage(percentage: u8) -> Self {
        match percentage {
            80.. => Self::Success,
            50..=79 => Self::Info,
            30..=49 => Self::Warning,
            _ => Self::Danger,
        }
    }
}
