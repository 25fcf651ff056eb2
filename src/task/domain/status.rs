//! Task status values.

use super::ParseTaskStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a task.
///
/// Every pairwise transition is permitted; completion is the only transition
/// with side effects of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Work has not started.
    Pending,
    /// Work is under way; progress names the current workflow step.
    InProgress,
    /// The task has been closed out.
    Completed,
}

impl TaskStatus {
    /// All statuses in display order.
    pub const ALL: [Self; 3] = [Self::Pending, Self::InProgress, Self::Completed];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }

    /// Returns whether the task still counts as active work.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Pending | Self::InProgress)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// Status as reported by the system of record.
///
/// The backend may hand over a status string outside [`TaskStatus`]; such
/// values are kept verbatim so display logic can degrade instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ReportedStatus {
    /// One of the three recognised statuses.
    Known(TaskStatus),
    /// Any other value, preserved as received.
    Unrecognized(String),
}

impl ReportedStatus {
    /// Interprets a raw status string without failing.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        TaskStatus::try_from(value).map_or_else(|_| Self::Unrecognized(value.to_owned()), Self::Known)
    }

    /// Returns the recognised status, if any.
    #[must_use]
    pub const fn known(&self) -> Option<TaskStatus> {
        match self {
            Self::Known(status) => Some(*status),
            Self::Unrecognized(_) => None,
        }
    }

    /// Returns whether the status is exactly `status`.
    #[must_use]
    pub fn is(&self, status: TaskStatus) -> bool {
        self.known() == Some(status)
    }

    /// Returns the raw string form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Known(status) => status.as_str(),
            Self::Unrecognized(raw) => raw,
        }
    }
}

impl From<TaskStatus> for ReportedStatus {
    fn from(status: TaskStatus) -> Self {
        Self::Known(status)
    }
}

impl From<String> for ReportedStatus {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<ReportedStatus> for String {
    fn from(status: ReportedStatus) -> Self {
        match status {
            ReportedStatus::Known(known) => known.as_str().to_owned(),
            ReportedStatus::Unrecognized(raw) => raw,
        }
    }
}

impl fmt::Display for ReportedStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
