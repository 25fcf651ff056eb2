//! Audit trail of status and progress changes.

use super::{HistoryEntryId, ReportedStatus, TaskId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Before/after pair for a single changed field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldChange<T> {
    /// Value before the change.
    pub old: T,
    /// Value after the change.
    pub new: T,
}

impl<T: PartialEq> FieldChange<T> {
    /// Returns a change only when the values differ.
    #[must_use]
    pub fn between(old: T, new: T) -> Option<Self> {
        (old != new).then_some(Self { old, new })
    }
}

/// One recorded status and/or progress change of a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressHistoryEntry {
    id: HistoryEntryId,
    task_id: TaskId,
    recorded_at: DateTime<Utc>,
    status_change: Option<FieldChange<ReportedStatus>>,
    progress_change: Option<FieldChange<Option<String>>>,
}

/// What a history entry should be presented as.
///
/// A progress change takes precedence over a status change recorded in the
/// same entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistorySummary<'a> {
    /// The workflow step moved.
    Progress {
        /// Previous step, `None` when not started.
        old: Option<&'a str>,
        /// New step, `None` when cleared.
        new: Option<&'a str>,
    },
    /// The status moved.
    Status {
        /// Previous status.
        old: &'a ReportedStatus,
        /// New status.
        new: &'a ReportedStatus,
    },
    /// Nothing distinguishable changed.
    Other,
}

impl ProgressHistoryEntry {
    /// Records a change, or returns `None` when neither field changed.
    #[must_use]
    pub fn record(
        task_id: TaskId,
        status_change: Option<FieldChange<ReportedStatus>>,
        progress_change: Option<FieldChange<Option<String>>>,
        clock: &impl Clock,
    ) -> Option<Self> {
        if status_change.is_none() && progress_change.is_none() {
            return None;
        }
        Some(Self {
            id: HistoryEntryId::new(),
            task_id,
            recorded_at: clock.utc(),
            status_change,
            progress_change,
        })
    }

    /// Returns the entry identifier.
    #[must_use]
    pub const fn id(&self) -> HistoryEntryId {
        self.id
    }

    /// Returns the owning task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns when the change was recorded.
    #[must_use]
    pub const fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }

    /// Returns the status change, if any.
    #[must_use]
    pub const fn status_change(&self) -> Option<&FieldChange<ReportedStatus>> {
        self.status_change.as_ref()
    }

    /// Returns the progress change, if any.
    #[must_use]
    pub const fn progress_change(&self) -> Option<&FieldChange<Option<String>>> {
        self.progress_change.as_ref()
    }

    /// Summarises the entry for display.
    #[must_use]
    pub fn summary(&self) -> HistorySummary<'_> {
        if let Some(change) = &self.progress_change {
            return HistorySummary::Progress {
                old: change.old.as_deref(),
                new: change.new.as_deref(),
            };
        }
        self.status_change
            .as_ref()
            .map_or(HistorySummary::Other, |change| HistorySummary::Status {
                old: &change.old,
                new: &change.new,
            })
    }
}
