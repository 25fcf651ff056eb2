//! Date-based defaults for new tasks.

use crate::task::domain::TaskStatus;
use chrono::{FixedOffset, NaiveDate};
use mockable::Clock;

/// Infers the status a new task should start with.
///
/// An expired deadline yields `pending` rather than a separate overdue
/// status; overdue tasks are flagged through `is_overdue` instead. A start
/// date on or before `today` yields `in_progress`. Everything else,
/// including a missing start date, yields `pending`.
#[must_use]
pub fn infer_initial_status(
    today: NaiveDate,
    start: Option<NaiveDate>,
    deadline: Option<NaiveDate>,
) -> TaskStatus {
    if deadline.is_some_and(|end| end < today) {
        return TaskStatus::Pending;
    }
    match start {
        Some(begin) if begin <= today => TaskStatus::InProgress,
        _ => TaskStatus::Pending,
    }
}

/// Returns the calendar date at `offset` according to `clock`.
#[must_use]
pub fn local_today(clock: &impl Clock, offset: FixedOffset) -> NaiveDate {
    clock.utc().with_timezone(&offset).date_naive()
}
