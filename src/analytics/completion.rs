//! Completion trends over calendar months.

use super::rounding::{change_percent, mean_to_tenth};
use crate::task::domain::Task;
use chrono::{DateTime, Datelike, FixedOffset, Months, NaiveDate, Utc};
use serde::Serialize;
use std::collections::HashMap;

const TREND_MONTHS: u32 = 6;

/// Completions within one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthlyCompletions {
    /// Calendar year.
    pub year: i32,
    /// Calendar month, `1..=12`.
    pub month: u32,
    /// Tasks completed in the month.
    pub completed: usize,
}

/// Completion report relative to the current month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionAnalytics {
    /// Tasks completed in the current month.
    pub this_month: usize,
    /// Tasks completed in the previous month.
    pub last_month: usize,
    /// Change from last month to this month in percent, one decimal place.
    pub month_over_month_change: f64,
    /// Mean whole days from creation to completion, one decimal place.
    pub average_days_to_complete: Option<f64>,
    /// All completed tasks.
    pub total_completed: usize,
    /// Task type with the most completions.
    pub top_task_type: Option<String>,
    /// Completions for the last six months, oldest first, ending with the
    /// current month.
    pub monthly: Vec<MonthlyCompletions>,
}

fn month_start(date: NaiveDate) -> Option<NaiveDate> {
    date.with_day(1)
}

impl CompletionAnalytics {
    /// Computes the report for `tasks` as of `now`, bucketing completion
    /// times by the local calendar at `offset`.
    #[must_use]
    pub fn compute<'a>(
        tasks: impl IntoIterator<Item = &'a Task>,
        now: DateTime<Utc>,
        offset: FixedOffset,
    ) -> Self {
        let local_month = |at: DateTime<Utc>| month_start(at.with_timezone(&offset).date_naive());
        let current = local_month(now);
        let previous = current.and_then(|start| start.checked_sub_months(Months::new(1)));

        let mut per_month: HashMap<NaiveDate, usize> = HashMap::new();
        let mut per_type: HashMap<&str, usize> = HashMap::new();
        let mut total_completed = 0_usize;
        let mut total_days = 0_i64;
        let mut timed = 0_usize;

        let completed = tasks.into_iter().filter(|task| task.is_completed());
        for task in completed {
            total_completed = total_completed.saturating_add(1);
            let type_count = per_type.entry(task.task_type()).or_insert(0);
            *type_count = type_count.saturating_add(1);
            let Some(completed_at) = task.completed_at() else {
                continue;
            };
            if let Some(month) = local_month(completed_at) {
                let month_count = per_month.entry(month).or_insert(0);
                *month_count = month_count.saturating_add(1);
            }
            let days = completed_at
                .signed_duration_since(task.created_at())
                .num_days();
            total_days = total_days.saturating_add(days);
            timed = timed.saturating_add(1);
        }

        let count_in = |month: Option<NaiveDate>| {
            month
                .and_then(|start| per_month.get(&start).copied())
                .unwrap_or(0)
        };
        let this_month = count_in(current);
        let last_month = count_in(previous);
        let monthly = (0..TREND_MONTHS)
            .rev()
            .filter_map(|back| current?.checked_sub_months(Months::new(back)))
            .map(|start| MonthlyCompletions {
                year: start.year(),
                month: start.month(),
                completed: count_in(Some(start)),
            })
            .collect();

        Self {
            this_month,
            last_month,
            month_over_month_change: change_percent(this_month, last_month),
            average_days_to_complete: mean_to_tenth(total_days, timed),
            total_completed,
            top_task_type: top_task_type(&per_type),
            monthly,
        }
    }
}

fn top_task_type(per_type: &HashMap<&str, usize>) -> Option<String> {
    per_type
        .iter()
        .max_by(|left, right| left.1.cmp(right.1).then_with(|| right.0.cmp(left.0)))
        .map(|(task_type, _)| (*task_type).to_owned())
}
