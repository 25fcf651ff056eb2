//! Shared helpers for unit tests.

use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone, Utc};
use mockable::Clock;
use std::sync::Mutex;

use crate::task::{
    domain::{Priority, Task, TaskDetails, TaskSchedule, TaskStatus},
    ports::MockWorkflowCatalog,
};

/// Clock frozen at a chosen instant that tests can move forward.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Midnight UTC on the given calendar date.
    pub fn on(year: i32, month: u32, day: u32) -> Self {
        Self::at(utc(year, month, day))
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().expect("clock lock");
        *now += by;
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().expect("clock lock")
    }
}

pub fn utc(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .expect("valid date")
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

/// Builds a task of `task_type` with the given status and progress.
pub fn task_with(
    task_type: &str,
    status: TaskStatus,
    progress: Option<&str>,
    clock: &impl Clock,
) -> Task {
    Task::new(
        TaskDetails::new("Quarterly report", task_type).expect("valid details"),
        TaskSchedule::new(date(2024, 6, 1), Some(date(2024, 6, 30))).expect("valid schedule"),
        Priority::Medium,
        status,
        progress.map(str::to_owned),
        clock,
    )
}

/// Catalog mock answering every lookup with the given steps and default.
pub fn catalog_with(steps: &[&str], default_step: Option<&str>) -> MockWorkflowCatalog {
    let owned_steps: Vec<String> = steps.iter().map(|step| (*step).to_owned()).collect();
    let owned_default = default_step.map(str::to_owned);
    let mut catalog = MockWorkflowCatalog::new();
    catalog
        .expect_steps()
        .returning(move |_| owned_steps.clone());
    catalog
        .expect_default_step()
        .returning(move |_| owned_default.clone());
    catalog
}
