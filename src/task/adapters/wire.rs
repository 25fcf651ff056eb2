//! Decoding of backend task payloads into domain tasks.
//!
//! Every field the lifecycle rules depend on is checked here, so malformed
//! payloads fail with a typed error instead of leaking half-populated tasks.
//! Status strings outside the recognised set are kept as
//! [`ReportedStatus::Unrecognized`](crate::task::domain::ReportedStatus).
//!
//! The backend keys tasks by integer primary key and writes wall-clock
//! timestamps without an offset. Keys map to stable [`TaskId`]s; naive
//! timestamps are read in the caller's local offset.

use crate::task::domain::{
    PersistedTaskData, Priority, ReportedStatus, Task, TaskDetails, TaskId, TaskSchedule,
    ValidationError,
};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

/// Errors returned while decoding backend task payloads.
#[derive(Debug, Error)]
pub enum TaskDecodeError {
    /// The payload is not valid JSON or misses required fields.
    #[error("malformed task payload: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A timestamp field holds an unparseable value.
    #[error("invalid {field} timestamp '{value}' on task {id}")]
    InvalidTimestamp {
        /// Identifier of the offending record.
        id: TaskId,
        /// Field name.
        field: &'static str,
        /// Raw value.
        value: String,
    },

    /// A field is present but violates a task invariant.
    #[error("invalid task {id}: {source}")]
    InvalidTask {
        /// Identifier of the offending record.
        id: TaskId,
        /// Violated invariant.
        #[source]
        source: ValidationError,
    },
}

/// Backend record key: an integer primary key or a UUID string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BackendKey {
    Number(u64),
    Text(String),
}

impl BackendKey {
    fn into_task_id(self) -> TaskId {
        match self {
            Self::Number(key) => TaskId::from_backend_key(&key.to_string()),
            Self::Text(raw) => Uuid::parse_str(raw.trim())
                .map_or_else(|_| TaskId::from_backend_key(&raw), TaskId::from_uuid),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TaskRecord {
    id: BackendKey,
    title: String,
    #[serde(default)]
    description: Option<String>,
    task_type: String,
    start_date: NaiveDate,
    #[serde(default)]
    deadline: Option<NaiveDate>,
    status: String,
    #[serde(default)]
    priority: Option<String>,
    #[serde(default)]
    progress: Option<String>,
    created_at: String,
    updated_at: String,
    #[serde(default)]
    completed_at: Option<String>,
    #[serde(default)]
    is_overdue: bool,
}

impl TaskRecord {
    fn into_task(self, offset: FixedOffset) -> Result<Task, TaskDecodeError> {
        let id = self.id.into_task_id();
        let read_timestamp = |field: &'static str, value: String| {
            parse_timestamp(&value, offset)
                .ok_or(TaskDecodeError::InvalidTimestamp { id, field, value })
        };
        let created_at = read_timestamp("created_at", self.created_at)?;
        let updated_at = read_timestamp("updated_at", self.updated_at)?;
        let completed_at = self
            .completed_at
            .map(|value| read_timestamp("completed_at", value))
            .transpose()?;

        let invalid = |source| TaskDecodeError::InvalidTask { id, source };
        let details = TaskDetails::new(self.title, self.task_type)
            .map_err(invalid)?
            .with_description(self.description.unwrap_or_default());
        let schedule = TaskSchedule::new(self.start_date, self.deadline).map_err(invalid)?;

        Ok(Task::from_persisted(PersistedTaskData {
            id,
            details,
            schedule,
            priority: Priority::from_lenient(self.priority.as_deref()),
            status: ReportedStatus::parse(&self.status),
            progress: self.progress.filter(|step| !step.trim().is_empty()),
            is_overdue: self.is_overdue,
            completed_at,
            created_at,
            updated_at,
        }))
    }
}

/// Decodes a single task object.
///
/// Timestamps without an offset are read as local time at `offset`.
///
/// # Errors
///
/// Returns [`TaskDecodeError`] when the payload is malformed or violates a
/// task invariant.
pub fn decode_task(json: &str, offset: FixedOffset) -> Result<Task, TaskDecodeError> {
    let record: TaskRecord = serde_json::from_str(json)?;
    record.into_task(offset)
}

/// Decodes a JSON array of task objects.
///
/// Timestamps without an offset are read as local time at `offset`.
///
/// # Errors
///
/// Returns [`TaskDecodeError`] for the first malformed or invalid record.
pub fn decode_tasks(json: &str, offset: FixedOffset) -> Result<Vec<Task>, TaskDecodeError> {
    let records: Vec<TaskRecord> = serde_json::from_str(json)?;
    records
        .into_iter()
        .map(|record| record.into_task(offset))
        .collect()
}

/// Parses RFC 3339 timestamps, or naive timestamps local to `offset`.
fn parse_timestamp(raw: &str, offset: FixedOffset) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .and_then(|naive| naive.and_local_timezone(offset).single())
        .map(|local| local.with_timezone(&Utc))
}
