//! Domain model for task records.
//!
//! Tasks carry a status, an optional progress step naming their position in
//! the workflow of their task type, and calendar dates. All infrastructure
//! concerns stay outside the domain boundary.

mod comment;
mod error;
mod history;
mod ids;
mod priority;
mod status;
mod task;

pub use comment::ReviewComment;
pub use error::{ParsePriorityError, ParseTaskStatusError, ValidationError};
pub use history::{FieldChange, HistorySummary, ProgressHistoryEntry};
pub use ids::{CommentId, HistoryEntryId, TaskId};
pub use priority::Priority;
pub use status::{ReportedStatus, TaskStatus};
pub use task::{PersistedTaskData, Task, TaskDetails, TaskSchedule};
