//! Application services for task lifecycle orchestration.

mod lifecycle;

pub use lifecycle::{
    CreateTaskRequest, StatusUpdateOutcome, TaskFilter, TaskLifecycleError, TaskLifecycleResult,
    TaskLifecycleService, TaskView, UpdateStatusRequest,
};
