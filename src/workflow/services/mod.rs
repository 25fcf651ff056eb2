//! Application services for workflow management.

mod management;

pub use management::{
    CreateWorkflowRequest, UpdateWorkflowRequest, WorkflowService, WorkflowServiceError,
    WorkflowServiceResult,
};
