//! Error types for workflow validation.

use thiserror::Error;

/// Errors returned while constructing or editing workflows.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WorkflowDomainError {
    /// The workflow name is empty after trimming.
    #[error("workflow name must not be empty")]
    EmptyName,

    /// The workflow name exceeds the 100-character limit.
    #[error("workflow name exceeds 100 character limit: {0}")]
    NameTooLong(String),

    /// A step name is empty after trimming.
    #[error("workflow step name must not be empty")]
    EmptyStepName,

    /// The same step name appears twice.
    #[error("workflow step '{0}' appears more than once")]
    DuplicateStep(String),

    /// A step index does not address an existing step.
    #[error("step index {index} is out of range for a workflow with {len} steps")]
    StepIndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of steps in the workflow.
        len: usize,
    },

    /// The default step is not one of the workflow's steps.
    #[error("default step '{0}' is not part of the workflow")]
    UnknownDefaultStep(String),
}
