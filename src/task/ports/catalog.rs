//! Read-only lookup of workflow steps per task type.

/// Ordered workflow steps keyed by task type.
///
/// Lifecycle rules only read from the catalog; editing workflows belongs to
/// the workflow context.
#[cfg_attr(test, mockall::automock)]
pub trait WorkflowCatalog: Send + Sync {
    /// Returns the ordered step names for `task_type`, or an empty list when
    /// the task type has no workflow.
    fn steps(&self, task_type: &str) -> Vec<String>;

    /// Returns the step a task of `task_type` starts on when it enters
    /// progress without an explicit step.
    fn default_step(&self, task_type: &str) -> Option<String>;
}
