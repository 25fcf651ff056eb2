//! Repository port for workflow persistence.

use crate::workflow::domain::{Workflow, WorkflowId, WorkflowName};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for workflow repository operations.
pub type WorkflowRepositoryResult<T> = Result<T, WorkflowRepositoryError>;

/// Persistence contract for workflows.
#[async_trait]
pub trait WorkflowRepository: Send + Sync {
    /// Stores a new workflow.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowRepositoryError::DuplicateWorkflow`] when the ID
    /// already exists or [`WorkflowRepositoryError::DuplicateName`] when the
    /// name is taken.
    async fn store(&self, workflow: &Workflow) -> WorkflowRepositoryResult<()>;

    /// Persists changes to an existing workflow.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowRepositoryError::NotFound`] when the workflow does
    /// not exist or [`WorkflowRepositoryError::DuplicateName`] when a rename
    /// collides with another workflow.
    async fn update(&self, workflow: &Workflow) -> WorkflowRepositoryResult<()>;

    /// Finds a workflow by identifier.
    async fn find_by_id(&self, id: WorkflowId) -> WorkflowRepositoryResult<Option<Workflow>>;

    /// Finds a workflow by its unique name.
    async fn find_by_name(&self, name: &str) -> WorkflowRepositoryResult<Option<Workflow>>;

    /// Returns all workflows ordered by creation time.
    async fn list_all(&self) -> WorkflowRepositoryResult<Vec<Workflow>>;

    /// Removes a workflow.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowRepositoryError::NotFound`] when the workflow does
    /// not exist.
    async fn delete(&self, id: WorkflowId) -> WorkflowRepositoryResult<()>;
}

/// Errors returned by workflow repository implementations.
#[derive(Debug, Clone, Error)]
pub enum WorkflowRepositoryError {
    /// A workflow with the same identifier already exists.
    #[error("duplicate workflow identifier: {0}")]
    DuplicateWorkflow(WorkflowId),

    /// A workflow with the same name already exists.
    #[error("duplicate workflow name: {0}")]
    DuplicateName(WorkflowName),

    /// The workflow was not found.
    #[error("workflow not found: {0}")]
    NotFound(WorkflowId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl WorkflowRepositoryError {
    /// Wraps a persistence-layer failure.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
