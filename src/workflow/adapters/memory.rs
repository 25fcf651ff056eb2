//! In-memory workflow repository that also serves as the live catalog.

use async_trait::async_trait;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::warn;

use crate::task::ports::WorkflowCatalog;
use crate::workflow::{
    domain::{Workflow, WorkflowId},
    ports::{WorkflowRepository, WorkflowRepositoryError, WorkflowRepositoryResult},
};

/// Thread-safe in-memory workflow repository.
///
/// Implements [`WorkflowCatalog`] over the same state, so step edits are
/// visible to task lifecycle rules immediately.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWorkflowRepository {
    state: Arc<RwLock<Vec<Workflow>>>,
}

impl InMemoryWorkflowRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> WorkflowRepositoryResult<RwLockReadGuard<'_, Vec<Workflow>>> {
        self.state.read().map_err(|err| {
            WorkflowRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> WorkflowRepositoryResult<RwLockWriteGuard<'_, Vec<Workflow>>> {
        self.state.write().map_err(|err| {
            WorkflowRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn lookup<T>(&self, task_type: &str, select: impl FnOnce(&Workflow) -> T) -> Option<T> {
        let workflows = self
            .read()
            .inspect_err(|err| warn!(error = %err, task_type, "workflow catalog unavailable"))
            .ok()?;
        workflows
            .iter()
            .find(|workflow| workflow.name().as_str() == task_type)
            .map(select)
    }
}

#[async_trait]
impl WorkflowRepository for InMemoryWorkflowRepository {
    async fn store(&self, workflow: &Workflow) -> WorkflowRepositoryResult<()> {
        let mut workflows = self.write()?;
        if workflows.iter().any(|existing| existing.id() == workflow.id()) {
            return Err(WorkflowRepositoryError::DuplicateWorkflow(workflow.id()));
        }
        if workflows
            .iter()
            .any(|existing| existing.name() == workflow.name())
        {
            return Err(WorkflowRepositoryError::DuplicateName(
                workflow.name().clone(),
            ));
        }
        workflows.push(workflow.clone());
        Ok(())
    }

    async fn update(&self, workflow: &Workflow) -> WorkflowRepositoryResult<()> {
        let mut workflows = self.write()?;
        if workflows
            .iter()
            .any(|existing| existing.id() != workflow.id() && existing.name() == workflow.name())
        {
            return Err(WorkflowRepositoryError::DuplicateName(
                workflow.name().clone(),
            ));
        }
        let slot = workflows
            .iter_mut()
            .find(|existing| existing.id() == workflow.id())
            .ok_or(WorkflowRepositoryError::NotFound(workflow.id()))?;
        *slot = workflow.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: WorkflowId) -> WorkflowRepositoryResult<Option<Workflow>> {
        let workflows = self.read()?;
        Ok(workflows.iter().find(|workflow| workflow.id() == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> WorkflowRepositoryResult<Option<Workflow>> {
        let workflows = self.read()?;
        Ok(workflows
            .iter()
            .find(|workflow| workflow.name().as_str() == name)
            .cloned())
    }

    async fn list_all(&self) -> WorkflowRepositoryResult<Vec<Workflow>> {
        let workflows = self.read()?;
        Ok(workflows.clone())
    }

    async fn delete(&self, id: WorkflowId) -> WorkflowRepositoryResult<()> {
        let mut workflows = self.write()?;
        let before = workflows.len();
        workflows.retain(|workflow| workflow.id() != id);
        if workflows.len() == before {
            return Err(WorkflowRepositoryError::NotFound(id));
        }
        Ok(())
    }
}

impl WorkflowCatalog for InMemoryWorkflowRepository {
    fn steps(&self, task_type: &str) -> Vec<String> {
        self.lookup(task_type, |workflow| workflow.steps().to_vec())
            .unwrap_or_default()
    }

    fn default_step(&self, task_type: &str) -> Option<String> {
        self.lookup(task_type, |workflow| {
            workflow.default_step().map(str::to_owned)
        })
        .flatten()
    }
}
