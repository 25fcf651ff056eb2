//! Service layer for workflow management.

use crate::config::TrackerConfig;
use crate::task::ports::{TaskRepository, TaskRepositoryError};
use crate::workflow::{
    adapters::CatalogSnapshot,
    domain::{Workflow, WorkflowDomainError, WorkflowId, WorkflowName},
    ports::{WorkflowRepository, WorkflowRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Request payload for creating a workflow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateWorkflowRequest {
    /// Unique name, equal to the task type the workflow governs.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Ordered step names.
    pub steps: Vec<String>,
    /// Step preselected when a task enters progress without one.
    pub default_step: Option<String>,
    /// Whether the workflow becomes the default workflow.
    pub is_default: bool,
}

impl CreateWorkflowRequest {
    /// Creates a request with a name and steps.
    #[must_use]
    pub fn new<S: Into<String>>(name: impl Into<String>, steps: impl IntoIterator<Item = S>) -> Self {
        Self {
            name: name.into(),
            steps: steps.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the default step.
    #[must_use]
    pub fn with_default_step(mut self, step: impl Into<String>) -> Self {
        self.default_step = Some(step.into());
        self
    }

    /// Marks the workflow as the default workflow.
    #[must_use]
    pub const fn as_default(mut self) -> Self {
        self.is_default = true;
        self
    }
}

/// Request payload for updating a workflow. Absent fields stay unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateWorkflowRequest {
    /// New unique name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// Replacement step list.
    pub steps: Option<Vec<String>>,
    /// New default-workflow flag.
    pub is_default: Option<bool>,
}

/// Service-level errors for workflow operations.
#[derive(Debug, Error)]
pub enum WorkflowServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] WorkflowDomainError),
    /// Workflow repository operation failed.
    #[error(transparent)]
    Repository(#[from] WorkflowRepositoryError),
    /// Task repository lookup failed.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),
    /// No workflow exists with the given identifier.
    #[error("workflow {0} not found")]
    NotFound(WorkflowId),
    /// Active tasks still use the workflow's task type.
    #[error("workflow '{name}' is used by {active} active task(s)")]
    WorkflowInUse {
        /// Workflow name.
        name: WorkflowName,
        /// Number of pending or in-progress tasks of that type.
        active: usize,
    },
}

/// Result type for workflow service operations.
pub type WorkflowServiceResult<T> = Result<T, WorkflowServiceError>;

/// Workflow management service.
///
/// Step edits and deletions are refused while pending or in-progress tasks
/// use the workflow's task type, so stored progress values stay members of
/// their workflow.
#[derive(Clone)]
pub struct WorkflowService<W, T, C>
where
    W: WorkflowRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    workflows: Arc<W>,
    tasks: Arc<T>,
    clock: Arc<C>,
}

impl<W, T, C> WorkflowService<W, T, C>
where
    W: WorkflowRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new workflow service.
    #[must_use]
    pub const fn new(workflows: Arc<W>, tasks: Arc<T>, clock: Arc<C>) -> Self {
        Self {
            workflows,
            tasks,
            clock,
        }
    }

    async fn find_workflow_or_error(&self, id: WorkflowId) -> WorkflowServiceResult<Workflow> {
        self.workflows
            .find_by_id(id)
            .await?
            .ok_or(WorkflowServiceError::NotFound(id))
    }

    async fn ensure_not_in_use(&self, workflow: &Workflow) -> WorkflowServiceResult<()> {
        let active = self
            .tasks
            .count_active_by_type(workflow.name().as_str())
            .await?;
        if active > 0 {
            warn!(workflow = %workflow.name(), active, "workflow edit refused: in use");
            return Err(WorkflowServiceError::WorkflowInUse {
                name: workflow.name().clone(),
                active,
            });
        }
        Ok(())
    }

    async fn clear_other_defaults(&self, keep: WorkflowId) -> WorkflowServiceResult<()> {
        for mut other in self.workflows.list_all().await? {
            if other.id() != keep && other.is_default() {
                other.set_is_default(false, &*self.clock);
                self.workflows.update(&other).await?;
            }
        }
        Ok(())
    }

    /// Creates a workflow.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowServiceError::Domain`] for invalid names or steps
    /// and [`WorkflowServiceError::Repository`] when the name is taken or
    /// persistence fails.
    pub async fn create(&self, request: CreateWorkflowRequest) -> WorkflowServiceResult<Workflow> {
        let name = WorkflowName::new(request.name)?;
        let mut workflow = Workflow::new(name, request.description, &request.steps, &*self.clock)?;
        if request.default_step.is_some() {
            workflow.set_default_step(request.default_step.as_deref(), &*self.clock)?;
        }
        if request.is_default {
            workflow.set_is_default(true, &*self.clock);
        }
        self.workflows.store(&workflow).await?;
        if request.is_default {
            self.clear_other_defaults(workflow.id()).await?;
        }
        info!(workflow_id = %workflow.id(), name = %workflow.name(), steps = workflow.steps().len(), "workflow created");
        Ok(workflow)
    }

    /// Updates name, description, steps, or the default flag.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowServiceError::WorkflowInUse`] when steps change
    /// while active tasks use the workflow, plus the errors of
    /// [`Self::create`] and [`WorkflowServiceError::NotFound`].
    pub async fn update(
        &self,
        id: WorkflowId,
        request: UpdateWorkflowRequest,
    ) -> WorkflowServiceResult<Workflow> {
        let mut workflow = self.find_workflow_or_error(id).await?;
        if let Some(steps) = request.steps {
            self.ensure_not_in_use(&workflow).await?;
            workflow.replace_steps(steps, &*self.clock)?;
        }
        if let Some(raw_name) = request.name {
            workflow.rename(WorkflowName::new(raw_name)?, &*self.clock);
        }
        if let Some(description) = request.description {
            workflow.set_description(description, &*self.clock);
        }
        if let Some(is_default) = request.is_default {
            workflow.set_is_default(is_default, &*self.clock);
        }
        self.workflows.update(&workflow).await?;
        if workflow.is_default() {
            self.clear_other_defaults(id).await?;
        }
        info!(workflow_id = %id, name = %workflow.name(), "workflow updated");
        Ok(workflow)
    }

    /// Makes `id` the only default workflow.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowServiceError::NotFound`] or repository errors.
    pub async fn set_default(&self, id: WorkflowId) -> WorkflowServiceResult<Workflow> {
        let mut workflow = self.find_workflow_or_error(id).await?;
        self.clear_other_defaults(id).await?;
        workflow.set_is_default(true, &*self.clock);
        self.workflows.update(&workflow).await?;
        info!(workflow_id = %id, name = %workflow.name(), "default workflow set");
        Ok(workflow)
    }

    /// Deletes a workflow.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowServiceError::WorkflowInUse`] while active tasks use
    /// the workflow, [`WorkflowServiceError::NotFound`], or repository
    /// errors.
    pub async fn delete(&self, id: WorkflowId) -> WorkflowServiceResult<()> {
        let workflow = self.find_workflow_or_error(id).await?;
        self.ensure_not_in_use(&workflow).await?;
        self.workflows.delete(id).await?;
        info!(workflow_id = %id, name = %workflow.name(), "workflow deleted");
        Ok(())
    }

    /// Appends a step.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowServiceError::WorkflowInUse`], domain errors for a
    /// blank or duplicate step, [`WorkflowServiceError::NotFound`], or
    /// repository errors.
    pub async fn add_step(
        &self,
        id: WorkflowId,
        title: impl AsRef<str> + Send,
    ) -> WorkflowServiceResult<Workflow> {
        let mut workflow = self.find_workflow_or_error(id).await?;
        self.ensure_not_in_use(&workflow).await?;
        workflow.add_step(title, &*self.clock)?;
        self.save_steps(workflow).await
    }

    /// Renames the step at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowServiceError::WorkflowInUse`], domain errors for a
    /// bad index or name, [`WorkflowServiceError::NotFound`], or repository
    /// errors.
    pub async fn rename_step(
        &self,
        id: WorkflowId,
        index: usize,
        title: impl AsRef<str> + Send,
    ) -> WorkflowServiceResult<Workflow> {
        let mut workflow = self.find_workflow_or_error(id).await?;
        self.ensure_not_in_use(&workflow).await?;
        workflow.rename_step(index, title, &*self.clock)?;
        self.save_steps(workflow).await
    }

    /// Removes the step at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowServiceError::WorkflowInUse`], a domain error for a
    /// bad index, [`WorkflowServiceError::NotFound`], or repository errors.
    pub async fn remove_step(&self, id: WorkflowId, index: usize) -> WorkflowServiceResult<Workflow> {
        let mut workflow = self.find_workflow_or_error(id).await?;
        self.ensure_not_in_use(&workflow).await?;
        workflow.remove_step(index, &*self.clock)?;
        self.save_steps(workflow).await
    }

    /// Replaces the step list with `steps` in the given order.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowServiceError::WorkflowInUse`], domain errors for
    /// blank or repeated steps, [`WorkflowServiceError::NotFound`], or
    /// repository errors.
    pub async fn reorder_steps(
        &self,
        id: WorkflowId,
        steps: Vec<String>,
    ) -> WorkflowServiceResult<Workflow> {
        let mut workflow = self.find_workflow_or_error(id).await?;
        self.ensure_not_in_use(&workflow).await?;
        workflow.replace_steps(steps, &*self.clock)?;
        self.save_steps(workflow).await
    }

    async fn save_steps(&self, workflow: Workflow) -> WorkflowServiceResult<Workflow> {
        self.workflows.update(&workflow).await?;
        info!(workflow_id = %workflow.id(), steps = ?workflow.steps(), "workflow steps changed");
        Ok(workflow)
    }

    /// Sets or clears the default step.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowDomainError::UnknownDefaultStep`] when the step is
    /// not part of the workflow, [`WorkflowServiceError::NotFound`], or
    /// repository errors.
    pub async fn set_default_step(
        &self,
        id: WorkflowId,
        step: Option<&str>,
    ) -> WorkflowServiceResult<Workflow> {
        let mut workflow = self.find_workflow_or_error(id).await?;
        workflow.set_default_step(step, &*self.clock)?;
        self.workflows.update(&workflow).await?;
        info!(workflow_id = %id, default_step = ?workflow.default_step(), "default step changed");
        Ok(workflow)
    }

    /// Retrieves a workflow by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowServiceError::Repository`] when lookup fails.
    pub async fn find_by_id(&self, id: WorkflowId) -> WorkflowServiceResult<Option<Workflow>> {
        Ok(self.workflows.find_by_id(id).await?)
    }

    /// Lists all workflows.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowServiceError::Repository`] when lookup fails.
    pub async fn list(&self) -> WorkflowServiceResult<Vec<Workflow>> {
        Ok(self.workflows.list_all().await?)
    }

    /// Returns the steps of the workflow named `task_type`, or an empty list
    /// when none exists.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowServiceError::Repository`] when lookup fails.
    pub async fn steps_for_task_type(&self, task_type: &str) -> WorkflowServiceResult<Vec<String>> {
        let found = self.workflows.find_by_name(task_type).await?;
        if found.is_none() {
            debug!(task_type, "no workflow for task type");
        }
        Ok(found
            .map(|workflow| workflow.steps().to_vec())
            .unwrap_or_default())
    }

    /// Captures the current workflows as an immutable catalog.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowServiceError::Repository`] when lookup fails.
    pub async fn catalog_snapshot(&self) -> WorkflowServiceResult<CatalogSnapshot> {
        let workflows = self.workflows.list_all().await?;
        Ok(CatalogSnapshot::from_workflows(&workflows))
    }

    /// Creates the configured seed workflows when no workflow exists yet.
    ///
    /// The first seed becomes the default workflow. Returns the number of
    /// workflows created.
    ///
    /// # Errors
    ///
    /// Returns domain errors for invalid seeds or repository errors.
    pub async fn initialize_defaults(&self, config: &TrackerConfig) -> WorkflowServiceResult<usize> {
        if !self.workflows.list_all().await?.is_empty() {
            debug!("workflows already present; skipping seed");
            return Ok(0);
        }
        let mut created = 0_usize;
        for (position, seed) in config.seed_workflows.iter().enumerate() {
            let name = WorkflowName::new(seed.name.as_str())?;
            let description = format!("Default {name} workflow");
            let mut workflow = Workflow::new(name, description, &seed.steps, &*self.clock)?;
            if position == 0 {
                workflow.set_is_default(true, &*self.clock);
            }
            self.workflows.store(&workflow).await?;
            created = created.saturating_add(1);
        }
        info!(created, "default workflows initialised");
        Ok(created)
    }
}
