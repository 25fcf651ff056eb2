//! Shared world state for task progress BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use work_calendar::{
    config::TrackerConfig,
    task::{
        adapters::memory::InMemoryTaskRepository,
        domain::{Task, TaskId},
        services::{StatusUpdateOutcome, TaskLifecycleError, TaskLifecycleService},
    },
    workflow::{adapters::InMemoryWorkflowRepository, services::WorkflowService},
};

/// Task service type used by the BDD world.
pub type TestTaskService =
    TaskLifecycleService<InMemoryTaskRepository, InMemoryWorkflowRepository, DefaultClock>;

/// Workflow service type used by the BDD world.
pub type TestWorkflowService =
    WorkflowService<InMemoryWorkflowRepository, InMemoryTaskRepository, DefaultClock>;

/// Scenario world for task progress behaviour tests.
pub struct ProgressWorld {
    pub tasks: TestTaskService,
    pub workflows: TestWorkflowService,
    pub task_id: Option<TaskId>,
    pub last_update: Option<Result<StatusUpdateOutcome, TaskLifecycleError>>,
    pub last_completed: Option<Task>,
}

impl ProgressWorld {
    /// Creates a world with no workflows and no tasks.
    #[must_use]
    pub fn new() -> Self {
        let task_repository = Arc::new(InMemoryTaskRepository::new());
        let workflow_repository = Arc::new(InMemoryWorkflowRepository::new());
        let clock = Arc::new(DefaultClock);
        Self {
            tasks: TaskLifecycleService::with_config(
                Arc::clone(&task_repository),
                Arc::clone(&workflow_repository),
                Arc::clone(&clock),
                &TrackerConfig::bare(),
            ),
            workflows: WorkflowService::new(workflow_repository, task_repository, clock),
            task_id: None,
            last_update: None,
            last_completed: None,
        }
    }

    /// Returns the task created by a given step.
    ///
    /// # Errors
    ///
    /// Returns an error when no task has been created yet.
    pub fn task_id(&self) -> Result<TaskId, eyre::Report> {
        self.task_id
            .ok_or_else(|| eyre::eyre!("missing task in scenario world"))
    }

    /// Loads the current state of the scenario task.
    ///
    /// # Errors
    ///
    /// Returns an error when the task is missing or lookup fails.
    pub fn current_task(&self) -> Result<Task, eyre::Report> {
        let id = self.task_id()?;
        run_async(self.tasks.find_by_id(id))?
            .ok_or_else(|| eyre::eyre!("task {id} not found"))
    }
}

impl Default for ProgressWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ProgressWorld {
    ProgressWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
