//! Shared test helpers for in-memory integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use tracing_subscriber::EnvFilter;
use work_calendar::{
    config::TrackerConfig,
    task::{adapters::memory::InMemoryTaskRepository, services::TaskLifecycleService},
    workflow::{
        adapters::InMemoryWorkflowRepository,
        services::{CreateWorkflowRequest, WorkflowService},
    },
};

/// Task service reading steps from the live workflow repository.
pub type TaskService =
    TaskLifecycleService<InMemoryTaskRepository, InMemoryWorkflowRepository, DefaultClock>;

/// Workflow service guarding edits against the task repository.
pub type Workflows =
    WorkflowService<InMemoryWorkflowRepository, InMemoryTaskRepository, DefaultClock>;

/// Task and workflow services wired over shared repositories.
pub struct Tracker {
    pub tasks: TaskService,
    pub workflows: Workflows,
}

impl Tracker {
    /// Wires both services with `config`.
    #[must_use]
    pub fn with_config(config: &TrackerConfig) -> Self {
        let task_repository = Arc::new(InMemoryTaskRepository::new());
        let workflow_repository = Arc::new(InMemoryWorkflowRepository::new());
        let clock = Arc::new(DefaultClock);
        Self {
            tasks: TaskLifecycleService::with_config(
                Arc::clone(&task_repository),
                Arc::clone(&workflow_repository),
                Arc::clone(&clock),
                config,
            ),
            workflows: WorkflowService::new(workflow_repository, task_repository, clock),
        }
    }

    /// Registers the four-step `report` workflow used across the suite.
    ///
    /// # Errors
    ///
    /// Returns an error if the workflow cannot be created.
    pub async fn with_report_workflow(self) -> Result<Self, eyre::Report> {
        self.workflows
            .create(
                CreateWorkflowRequest::new("report", ["Draft", "Review", "Approve", "Publish"])
                    .with_default_step("Draft"),
            )
            .await?;
        Ok(self)
    }
}

/// Routes service logs to the test harness, filtered by `RUST_LOG`.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init()
        .ok();
}

/// Provides services on UTC with no seeded workflows.
#[fixture]
pub fn tracker() -> Tracker {
    init_tracing();
    Tracker::with_config(&TrackerConfig::bare())
}
