//! Domain model for workflows.
//!
//! A workflow names the ordered steps a task of one task type passes through
//! while in progress.

mod error;
mod ids;
mod workflow;

pub use error::WorkflowDomainError;
pub use ids::{WorkflowId, WorkflowName};
pub use workflow::{PersistedWorkflowData, Workflow, normalize_steps};
