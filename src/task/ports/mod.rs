//! Port contracts for task lifecycle management.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod catalog;
pub mod repository;

#[cfg(test)]
pub use catalog::MockWorkflowCatalog;
pub use catalog::WorkflowCatalog;
pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
