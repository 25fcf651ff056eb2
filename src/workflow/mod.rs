//! Workflow management.
//!
//! Workflows are keyed by name; a task's task type selects the workflow whose
//! steps its progress must belong to. The in-memory repository doubles as the
//! live [`WorkflowCatalog`](crate::task::ports::WorkflowCatalog), and
//! [`CatalogSnapshot`](adapters::CatalogSnapshot) serves fixed or decoded
//! catalogs.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
