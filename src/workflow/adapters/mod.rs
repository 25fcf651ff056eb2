//! Adapter implementations for workflow ports and the backend boundary.

pub mod catalog;
pub mod memory;
pub mod wire;

pub use catalog::{CatalogEntry, CatalogSnapshot};
pub use memory::InMemoryWorkflowRepository;
pub use wire::{WorkflowDecodeError, decode_catalog};
