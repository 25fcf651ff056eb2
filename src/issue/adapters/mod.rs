//! Adapter implementations for issue ports.

pub mod memory;

pub use memory::InMemoryIssueRepository;
