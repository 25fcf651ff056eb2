//! Work calendar: task status and progress lifecycle.
//!
//! This crate provides the core of a personal work calendar: tasks that move
//! between `pending`, `in_progress`, and `completed`, progress tracked as a
//! position within an ordered per-task-type workflow, and the derived values
//! the presentation layer needs (completion percentage, status badge,
//! priority colour, overdue marker).
//!
//! # Architecture
//!
//! Each bounded context follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory stores,
//!   backend payload decoding)
//!
//! # Modules
//!
//! - [`task`]: Task records, lifecycle rules, history, and review comments
//! - [`workflow`]: Per-task-type workflows and the step catalog
//! - [`issue`]: Issue tracking with candidate solutions
//! - [`analytics`]: Task statistics and completion trends
//! - [`config`]: Tracker configuration

pub mod analytics;
pub mod config;
pub mod issue;
pub mod task;
pub mod workflow;

#[cfg(test)]
mod test_support;
