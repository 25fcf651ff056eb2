//! Task lifecycle management.
//!
//! Tasks move between `pending`, `in_progress`, and `completed`, and while in
//! progress sit on one step of the workflow configured for their task type.
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Pure lifecycle rules in [`lifecycle`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod lifecycle;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
