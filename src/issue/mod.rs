//! Issue tracking.
//!
//! Issues record work problems together with the candidate solutions tried
//! and the one that worked. They share [`Priority`](crate::task::domain::Priority)
//! with tasks.
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
