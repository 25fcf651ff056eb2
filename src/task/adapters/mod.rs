//! Adapter implementations for task ports and the backend boundary.

pub mod memory;
pub mod wire;
