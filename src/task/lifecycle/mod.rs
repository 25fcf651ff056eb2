//! Task lifecycle rules.
//!
//! Pure, synchronous derivations over a single task snapshot: completion
//! percentage, status transition validation, display classification, and the
//! creation-time status default. The only collaborator is the read-only
//! [`WorkflowCatalog`](crate::task::ports::WorkflowCatalog).

mod display;
mod progress;
mod schedule;
mod transition;

pub use display::{
    BadgeKind, ColorToken, DisplayClassification, ProgressBand, classify_for_display,
};
pub use progress::{
    IN_PROGRESS_FALLBACK_PERCENT, UNRECOGNIZED_STATUS_PERCENT, progress_percentage,
    step_percentage,
};
pub use schedule::{infer_initial_status, local_today};
pub use transition::{
    StatusTransition, StepRequest, validate_progress_step, validate_status_transition,
};
