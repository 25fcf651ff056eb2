//! Domain model for tracked issues.

mod error;
mod ids;
mod issue;
mod status;

pub use error::{IssueDomainError, ParseIssueStatusError};
pub use ids::IssueId;
pub use issue::{Issue, PersistedIssueData};
pub use status::IssueStatus;
