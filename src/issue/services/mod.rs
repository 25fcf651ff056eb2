//! Application services for issue tracking.

mod tracker;

pub use tracker::{
    CreateIssueRequest, IssueTrackerError, IssueTrackerResult, IssueTrackerService,
    UpdateIssueRequest,
};
